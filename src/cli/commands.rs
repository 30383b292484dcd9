use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use serde_json::Value;
use tokio::runtime::Runtime;

use crate::client::{CancelToken, ClassifierClient, ClientConfig};
use crate::clipboard::paste_from_clipboard;
use crate::logging;
use crate::models::DEFAULT_MODEL;
use crate::parsers::{ParsedLines, SkippedLine, parse_ndjson_reader};
use crate::utils::{
    read_bounded, read_input_file, resolve_llm_url, sanitize_for_terminal, validate_article,
};

#[derive(Parser)]
#[command(name = "news-classifier")]
#[command(version = "0.1.0")]
#[command(about = "Classify news articles with a locally hosted language model", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where and how to reach the inference endpoint
#[derive(Args, Debug, Clone)]
pub struct EndpointArgs {
    /// Endpoint URL [default: $LLM_URL]
    #[arg(long)]
    pub url: Option<String>,

    /// Model to classify with
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Give up after this many seconds (waits indefinitely when unset)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify an article given as TEXT, --file, --clipboard, or on stdin
    Classify {
        /// Article text
        text: Option<String>,

        /// Read the article from a file
        #[arg(short, long, conflicts_with_all = ["text", "clipboard"])]
        file: Option<PathBuf>,

        /// Read the article from the system clipboard
        #[arg(long, conflicts_with = "text")]
        clipboard: bool,

        /// Print the raw response record as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        endpoint: EndpointArgs,
    },
    /// Interactive classification UI
    Tui {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },
    /// Decode newline-delimited JSON from FILE (or stdin) and print each record
    Parse {
        /// NDJSON file to decode
        file: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Classify { text, file, clipboard, json, endpoint }) => {
            logging::init(cli.verbose);
            let article = read_article(text, file.as_deref(), clipboard)?;
            classify(&article, &endpoint, json)?;
        }
        Some(Commands::Tui { endpoint }) => {
            run_tui(&endpoint)?;
        }
        Some(Commands::Parse { file }) => {
            logging::init(cli.verbose);
            parse(file.as_deref())?;
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

fn build_client(endpoint: &EndpointArgs) -> Result<ClassifierClient> {
    let url = resolve_llm_url(endpoint.url.as_deref())?;
    let config = ClientConfig::new(&url)
        .with_context(|| format!("Invalid endpoint URL: {}", url))?
        .with_model(endpoint.model.clone())
        .with_timeout(endpoint.timeout.map(Duration::from_secs));

    ClassifierClient::new(config).context("Failed to create HTTP client")
}

fn read_article(text: Option<String>, file: Option<&Path>, clipboard: bool) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return read_input_file(path);
    }
    if clipboard {
        return paste_from_clipboard();
    }
    read_bounded(io::stdin().lock()).context("Failed to read article from stdin")
}

fn classify(article: &str, endpoint: &EndpointArgs, json: bool) -> Result<()> {
    let article = validate_article(article)?;
    let client = build_client(endpoint)?;
    let runtime = Runtime::new().context("Failed to start async runtime")?;

    let cancel = CancelToken::new();
    let classification = runtime
        .block_on(async {
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });

            client.classify_with_cancel(article, &cancel).await
        })
        .context("Classification failed")?;

    report_skipped("response", &classification.skipped);

    if json {
        println!("{}", serde_json::to_string(&classification.record)?);
        return Ok(());
    }

    let label = classification.label();
    if label.is_empty() {
        eprintln!("Warning: Endpoint accepted the request but returned no response text");
    } else {
        println!("{}", sanitize_for_terminal(label));
    }
    if let Some(duration) = classification.duration() {
        println!("Classified in {}", duration);
    }

    Ok(())
}

fn run_tui(endpoint: &EndpointArgs) -> Result<()> {
    let client = build_client(endpoint)?;
    let runtime = Runtime::new().context("Failed to start async runtime")?;

    crate::tui::run_interactive(client, runtime.handle().clone())
}

fn parse(file: Option<&Path>) -> Result<()> {
    let parsed: ParsedLines<Value> = match file {
        Some(path) => {
            let reader = File::open(path)
                .with_context(|| format!("Failed to open NDJSON file: {}", path.display()))?;
            parse_ndjson_reader(reader)
                .with_context(|| format!("Failed to read NDJSON file: {}", path.display()))?
        }
        None => parse_ndjson_reader(io::stdin().lock()).context("Failed to read stdin")?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in &parsed.records {
        writeln!(out, "{}", serde_json::to_string(record)?)?;
    }
    out.flush()?;

    report_skipped("input", &parsed.skipped);
    eprintln!("Parsed {} records ({} skipped)", parsed.records.len(), parsed.skipped.len());

    Ok(())
}

fn report_skipped(source: &str, skipped: &[SkippedLine]) {
    for line in skipped {
        eprintln!(
            "Warning: Skipped invalid line {} in {}: {} ({})",
            line.line_number,
            source,
            sanitize_for_terminal(&line.content),
            line.error
        );
    }
}
