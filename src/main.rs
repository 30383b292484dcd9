fn main() -> anyhow::Result<()> {
    news_classifier::cli::run()
}
