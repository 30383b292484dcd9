pub mod duration;
pub mod environment;
pub mod input;
pub mod terminal;

pub use duration::{format_duration, format_nanos};
pub use environment::{LLM_URL_VAR, get_llm_url, resolve_llm_url};
pub use input::{MAX_INPUT_BYTES, read_bounded, read_input_file, validate_article};
pub use terminal::sanitize_for_terminal;
