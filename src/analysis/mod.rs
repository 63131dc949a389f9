pub mod extract;
pub mod format;
pub mod gemini;

pub use extract::{DuplicatePolicy, SignalExtractor};
pub use format::{format_reply, FALLBACK_REPLY};
pub use gemini::GeminiClient;
