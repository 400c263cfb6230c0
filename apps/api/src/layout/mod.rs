// Line-clamp layout: tokenizer → line fitter → truncation engine → result.
// The engine is a pure, synchronous function of (content, options, measurer, width).
// Servers run it inside tokio::task::spawn_blocking.

pub mod engine;
pub mod font_metrics;
pub mod host;
pub mod line_fitter;
pub mod measure;
pub mod notify;
pub mod result;
pub mod tokenizer;

// Re-export the public API consumed by hosts and route handlers.
pub use engine::{truncate, MaxLines, TruncateOptions, DEFAULT_ELLIPSIS};
pub use font_metrics::{FontFamily, FontMeasurer};
pub use host::Truncator;
pub use measure::{FnMeasurer, TargetWidth, TextMeasurer};
pub use notify::TruncateCallback;
pub use result::{LayoutResult, Line, TruncatedLine};
pub use tokenizer::{tokenize, BreakMode, Paragraph};
