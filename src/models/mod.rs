pub mod chapter;
pub mod document;

pub use chapter::{placeholder_text, Chapter, SummaryResult};
pub use document::DocumentRecord;
