pub mod chapter_ctx;
pub mod chapter_flow;

pub use chapter_ctx::ChapterCtx;
pub use chapter_flow::ChapterFlow;
