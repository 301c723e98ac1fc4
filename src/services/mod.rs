pub mod chapter_parser;
pub mod document_store;
pub mod llm_service;
pub mod summarizer;
pub mod summary_writer;

pub use chapter_parser::parse_chapters;
pub use document_store::{DocumentStore, JsonDocumentStore};
pub use llm_service::LlmService;
pub use summarizer::Summarizer;
pub use summary_writer::SummaryWriter;
