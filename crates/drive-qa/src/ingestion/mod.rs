//! Document ingestion: folder listing and per-format normalization

mod assembler;
mod decoder;
mod lister;
pub mod pdf;
mod processor;
pub mod sheets;

#[cfg(test)]
pub(crate) mod fake;

pub use assembler::CorpusAssembler;
pub use decoder::FormatDecoder;
pub use lister::{folder_query, FileLister};
pub use processor::IngestPipeline;
pub use sheets::{SheetExtraction, EMPTY_SPREADSHEET};
