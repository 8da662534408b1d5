//! Folder ingestion pipeline: list, then decode every file

use std::sync::Arc;
use std::time::Instant;

use super::assembler::CorpusAssembler;
use super::decoder::FormatDecoder;
use super::lister::FileLister;
use crate::config::IngestionConfig;
use crate::error::Result;
use crate::providers::drive::DriveProvider;
use crate::types::NormalizedDocument;

/// Builds the corpus for one folder
pub struct IngestPipeline {
    lister: FileLister,
    assembler: CorpusAssembler,
}

impl IngestPipeline {
    pub fn new(drive: Arc<dyn DriveProvider>, config: &IngestionConfig) -> Self {
        let decoder = Arc::new(FormatDecoder::new(drive.clone()));
        Self {
            lister: FileLister::new(drive),
            assembler: CorpusAssembler::new(decoder)
                .with_concurrency_limit(config.max_concurrent_files),
        }
    }

    /// List the folder and decode its files
    ///
    /// Fails only when the listing fails; individual files that cannot be
    /// decoded appear in the corpus with error content.
    pub async fn ingest(&self, folder_id: &str) -> Result<Vec<NormalizedDocument>> {
        let start = Instant::now();
        let files = self.lister.list(folder_id).await?;
        let corpus = self.assembler.assemble(files).await;

        let failed = corpus.iter().filter(|d| d.is_failure()).count();
        tracing::info!(
            "Ingested {} documents ({} failed) in {:.2}s",
            corpus.len(),
            failed,
            start.elapsed().as_secs_f64()
        );

        Ok(corpus)
    }
}
