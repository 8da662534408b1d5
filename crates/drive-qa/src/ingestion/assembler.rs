//! Concurrent corpus assembly

use futures_util::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::decoder::FormatDecoder;
use crate::error::Error;
use crate::types::{FileDescriptor, NormalizedDocument};

/// Decodes a listing into a corpus, one task per file
///
/// The corpus has exactly one entry per descriptor, in listing order.
pub struct CorpusAssembler {
    decoder: Arc<FormatDecoder>,
    limit: Option<Arc<Semaphore>>,
}

impl CorpusAssembler {
    pub fn new(decoder: Arc<FormatDecoder>) -> Self {
        Self {
            decoder,
            limit: None,
        }
    }

    /// Bound the number of files decoded at once (`None` or 0 = unbounded)
    pub fn with_concurrency_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit
            .filter(|n| *n > 0)
            .map(|n| Arc::new(Semaphore::new(n)));
        self
    }

    pub async fn assemble(&self, files: Vec<FileDescriptor>) -> Vec<NormalizedDocument> {
        let handles: Vec<_> = files
            .iter()
            .cloned()
            .map(|descriptor| {
                let decoder = self.decoder.clone();
                let limit = self.limit.clone();
                tokio::spawn(async move {
                    let _permit = match limit {
                        Some(sem) => sem.acquire_owned().await.ok(),
                        None => None,
                    };
                    decoder.decode(&descriptor).await
                })
            })
            .collect();

        // Wait for every file before building the corpus
        let results = join_all(handles).await;

        files
            .iter()
            .zip(results)
            .map(|(descriptor, result)| match result {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::error!(
                        "Decode task for '{}' did not complete: {}",
                        descriptor.display_name(),
                        e
                    );
                    NormalizedDocument::failed(
                        descriptor,
                        &Error::internal(format!("decode task failed: {}", e)),
                    )
                }
            })
            .collect()
    }
}
