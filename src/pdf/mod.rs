mod extractor;
mod storage;

pub use extractor::{find_scale, ExtractionError, PageScale, ScaleExtractor, SCALE_NOT_FOUND};
pub use storage::{sanitize_filename, StorageError, UploadStore};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl AnalyzeError {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzeError::Storage(_) => "storage",
            AnalyzeError::Extraction(e) => e.kind(),
        }
    }
}

/// Saves an uploaded drawing and reports the scale stated on each page.
#[derive(Debug, Clone)]
pub struct DrawingAnalyzer {
    store: UploadStore,
    extractor: ScaleExtractor,
}

impl DrawingAnalyzer {
    pub fn new(store: UploadStore) -> Self {
        Self {
            store,
            extractor: ScaleExtractor::new(),
        }
    }

    pub fn store(&self) -> &UploadStore {
        &self.store
    }

    /// Blocking: writes the file and parses it
    pub fn analyze(&self, client_name: &str, bytes: &[u8]) -> Result<Vec<PageScale>, AnalyzeError> {
        let path = self.store.persist(client_name, bytes)?;
        let scales = self.extractor.extract_from_path(&path)?;

        tracing::info!(
            "Analyzed {}: {} pages, {} with a scale",
            path.display(),
            scales.len(),
            scales.iter().filter(|s| s.is_found()).count()
        );

        Ok(scales)
    }
}
