//! Text extraction from uploaded CV files.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; the default is `PdfTextExtractor`.

pub mod pdf;

use thiserror::Error;

pub use pdf::PdfTextExtractor;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Not a readable PDF document: {primary} (fallback: {fallback})")]
    Malformed { primary: String, fallback: String },
}

/// Decodes an uploaded file into plain text. Blocking; call from
/// `spawn_blocking` when on the async runtime.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}
