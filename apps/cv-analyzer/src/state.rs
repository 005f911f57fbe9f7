use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::nlp::Annotator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup from the loaded lexicon; read-only afterwards.
    pub annotator: Arc<dyn Annotator>,
    /// Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}
