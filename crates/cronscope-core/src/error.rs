use thiserror::Error;

/// Errors that can surface from the analysis engine.
///
/// Malformed input data never produces an error — the pipeline degrades to
/// empty or inert results instead (see the snapshot and lock modules). Only
/// invalid analyzer options and hook-registry failures are explicit.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Analyzer options failed validation at construction time.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// The live hook registry failed while answering a lookup. The source
    /// error is carried unchanged.
    #[error("Hook registry query failed for '{hook}': {source}")]
    Registry {
        hook: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
