use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineLoadError>;

/// Errors raised while binding the native engine library.
#[derive(Error, Debug)]
pub enum EngineLoadError {
    #[error("failed to load engine library {path}: {reason}")]
    LibraryLoad { path: String, reason: String },

    #[error("engine symbol not found: {0}")]
    SymbolNotFound(String),
}
