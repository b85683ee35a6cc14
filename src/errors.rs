// errors.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MitsError>;

/// Errors surfaced by the MITS parser. A missing field group is never an
/// error: it simply shows up as an empty list in the output record.
#[derive(Debug, Error)]
pub enum MitsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("XML parse error: {0}")]
    XmlParse(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Root element not found: {0}")]
    MissingRoot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
