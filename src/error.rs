use thiserror::Error;

/// A flexible field whose raw value matched none of its candidate shapes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: expected one of [{expected}], but found a {found}")]
pub struct DecodeError {
    pub field: &'static str,
    pub expected: String,
    pub found: &'static str,
}

/// Errors that can occur while converting a legacy document.
///
/// Every variant is fatal for the whole conversion; no partial pipeline is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Failed to parse YAML: {0}")]
    Syntax(String),

    #[error("Document {document} could not be decoded: {message}")]
    Decode { document: usize, message: String },

    #[error("Document {document} is malformed: {message}")]
    Structural { document: usize, message: String },

    #[error("Failed to write the canonical document: {0}")]
    Serialize(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl ConvertError {
    pub(crate) fn structural(document: usize, message: impl Into<String>) -> Self {
        ConvertError::Structural {
            document,
            message: message.into(),
        }
    }

    pub(crate) fn decode(document: usize, error: serde_yaml::Error) -> Self {
        ConvertError::Decode {
            document,
            message: error.to_string(),
        }
    }
}
