use thiserror::Error;

use crate::decode::DecodeStrategy;
use crate::generator::ModelUnavailable;
use crate::validation::ValidationError;

/// All possible errors that can occur while turning model output into a graph
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The upstream text producer failed or returned nothing
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The scanner found no candidate block in the text
    #[error("No structured {0} block found in model output")]
    NoStructuredBlock(DecodeStrategy),

    /// A candidate block was found but does not have the expected shape
    #[error("Decode error: {0}")]
    DecodeError(#[from] DecodeError),

    /// The decoded graph violates a structural invariant
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    /// Anything else that went wrong inside the pipeline
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Coarse classification of an [`ExtractError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ModelUnavailable,
    NoStructuredBlock,
    Decode,
    Validation,
    Internal,
}

/// Reasons a scanned block could not be decoded
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Errors that occur during JSON parsing
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors that occur during YAML parsing
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A required field is absent (or null)
    #[error("Missing required field '{field}' at {path}")]
    MissingField { field: &'static str, path: String },

    /// A field is present but holds the wrong type of value
    #[error("Field '{field}' at {path} must be {expected}")]
    InvalidField {
        field: &'static str,
        path: String,
        expected: &'static str,
    },

    /// The block parsed but is not the expected container
    #[error("Unexpected document shape: {0}")]
    UnexpectedShape(String),

    /// A YAML document declares none of the category keys
    #[error(
        "No recognized categories (expected at least one of \
         requirements, constraints, implicit_knowledge)"
    )]
    NoRecognizedCategories,
}

impl DecodeError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DecodeError::Json(_) => "ERR_DECODE_JSON_PARSE",
            DecodeError::Yaml(_) => "ERR_DECODE_YAML_PARSE",
            DecodeError::MissingField { .. } => "ERR_DECODE_MISSING_FIELD",
            DecodeError::InvalidField { .. } => "ERR_DECODE_INVALID_FIELD",
            DecodeError::UnexpectedShape(_) => "ERR_DECODE_UNEXPECTED_SHAPE",
            DecodeError::NoRecognizedCategories => "ERR_DECODE_NO_CATEGORIES",
        }
    }
}

impl ExtractError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ExtractError::ModelUnavailable(_) => "ERR_MODEL_UNAVAILABLE",
            ExtractError::NoStructuredBlock(_) => "ERR_NO_STRUCTURED_BLOCK",
            ExtractError::DecodeError(err) => err.error_code(),
            ExtractError::ValidationError(err) => err.code,
            ExtractError::InternalError(_) => "ERR_INTERNAL",
        }
    }

    /// Which taxonomy bucket the error falls into
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::ModelUnavailable(_) => ErrorKind::ModelUnavailable,
            ExtractError::NoStructuredBlock(_) => ErrorKind::NoStructuredBlock,
            ExtractError::DecodeError(_) => ErrorKind::Decode,
            ExtractError::ValidationError(_) => ErrorKind::Validation,
            ExtractError::InternalError(_) => ErrorKind::Internal,
        }
    }
}

impl From<ModelUnavailable> for ExtractError {
    fn from(err: ModelUnavailable) -> Self {
        ExtractError::ModelUnavailable(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::error_codes;

    #[test]
    fn test_error_codes_follow_the_inner_error() {
        let err = ExtractError::from(DecodeError::MissingField {
            field: "links",
            path: "$".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.error_code(), "ERR_DECODE_MISSING_FIELD");
        assert_eq!(
            err.to_string(),
            "Decode error: Missing required field 'links' at $"
        );

        let err = ExtractError::from(ValidationError {
            code: error_codes::DUPLICATE_ID,
            message: "Duplicate node id 'R1'".to_string(),
            path: Some("nodes[1].id".to_string()),
        });
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.error_code(), error_codes::DUPLICATE_ID);
    }

    #[test]
    fn test_model_and_internal_errors() {
        let err = ExtractError::from(ModelUnavailable("timeout".to_string()));
        assert_eq!(err.kind(), ErrorKind::ModelUnavailable);
        assert_eq!(err.to_string(), "Model unavailable: timeout");

        let err = ExtractError::InternalError("worker panicked".to_string());
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.error_code(), "ERR_INTERNAL");
    }

    #[test]
    fn test_no_structured_block_names_the_format() {
        let err = ExtractError::NoStructuredBlock(DecodeStrategy::Yaml);
        assert_eq!(err.to_string(), "No structured YAML block found in model output");
    }
}
