//! Error types for attribute definitions, configuration and XML I/O.

use thiserror::Error;

/// Errors that can occur while building the attribute panel or converting
/// attributes to and from their serialized forms.
#[derive(Error, Debug)]
pub enum AttributeError {
    /// I/O error during configuration file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing or serialization error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute definition cannot be turned into a widget
    #[error("Invalid definition for attribute '{key}': {message}")]
    InvalidDefinition {
        /// Key of the offending definition
        key: String,
        /// Description of what is wrong with it
        message: String,
    },

    /// Invalid document structure or content
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },

    /// Required element or field is missing
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// Configuration file written by an incompatible version
    #[error("Unsupported config version: expected {expected}, found {found}")]
    UnsupportedVersion {
        /// Version this build understands
        expected: u32,
        /// Version found in the file
        found: u32,
    },
}

impl AttributeError {
    /// Create an invalid definition error.
    pub fn invalid_definition(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an invalid format error with a message.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_definition_message() {
        let err = AttributeError::invalid_definition("numbers", "unknown widget kind 'slider'");
        assert_eq!(
            err.to_string(),
            "Invalid definition for attribute 'numbers': unknown widget kind 'slider'"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AttributeError = io.into();
        assert!(matches!(err, AttributeError::Io(_)));
    }
}
