use thiserror::Error;

/// Message used when a cookie name is empty.
/// Same wording the servlet containers use for `err.cookie_name_blank`.
pub const BLANK_NAME_MESSAGE: &str = "Cookie name may not be null or zero length";

/// Errors surfaced to callers of the cookie store.
#[derive(Debug, Error)]
pub enum CookieError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Failed to parse cookie '{name}' as JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize value for cookie '{name}': {source}")]
    Serialization {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid header: {name}")]
    InvalidHeader { name: String },
}

impl CookieError {
    /// Create the error returned for an empty cookie name.
    pub fn blank_name() -> Self {
        CookieError::InvalidArgument {
            message: BLANK_NAME_MESSAGE.to_string(),
        }
    }

    /// Create the error returned when an attribute value would end its directive early.
    pub fn invalid_attribute(attribute: &str, value: &str) -> Self {
        CookieError::InvalidArgument {
            message: format!("Cookie {} may not contain ';': {:?}", attribute, value),
        }
    }

    pub fn invalid_header(name: impl Into<String>) -> Self {
        CookieError::InvalidHeader { name: name.into() }
    }

    /// True for caller mistakes that retrying with the same input cannot fix.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CookieError::InvalidArgument { .. })
    }
}

/// Result type alias for cookie store operations.
pub type CookieResult<T> = Result<T, CookieError>;

/// Failure reported by a custom value converter.
///
/// The store never returns this to its callers: a failed conversion is logged
/// and the value is decoded with the default percent decoder instead.
#[derive(Debug, Error)]
#[error("Cookie value conversion failed: {message}")]
pub struct ConverterError {
    message: String,
}

impl ConverterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
