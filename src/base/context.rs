//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting JSON errors into context-rich `CookieError` variants.

use crate::base::cookieerror::CookieError;

/// Extension trait for adding cookie context to JSON Results.
pub trait JsonResultExt<T> {
    /// Attach the cookie name to a deserialization error.
    ///
    /// # Example
    /// ```ignore
    /// use cookieserve::base::context::JsonResultExt;
    ///
    /// let prefs: Prefs = serde_json::from_str(&raw).parse_context("prefs")?;
    /// // Error: "Failed to parse cookie 'prefs' as JSON: ..."
    /// ```
    fn parse_context(self, name: &str) -> Result<T, CookieError>;

    /// Attach the cookie name to a serialization error.
    fn serialize_context(self, name: &str) -> Result<T, CookieError>;
}

impl<T> JsonResultExt<T> for Result<T, serde_json::Error> {
    fn parse_context(self, name: &str) -> Result<T, CookieError> {
        self.map_err(|source| CookieError::Parse {
            name: name.to_string(),
            source,
        })
    }

    fn serialize_context(self, name: &str) -> Result<T, CookieError> {
        self.map_err(|source| CookieError::Serialization {
            name: name.to_string(),
            source,
        })
    }
}
