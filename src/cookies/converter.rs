//! Pluggable decoding of cookie values.
//!
//! A [`CookieConverter`] gets the raw, still-encoded value of every cookie the
//! store reads and may return its own decoding. Returning `Ok(None)` or an
//! error makes the store fall back to the default percent decoder.

use crate::base::cookieerror::ConverterError;

/// Custom value decoder, injected into a [`CookieStore`](crate::cookies::store::CookieStore).
///
/// Any `Fn(&str, &str) -> Result<Option<String>, ConverterError>` closure
/// implements this trait.
pub trait CookieConverter: Send + Sync {
    /// Decode `encoded_value`, which belongs to the cookie named `decoded_name`.
    fn convert(
        &self,
        encoded_value: &str,
        decoded_name: &str,
    ) -> Result<Option<String>, ConverterError>;
}

impl<F> CookieConverter for F
where
    F: Fn(&str, &str) -> Result<Option<String>, ConverterError> + Send + Sync,
{
    fn convert(
        &self,
        encoded_value: &str,
        decoded_name: &str,
    ) -> Result<Option<String>, ConverterError> {
        self(encoded_value, decoded_name)
    }
}
