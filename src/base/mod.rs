//! Base types and error handling.
//!
//! - [`CookieError`](cookieerror::CookieError): errors surfaced by the cookie store
//! - [`ConverterError`](cookieerror::ConverterError): failures of custom value converters
//! - [`context`]: helpers that attach cookie names to JSON errors

pub mod context;
pub mod cookieerror;
