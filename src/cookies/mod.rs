//! Cookie encoding, parsing and writing.
//!
//! This module provides the server side of cookie handling:
//!
//! - **Encoding**: Percent-encoding of names and values ([`percentcodec`])
//! - **Parsing**: `Cookie` request header to a name/value map ([`headerparser`])
//! - **Attributes**: Path, Domain, Secure and Expires with layered defaults ([`attributes`])
//! - **Conversion**: Pluggable value decoding ([`converter`])
//! - **Store**: The request-scoped facade tying it together ([`store`])
//!
//! # Architecture
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`CookieStore`](store::CookieStore) | Lookup, defaulting, encoding, header I/O |
//! | [`CookieAttributes`](attributes::CookieAttributes) | Tri-state attributes and merge precedence |
//! | [`Expiration`](attributes::Expiration) | Relative or absolute expiry |
//! | [`CookieConverter`](converter::CookieConverter) | Custom value decoder |
//!
//! # Attribute precedence
//!
//! When a cookie is written, attributes are resolved field by field, later
//! layers winning:
//!
//! 1. `Path=/`
//! 2. the store defaults ([`CookieStoreConfig`](store::CookieStoreConfig))
//! 3. the attributes passed to the call
//!
//! Directives are written as `Name=Value[; Expires=D][; Path=P][; Domain=D][; Secure]`.
//!
//! # Example
//!
//! ```rust
//! use cookieserve::cookies::percentcodec;
//!
//! assert_eq!(percentcodec::encode_name("a:b"), "a%3Ab");
//! assert_eq!(percentcodec::encode_value(r#"{"a":1}"#), "{%22a%22:1}");
//! assert_eq!(percentcodec::decode("caf%C3%A9"), "café");
//! ```

pub mod attributes;
pub mod converter;
pub mod headerparser;
pub mod percentcodec;
pub mod store;

pub use attributes::{CookieAttributes, Expiration};
pub use converter::CookieConverter;
pub use store::{CookieStore, CookieStoreConfig};
