//! # cookieserve
//!
//! Server-side cookie handling for Rust.
//!
//! `cookieserve` reads the cookies of an incoming request and writes
//! `Set-Cookie` lines for the response, taking care of the parts that are
//! easy to get subtly wrong:
//!
//! ## Features
//!
//! - **Percent-Encoding**: Names and values escaped with uppercase `%XX` per UTF-8 byte
//! - **Readable Values**: JSON-like values keep `{`, `}`, `:`, `[`, `]` and friends unescaped
//! - **Attribute Layers**: Per-call attributes over store defaults over `Path=/`
//! - **Custom Decoding**: Pluggable converters for legacy value formats
//! - **Typed Values**: JSON (de)serialization of cookie values via serde
//!
//! ## Quick Start
//!
//! ```rust
//! use cookieserve::cookies::{CookieAttributes, CookieStore};
//! use cookieserve::http::HeaderMapTransport;
//! use std::sync::Arc;
//!
//! let transport = Arc::new(HeaderMapTransport::from_cookie_header("visits=3").unwrap());
//! let cookies = CookieStore::new(transport.clone());
//!
//! let visits: u32 = cookies.get_json("visits").unwrap().unwrap_or(0);
//! cookies
//!     .set_json_with("visits", &(visits + 1), &CookieAttributes::new().secure(true))
//!     .unwrap();
//! assert_eq!(transport.set_cookie_lines(), vec!["visits=4; Path=/; Secure"]);
//!
//! cookies.remove("session").unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and error context helpers
//! - [`cookies`] - Codec, header parsing, attributes and the cookie store
//! - [`http`] - The request/response transport used by the store

pub mod base;
pub mod cookies;
pub mod http;
