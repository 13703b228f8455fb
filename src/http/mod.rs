//! HTTP side of the cookie store: the request/response collaborator.

pub mod transport;

// Re-exports for convenience
pub use transport::{CookieTransport, HeaderMapTransport};
