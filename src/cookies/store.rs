//! Request-scoped cookie store.
//!
//! [`CookieStore`] reads cookies from the request's `Cookie` header and writes
//! `Set-Cookie` lines to the response through a [`CookieTransport`]. Names and
//! values are percent-encoded on the way out and decoded on the way in.
//!
//! # Example
//!
//! ```rust
//! use cookieserve::cookies::attributes::CookieAttributes;
//! use cookieserve::cookies::store::CookieStore;
//! use cookieserve::http::transport::HeaderMapTransport;
//! use std::sync::Arc;
//!
//! let transport = Arc::new(HeaderMapTransport::from_cookie_header("theme=dark").unwrap());
//! let cookies = CookieStore::new(transport.clone());
//!
//! assert_eq!(cookies.get("theme").unwrap().as_deref(), Some("dark"));
//!
//! cookies
//!     .set_with("lang", "en", &CookieAttributes::new().path("/app").secure(true))
//!     .unwrap();
//! assert_eq!(transport.set_cookie_lines(), vec!["lang=en; Path=/app; Secure"]);
//! ```

use crate::base::context::JsonResultExt;
use crate::base::cookieerror::{CookieError, CookieResult};
use crate::cookies::attributes::{CookieAttributes, Expiration};
use crate::cookies::converter::CookieConverter;
use crate::cookies::headerparser::parse_cookie_header;
use crate::cookies::percentcodec;
use crate::http::transport::CookieTransport;
use http::header::{COOKIE, SET_COOKIE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;

/// Configuration for a [`CookieStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieStoreConfig {
    /// Attributes applied to every write, below the per-call attributes.
    #[serde(default)]
    pub defaults: CookieAttributes,
}

impl CookieStoreConfig {
    /// Load a configuration such as `{"defaults": {"path": "/app", "secure": true}}`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Reads and writes the cookies of one request/response pair.
///
/// `get`, `set` and `remove` (and their variants) run one at a time per
/// store, since they act on shared request/response state.
pub struct CookieStore {
    transport: Arc<dyn CookieTransport>,
    config: CookieStoreConfig,
    converter: Option<Arc<dyn CookieConverter>>,
    lock: Mutex<()>,
}

impl fmt::Debug for CookieStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieStore")
            .field("config", &self.config)
            .field("converter", &self.converter.is_some())
            .field("committed", &self.transport.is_committed())
            .finish()
    }
}

impl CookieStore {
    /// Store with no defaults and the default value decoder.
    pub fn new(transport: Arc<dyn CookieTransport>) -> Self {
        Self::with_config(transport, CookieStoreConfig::default())
    }

    pub fn with_config(transport: Arc<dyn CookieTransport>, config: CookieStoreConfig) -> Self {
        Self {
            transport,
            config,
            converter: None,
            lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &CookieStoreConfig {
        &self.config
    }

    /// Attributes applied to every write unless the call overrides them.
    pub fn defaults(&self) -> &CookieAttributes {
        &self.config.defaults
    }

    /// A store on the same request/response that decodes values with
    /// `converter` first. `self` is left unchanged.
    pub fn with_converter(&self, converter: Arc<dyn CookieConverter>) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
            converter: Some(converter),
            lock: Mutex::new(()),
        }
    }

    /// A store on the same request/response with different defaults.
    pub fn with_defaults(&self, defaults: CookieAttributes) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: CookieStoreConfig { defaults },
            converter: self.converter.clone(),
            lock: Mutex::new(()),
        }
    }

    /// Decoded value of cookie `name`, or `None` if the request does not carry it.
    pub fn get(&self, name: &str) -> CookieResult<Option<String>> {
        ensure_name(name)?;
        let _guard = self.guard();

        let Some(header) = self.transport.read_header(COOKIE.as_str()) else {
            return Ok(None);
        };
        Ok(self.parse(&header).remove(name))
    }

    /// Decoded value of cookie `name` deserialized from JSON.
    pub fn get_json<T: DeserializeOwned>(&self, name: &str) -> CookieResult<Option<T>> {
        match self.get(name)? {
            Some(value) => serde_json::from_str(&value).parse_context(name).map(Some),
            None => Ok(None),
        }
    }

    /// Every cookie of the request, decoded. Empty if there is no `Cookie` header.
    pub fn get_all(&self) -> HashMap<String, String> {
        match self.transport.read_header(COOKIE.as_str()) {
            Some(header) => self.parse(&header),
            None => HashMap::new(),
        }
    }

    /// Set a cookie with the store defaults.
    pub fn set(&self, name: &str, value: &str) -> CookieResult<()> {
        self.set_with(name, value, &CookieAttributes::new())
    }

    /// Set a cookie. `attributes` override the store defaults, which override
    /// the default path `/`.
    ///
    /// Nothing is written once the response is committed; that is not an error.
    pub fn set_with(&self, name: &str, value: &str, attributes: &CookieAttributes) -> CookieResult<()> {
        ensure_name(name)?;
        let _guard = self.guard();
        self.write_cookie(name, value, attributes)
    }

    /// Set a cookie whose value is `value` serialized as JSON.
    pub fn set_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> CookieResult<()> {
        self.set_json_with(name, value, &CookieAttributes::new())
    }

    pub fn set_json_with<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
        attributes: &CookieAttributes,
    ) -> CookieResult<()> {
        let json = serde_json::to_string(value).serialize_context(name)?;
        self.set_with(name, &json, attributes)
    }

    /// Expire a cookie set with the store defaults.
    pub fn remove(&self, name: &str) -> CookieResult<()> {
        self.remove_with(name, &CookieAttributes::new())
    }

    /// Expire a cookie by setting it empty with an expiration in the past.
    ///
    /// `attributes` should match the path and domain the cookie was set with.
    pub fn remove_with(&self, name: &str, attributes: &CookieAttributes) -> CookieResult<()> {
        ensure_name(name)?;
        let _guard = self.guard();

        let expired = CookieAttributes::extend([
            attributes,
            &CookieAttributes::new().expires(Expiration::days(-1)),
        ]);
        self.write_cookie(name, "", &expired)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn parse(&self, header: &str) -> HashMap<String, String> {
        parse_cookie_header(header, self.converter.as_deref())
    }

    /// Caller must hold the store lock.
    fn write_cookie(&self, name: &str, value: &str, attributes: &CookieAttributes) -> CookieResult<()> {
        let resolved = CookieAttributes::resolve(&self.config.defaults, attributes);
        resolved.validate()?;
        let line = format_set_cookie(name, value, &resolved, OffsetDateTime::now_utc());

        if self.transport.is_committed() {
            tracing::debug!(cookie = %name, "response already committed, dropping Set-Cookie");
            return Ok(());
        }

        tracing::trace!(header = %line, "writing Set-Cookie");
        self.transport.append_header(SET_COOKIE.as_str(), &line)
    }
}

/// Build one `Set-Cookie` value: the encoded pair followed by the directives
/// of the already-resolved `attributes`.
pub fn format_set_cookie(
    name: &str,
    value: &str,
    attributes: &CookieAttributes,
    now: OffsetDateTime,
) -> String {
    let mut header = percentcodec::encode_name(name);
    header.push('=');
    header.push_str(&percentcodec::encode_value(value));
    attributes.write_directives(&mut header, now);
    header
}

fn ensure_name(name: &str) -> CookieResult<()> {
    if name.is_empty() {
        return Err(CookieError::blank_name());
    }
    Ok(())
}
