use crate::base::cookieerror::CookieError;
use http::header::{HeaderName, HeaderValue, COOKIE, SET_COOKIE};
use http::HeaderMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// Access to the request/response pair a cookie store works on.
///
/// The store only reads the `cookie` request header and appends
/// `Set-Cookie` response headers; everything else about the exchange
/// belongs to the server framework.
pub trait CookieTransport: Send + Sync {
    /// Value of request header `name`, or `None` if the request has none.
    fn read_header(&self, name: &str) -> Option<String>;

    /// Append a response header. Existing headers with the same name are kept.
    fn append_header(&self, name: &str, value: &str) -> Result<(), CookieError>;

    /// True once the response headers have been sent.
    fn is_committed(&self) -> bool;
}

/// In-memory transport over `http::HeaderMap`s.
///
/// Holds the request headers as received and collects response headers until
/// [`commit`](Self::commit) is called, after which the store stops writing.
#[derive(Debug, Default)]
pub struct HeaderMapTransport {
    request: HeaderMap,
    response: Mutex<HeaderMap>,
    committed: AtomicBool,
}

impl HeaderMapTransport {
    pub fn new(request: HeaderMap) -> Self {
        Self {
            request,
            response: Mutex::new(HeaderMap::new()),
            committed: AtomicBool::new(false),
        }
    }

    /// Transport whose request carries a single `Cookie` header.
    pub fn from_cookie_header(cookie: &str) -> Result<Self, CookieError> {
        let value =
            HeaderValue::from_str(cookie).map_err(|_| CookieError::invalid_header(COOKIE.as_str()))?;
        let mut request = HeaderMap::with_capacity(1);
        request.insert(COOKIE, value);
        Ok(Self::new(request))
    }

    /// Mark the response as sent.
    pub fn commit(&self) {
        self.committed.store(true, Ordering::Release);
    }

    /// Snapshot of the response headers written so far.
    pub fn response_headers(&self) -> HeaderMap {
        self.response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// All `Set-Cookie` lines written so far, in write order.
    pub fn set_cookie_lines(&self) -> Vec<String> {
        let response = self.response.lock().unwrap_or_else(PoisonError::into_inner);
        response
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }
}

impl CookieTransport for HeaderMapTransport {
    /// HTTP/2 clients may split `Cookie` into several header fields; they are
    /// joined back with `"; "`. Values that are not visible ASCII are skipped.
    fn read_header(&self, name: &str) -> Option<String> {
        let values: Vec<&str> = self
            .request
            .get_all(name)
            .iter()
            .filter_map(|v| match v.to_str() {
                Ok(s) => Some(s),
                Err(_) => {
                    tracing::debug!(header = %name, "skipping non-ASCII request header value");
                    None
                }
            })
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(values.join("; "))
        }
    }

    fn append_header(&self, name: &str, value: &str) -> Result<(), CookieError> {
        let header_name = HeaderName::from_str(name).map_err(|_| CookieError::invalid_header(name))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| CookieError::invalid_header(name))?;

        self.response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .append(header_name, header_value);
        Ok(())
    }

    fn is_committed(&self) -> bool {
        self.committed.load(Ordering::Acquire)
    }
}
