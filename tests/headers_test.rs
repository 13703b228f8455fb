use cookieserve::base::cookieerror::CookieError;
use cookieserve::cookies::attributes::CookieAttributes;
use cookieserve::cookies::store::CookieStore;
use cookieserve::http::transport::{CookieTransport, HeaderMapTransport};
use http::header::{HeaderValue, COOKIE, SET_COOKIE};
use http::HeaderMap;
use std::sync::Arc;

#[test]
fn test_set_cookie_lines_preserve_write_order() {
    let transport = Arc::new(HeaderMapTransport::default());
    let store = CookieStore::new(transport.clone());

    store.set("first", "1").unwrap();
    store
        .set_with("second", "2", &CookieAttributes::new().path("/b"))
        .unwrap();
    store.remove("third").unwrap();

    let headers = transport.response_headers();
    let mut lines = headers.get_all(SET_COOKIE).iter();

    assert_eq!(lines.next().unwrap(), "first=1; Path=/");
    assert_eq!(lines.next().unwrap(), "second=2; Path=/b");
    assert!(lines
        .next()
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("third=; Expires="));
    assert!(lines.next().is_none());
}

#[test]
fn test_http2_split_cookie_headers() {
    let mut request = HeaderMap::new();
    request.append(COOKIE, HeaderValue::from_static("a=1"));
    request.append(COOKIE, HeaderValue::from_static("b=caf%C3%A9"));
    let store = CookieStore::new(Arc::new(HeaderMapTransport::new(request)));

    let all = store.get_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all["b"], "café");
}

#[test]
fn test_non_ascii_path_rejected_by_transport() {
    let transport = Arc::new(HeaderMapTransport::default());
    let store = CookieStore::new(transport.clone());

    let result = store.set_with("a", "1", &CookieAttributes::new().path("/line\nbreak"));
    assert!(result.is_err());
    assert!(transport.set_cookie_lines().is_empty());
}

/// A transport that records what the store asks of it.
#[derive(Default)]
struct RecordingTransport {
    written: std::sync::Mutex<Vec<(String, String)>>,
}

impl CookieTransport for RecordingTransport {
    fn read_header(&self, name: &str) -> Option<String> {
        (name == "cookie").then(|| "x=1".to_string())
    }

    fn append_header(&self, name: &str, value: &str) -> Result<(), CookieError> {
        self.written
            .lock()
            .unwrap()
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn is_committed(&self) -> bool {
        false
    }
}

#[test]
fn test_custom_transport_header_names() {
    let transport = Arc::new(RecordingTransport::default());
    let store = CookieStore::new(transport.clone());

    assert_eq!(store.get("x").unwrap().as_deref(), Some("1"));
    store.set("y", "2").unwrap();

    let written = transport.written.lock().unwrap();
    assert_eq!(
        *written,
        vec![("set-cookie".to_string(), "y=2; Path=/".to_string())]
    );
}
