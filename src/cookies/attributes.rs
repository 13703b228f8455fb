use crate::base::cookieerror::{CookieError, CookieResult};
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

/// Path every cookie gets unless the store defaults or the call say otherwise.
pub const DEFAULT_PATH: &str = "/";

/// IMF-fixdate, the date format of the `Expires` directive.
const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

const SECONDS_PER_DAY: i64 = 86_400;

/// When a cookie stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expiration {
    /// Relative to the moment the header is written.
    In(Duration),
    /// A fixed instant.
    At(OffsetDateTime),
}

impl Expiration {
    /// Expire `days` days after the header is written. Negative values expire
    /// the cookie immediately. Out-of-range counts saturate.
    pub fn days(days: i64) -> Self {
        Expiration::In(Duration::seconds(days.saturating_mul(SECONDS_PER_DAY)))
    }

    pub fn at(instant: OffsetDateTime) -> Self {
        Expiration::At(instant)
    }

    /// The instant this expiration denotes when evaluated at `now`.
    pub fn resolve(&self, now: OffsetDateTime) -> OffsetDateTime {
        match self {
            Expiration::In(offset) => now.saturating_add(*offset),
            Expiration::At(instant) => *instant,
        }
    }
}

/// Attributes attached to a `Set-Cookie` line.
///
/// Every field is tri-state: `None` means "not specified here" and is
/// different from an explicit empty path or `secure: Some(false)`. Merging
/// only ever copies specified fields, so a later layer can override an
/// earlier one but never erase it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<Expiration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
}

impl CookieAttributes {
    /// Attributes with nothing specified.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expires(mut self, expires: Expiration) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Written verbatim after `Path=`. A `;` is rejected when the cookie is set.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Written verbatim after `Domain=`. A `;` is rejected when the cookie is set.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// True if no field is specified.
    pub fn is_empty(&self) -> bool {
        self.expires.is_none() && self.path.is_none() && self.domain.is_none() && self.secure.is_none()
    }

    /// Copy every field `other` specifies into `self`.
    pub fn merge(&mut self, other: &CookieAttributes) -> &mut Self {
        if let Some(path) = &other.path {
            self.path = Some(path.clone());
        }
        if let Some(domain) = &other.domain {
            self.domain = Some(domain.clone());
        }
        if let Some(expires) = other.expires {
            self.expires = Some(expires);
        }
        if let Some(secure) = other.secure {
            self.secure = Some(secure);
        }
        self
    }

    /// Fold `layers` left to right; later layers win field by field.
    pub fn extend<'a>(layers: impl IntoIterator<Item = &'a CookieAttributes>) -> Self {
        let mut result = Self::new();
        for layer in layers {
            result.merge(layer);
        }
        result
    }

    /// Resolve the attributes for one write.
    ///
    /// Precedence, lowest first: [`DEFAULT_PATH`], the store `defaults`, the
    /// attributes given to the call.
    pub fn resolve(defaults: &CookieAttributes, call: &CookieAttributes) -> Self {
        let baseline = Self::new().path(DEFAULT_PATH);
        Self::extend([&baseline, defaults, call])
    }

    /// Reject a path or domain containing `;`, which would start a new directive.
    pub fn validate(&self) -> CookieResult<()> {
        if let Some(path) = self.path.as_deref().filter(|p| p.contains(';')) {
            return Err(CookieError::invalid_attribute("path", path));
        }
        if let Some(domain) = self.domain.as_deref().filter(|d| d.contains(';')) {
            return Err(CookieError::invalid_attribute("domain", domain));
        }
        Ok(())
    }

    /// Append the `Set-Cookie` directives for these attributes to `header`.
    ///
    /// Order is fixed: `Expires`, `Path` (if non-empty), `Domain`, `Secure`
    /// (only when explicitly true). Relative expirations resolve against `now`.
    pub fn write_directives(&self, header: &mut String, now: OffsetDateTime) {
        if let Some(expires) = &self.expires {
            match format_http_date(expires.resolve(now)) {
                Ok(date) => {
                    header.push_str("; Expires=");
                    header.push_str(&date);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "cookie expiration cannot be formatted, omitting Expires");
                }
            }
        }

        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            header.push_str("; Path=");
            header.push_str(path);
        }

        if let Some(domain) = &self.domain {
            header.push_str("; Domain=");
            header.push_str(domain);
        }

        if self.secure == Some(true) {
            header.push_str("; Secure");
        }
    }
}

/// Format `instant` as an IMF-fixdate in GMT.
pub fn format_http_date(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    instant.to_offset(UtcOffset::UTC).format(HTTP_DATE)
}
