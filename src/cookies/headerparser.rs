//! Parsing of the `Cookie` request header.

use crate::cookies::converter::CookieConverter;
use crate::cookies::percentcodec;
use std::collections::HashMap;

/// Separator between cookie pairs in a `Cookie` header.
pub const PAIR_DELIMITER: &str = "; ";

/// Parse a `Cookie` header into a map of decoded names to decoded values.
///
/// Pairs are split on `"; "`. The name is everything before the first `=`
/// and the value everything after it, so values may contain `=`. Names are
/// always percent-decoded. Values go through `converter` first when one is
/// given; if it declines or fails, they are percent-decoded instead.
///
/// Empty pairs are skipped and a pair without `=` yields an empty value.
/// When a name repeats, the last pair wins.
pub fn parse_cookie_header(
    header: &str,
    converter: Option<&dyn CookieConverter>,
) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for pair in header.split(PAIR_DELIMITER) {
        if pair.is_empty() {
            continue;
        }

        let (encoded_name, encoded_value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = percentcodec::decode(encoded_name);
        let value = decode_value(encoded_value, &name, converter);
        cookies.insert(name, value);
    }

    tracing::trace!(count = cookies.len(), "parsed cookie header");
    cookies
}

/// Decode one value, preferring `converter` over the percent decoder.
pub fn decode_value(
    encoded_value: &str,
    decoded_name: &str,
    converter: Option<&dyn CookieConverter>,
) -> String {
    if let Some(converter) = converter {
        match converter.convert(encoded_value, decoded_name) {
            Ok(Some(value)) => return value,
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(cookie = %decoded_name, error = %e, "cookie converter failed, using default decoding");
            }
        }
    }

    percentcodec::decode(encoded_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::cookieerror::ConverterError;

    #[test]
    fn test_parse_pairs() {
        let cookies = parse_cookie_header("a=1; b=2", None);
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["a"], "1");
        assert_eq!(cookies["b"], "2");
    }

    #[test]
    fn test_value_keeps_inner_equals() {
        let cookies = parse_cookie_header("token=abc==; q=x=y", None);
        assert_eq!(cookies["token"], "abc==");
        assert_eq!(cookies["q"], "x=y");
    }

    #[test]
    fn test_decodes_names_and_values() {
        let cookies = parse_cookie_header("a=x%3Dy; caf%C3%A9=cr%C3%A8me", None);
        assert_eq!(cookies["a"], "x=y");
        assert_eq!(cookies["café"], "crème");
    }

    #[test]
    fn test_last_duplicate_wins() {
        let cookies = parse_cookie_header("a=1; a=2", None);
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies["a"], "2");
    }

    #[test]
    fn test_malformed_pairs() {
        assert!(parse_cookie_header("", None).is_empty());

        let cookies = parse_cookie_header("flag; a=1; ", None);
        assert_eq!(cookies["flag"], "");
        assert_eq!(cookies["a"], "1");
        assert_eq!(cookies.len(), 2);

        let cookies = parse_cookie_header("=orphan", None);
        assert_eq!(cookies[""], "orphan");
    }

    #[test]
    fn test_only_exact_delimiter_splits() {
        let cookies = parse_cookie_header("a=1;b=2", None);
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies["a"], "1;b=2");
    }

    #[test]
    fn test_converter_receives_raw_value_and_decoded_name() {
        let converter = |value: &str, name: &str| -> Result<Option<String>, ConverterError> {
            Ok(Some(format!("{name}:{value}")))
        };
        let cookies = parse_cookie_header("n%20m=v%20w", Some(&converter as &dyn CookieConverter));
        assert_eq!(cookies["n m"], "n m:v%20w");
    }

    #[test]
    fn test_converter_decline_and_failure_fall_back() {
        let converter = |value: &str, name: &str| -> Result<Option<String>, ConverterError> {
            match name {
                "custom" => Ok(Some(value.replace('+', " "))),
                "broken" => Err(ConverterError::new("cannot convert")),
                _ => Ok(None),
            }
        };
        let cookies = parse_cookie_header(
            "custom=a+b; broken=c%20d; plain=e%20f",
            Some(&converter as &dyn CookieConverter),
        );

        assert_eq!(cookies["custom"], "a b");
        assert_eq!(cookies["broken"], "c d");
        assert_eq!(cookies["plain"], "e f");
    }
}
