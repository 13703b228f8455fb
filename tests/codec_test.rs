use cookieserve::cookies::headerparser::parse_cookie_header;
use cookieserve::cookies::percentcodec::{decode, encode, encode_name, encode_value, is_safe_char};
use std::collections::HashSet;

#[test]
fn test_round_trip_every_plane() {
    // A spread of code points: ASCII, Latin-1, BMP, astral.
    let sample: String = (0u32..0x250)
        .chain(0x2000..0x2100)
        .chain(0xFF00..0xFF10)
        .chain(0x1F600..0x1F650)
        .filter_map(char::from_u32)
        .collect();

    assert_eq!(decode(&encode(&sample, &HashSet::new())), sample);
    assert_eq!(decode(&encode_value(&sample)), sample);
}

#[test]
fn test_encoded_output_is_header_safe() {
    let encoded = encode_name("naïve; café=\"1\"\r\n");
    assert!(encoded.bytes().all(|b| b.is_ascii_graphic()));
    assert!(!encoded.contains(';'));
    assert!(!encoded.contains('='));
}

#[test]
fn test_safe_passthrough() {
    let safe: String = ('\0'..='\u{7F}').filter(|c| is_safe_char(*c)).collect();
    assert_eq!(safe.len(), 26 * 2 + 10 + 14);
    assert_eq!(encode_name(&safe), safe);
    assert_eq!(encode_value(&safe), safe);
}

#[test]
fn test_exception_set_effect() {
    assert_eq!(encode("a:b", &HashSet::new()), "a%3Ab");
    assert_eq!(encode("a:b", &HashSet::from([':'])), "a:b");
}

#[test]
fn test_value_exceptions_only_apply_to_values() {
    let json = r#"{"a":1}"#;
    assert_eq!(encode_value(json), "{%22a%22:1}");
    assert_eq!(encode_name(json), "%7B%22a%22%3A1%7D");
}

#[test]
fn test_escape_is_uppercase() {
    assert_eq!(encode_name("\u{00FF}"), "%C3%BF");
    assert_eq!(decode("%c3%bf"), "%c3%bf");
}

#[test]
fn test_parse_examples() {
    let cookies = parse_cookie_header("a=1; b=2", None);
    assert_eq!(cookies.len(), 2);
    assert_eq!(cookies.get("a").map(String::as_str), Some("1"));
    assert_eq!(cookies.get("b").map(String::as_str), Some("2"));

    let cookies = parse_cookie_header("a=x%3Dy", None);
    assert_eq!(cookies.get("a").map(String::as_str), Some("x=y"));
}

#[test]
fn test_parse_partially_decodable() {
    let cookies = parse_cookie_header("a=ok%20%FF%zz; b=%E2%82%AC", None);
    assert_eq!(cookies["a"], "ok %FF%zz");
    assert_eq!(cookies["b"], "€");
}
