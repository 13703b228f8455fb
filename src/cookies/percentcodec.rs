//! Percent-encoding of cookie names and values.
//!
//! Encoding keeps ASCII letters, digits and the RFC 6265 token punctuation
//! as-is and writes every other character as `%XX` per UTF-8 byte, with
//! uppercase hex. Callers may pass extra characters to leave unescaped.
//!
//! Decoding only understands what the encoder produces: runs of `%XX` with
//! uppercase hex digits. Lowercase or truncated escapes are left untouched.

use percent_encoding::{percent_decode, utf8_percent_encode, NON_ALPHANUMERIC};
use std::collections::HashSet;

/// Punctuation that never needs escaping in a cookie name or value.
const SAFE_PUNCTUATION: [char; 14] = [
    '!', '#', '$', '&', '\'', '*', '+', '-', '.', '^', '_', '`', '|', '~',
];

/// Returns true if `c` is always written unescaped.
pub fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || SAFE_PUNCTUATION.contains(&c)
}

/// Characters a value may keep unescaped when they occur in it.
/// Lets JSON-like payloads stay readable in the header.
fn is_value_exception(c: char) -> bool {
    matches!(c, '/' | ':' | '<'..='@' | '[' | ']' | '{' | '}')
}

/// Percent-encode `decoded`, leaving safe characters and `exceptions` as-is.
///
/// Single forward pass: each character is either copied or replaced by the
/// escape of its UTF-8 bytes.
pub fn encode(decoded: &str, exceptions: &HashSet<char>) -> String {
    let mut encoded = String::with_capacity(decoded.len());
    let mut buf = [0u8; 4];

    for c in decoded.chars() {
        if is_safe_char(c) || exceptions.contains(&c) {
            encoded.push(c);
            continue;
        }

        // NON_ALPHANUMERIC escapes every byte of `c` since it is not safe.
        encoded.extend(utf8_percent_encode(c.encode_utf8(&mut buf), NON_ALPHANUMERIC));
    }

    encoded
}

/// Encode a cookie name. Names get no exceptions.
pub fn encode_name(name: &str) -> String {
    encode(name, &HashSet::new())
}

/// Encode a cookie value.
///
/// `/`, `:`, `<` through `@`, `[`, `]`, `{` and `}` are left unescaped when
/// they appear in the value.
pub fn encode_value(value: &str) -> String {
    let exceptions: HashSet<char> = value.chars().filter(|c| is_value_exception(*c)).collect();
    encode(value, &exceptions)
}

/// Decode every run of uppercase `%XX` escapes in `encoded`.
///
/// A run is decoded as one UTF-8 byte sequence so multi-byte characters come
/// back whole. Bytes of a run that are not valid UTF-8 keep their escaped form.
pub fn decode(encoded: &str) -> String {
    let bytes = encoded.as_bytes();
    let mut decoded = String::with_capacity(encoded.len());
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let run_len = escape_run_len(&bytes[i..]);
        if run_len == 0 {
            i += 1;
            continue;
        }

        // Runs start with '%', so both ends sit on char boundaries.
        decoded.push_str(&encoded[literal_start..i]);
        decode_run(&encoded[i..i + run_len], &mut decoded);
        i += run_len;
        literal_start = i;
    }

    decoded.push_str(&encoded[literal_start..]);
    decoded
}

fn is_upper_hex(b: u8) -> bool {
    b.is_ascii_digit() || (b'A'..=b'F').contains(&b)
}

/// Length in bytes of the `%XX` run at the start of `bytes`, 0 if none.
fn escape_run_len(bytes: &[u8]) -> usize {
    bytes
        .chunks(3)
        .take_while(|chunk| matches!(chunk, [b'%', hi, lo] if is_upper_hex(*hi) && is_upper_hex(*lo)))
        .count()
        * 3
}

fn decode_run(run: &str, out: &mut String) {
    let bytes: Vec<u8> = percent_decode(run.as_bytes()).collect();
    let mut consumed = 0;

    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        consumed += chunk.valid().len();

        let invalid = chunk.invalid();
        if !invalid.is_empty() {
            // Every decoded byte came from exactly three characters of `run`.
            let raw = &run[consumed * 3..(consumed + invalid.len()) * 3];
            tracing::debug!(sequence = %raw, "percent sequence is not valid UTF-8, leaving it encoded");
            out.push_str(raw);
            consumed += invalid.len();
        }
    }
}
