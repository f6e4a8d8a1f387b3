//! Cookie-string helpers for session persistence.
//!
//! The cookie capability hands us the raw `"name=value; name2=value2"`
//! string (the `document.cookie` shape); parsing and the percent
//! encode/decode of values live here so every adapter behaves the same.
//!
//! 書き込み時にエンコードするので、読み出し時も対称にデコードする
//! （base64 の `=` パディングはデコードしないと往復で壊れる）。

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters escaped in cookie values: everything `encodeURIComponent`
/// escapes (alphanumerics and `- _ . ! ~ * ' ( )` pass through).
const COOKIE_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Find `name` in a `"k=v; k2=v2"` cookie string and return its
/// decoded value.
///
/// Pairs are split on `"; "` and each pair on the first `=`; pairs
/// without an `=` are skipped. A value that fails to decode as UTF-8
/// is returned as-is.
pub fn find_cookie(cookie_str: &str, name: &str) -> Option<String> {
    cookie_str
        .split("; ")
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode_cookie_value(value))
}

/// Percent-encode a value for storage in a cookie.
pub fn encode_cookie_value(value: &str) -> String {
    utf8_percent_encode(value, COOKIE_VALUE).to_string()
}

/// Percent-decode a cookie value; undecodable input is used verbatim.
pub fn decode_cookie_value(value: &str) -> String {
    match percent_decode_str(value).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn finds_cookie_among_many() {
        let raw = "theme=dark; sid=abc123; lang=ja";
        assert_eq!(find_cookie(raw, "sid").as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_cookie_is_none() {
        assert_eq!(find_cookie("theme=dark", "sid"), None);
        assert_eq!(find_cookie("", "sid"), None);
    }

    #[test]
    fn key_match_is_exact() {
        // "sid2" が "sid" にマッチしてはいけない
        let raw = "sid2=wrong; sid=right";
        assert_eq!(find_cookie(raw, "sid").as_deref(), Some("right"));
    }

    #[test]
    fn value_may_contain_equals() {
        // base64 パディングの '=' は値の一部
        let raw = "sid=YWJjZA%3D%3D";
        assert_eq!(find_cookie(raw, "sid").as_deref(), Some("YWJjZA=="));
    }

    #[rstest]
    #[case::plain("abc123", "abc123")]
    #[case::padding("YWJjZA==", "YWJjZA%3D%3D")]
    #[case::plus_slash("a+b/c", "a%2Bb%2Fc")]
    #[case::passthrough("a-b_c.d!e~f*g'h(i)", "a-b_c.d!e~f*g'h(i)")]
    fn encode_matches_encode_uri_component(#[case] raw: &str, #[case] encoded: &str) {
        assert_eq!(encode_cookie_value(raw), encoded);
        assert_eq!(decode_cookie_value(encoded), raw);
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let raw = "garbage; sid=ok";
        assert_eq!(find_cookie(raw, "sid").as_deref(), Some("ok"));
    }
}
