//! Text utilities for TSPL quoted strings
//!
//! TSPL string arguments are wrapped in double quotes and have no escape
//! sequence, so text must be sanitised before it is embedded. This module
//! provides:
//! - Character-based truncation
//! - Quote/backslash sanitising
//! - Converting the finished script to the printer's code page

use encoding_rs::Encoding;
use tracing::{instrument, warn};

/// Keep at most `max_chars` characters from the start of `s`
///
/// Counts Unicode scalar values, never splits a character and adds no ellipsis.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Make text safe inside a TSPL quoted string
///
/// Double quotes become single quotes, backslashes are dropped.
pub fn escape_quoted(s: &str) -> String {
    s.chars()
        .filter(|&c| c != '\\')
        .map(|c| if c == '"' { '\'' } else { c })
        .collect()
}

/// Encode a script for a printer code page
///
/// `label` is a WHATWG encoding label (`"utf-8"`, `"windows-1252"`, `"gbk"`...).
/// Unknown labels fall back to UTF-8. Characters the code page cannot
/// represent are replaced with `?`, since the numeric character references
/// `encoding_rs` would produce are meaningless to the printer.
#[instrument(skip(script), fields(len = script.len()))]
pub fn encode_for_codepage(script: &str, label: &str) -> Vec<u8> {
    let encoding = match Encoding::for_label(label.trim().as_bytes()) {
        Some(e) => e,
        None => {
            warn!(codepage = label, "Unknown code page, falling back to UTF-8");
            encoding_rs::UTF_8
        }
    };

    if encoding == encoding_rs::UTF_8 || script.is_ascii() {
        return script.as_bytes().to_vec();
    }

    let mut result = Vec::with_capacity(script.len());
    let mut replaced = 0usize;
    let mut tmp = [0u8; 4];
    for c in script.chars() {
        if c.is_ascii() {
            result.push(c as u8);
            continue;
        }
        let (cow, _, had_errors) = encoding.encode(c.encode_utf8(&mut tmp));
        if had_errors {
            result.push(b'?');
            replaced += 1;
        } else {
            result.extend_from_slice(&cow);
        }
    }

    if replaced > 0 {
        warn!(
            codepage = encoding.name(),
            replaced, "Characters not representable in code page"
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Widget Alpha Deluxe", 14), "Widget Alpha D");
        assert_eq!(truncate_chars("short", 14), "short");
        assert_eq!(truncate_chars("ñandú grande", 5), "ñandú");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_escape_quoted() {
        assert_eq!(escape_quoted(r#"He said "hi"\now"#), "He said 'hi'now");
        assert_eq!(escape_quoted("plain"), "plain");
        assert_eq!(escape_quoted(r"\\"), "");
    }

    #[test]
    fn test_encode_utf8_passthrough() {
        assert_eq!(encode_for_codepage("café", "utf-8"), "café".as_bytes());
        assert_eq!(encode_for_codepage("café", "no-such-codepage"), "café".as_bytes());
    }

    #[test]
    fn test_encode_windows_1252() {
        assert_eq!(encode_for_codepage("café", "windows-1252"), b"caf\xE9");
    }

    #[test]
    fn test_encode_unmappable_becomes_question_mark() {
        assert_eq!(encode_for_codepage("a你b", "windows-1252"), b"a?b");
    }
}
