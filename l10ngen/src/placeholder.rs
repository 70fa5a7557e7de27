//! Placeholder parsing and identifier derivation utilities.
//!
//! A placeholder is a `{name}` token inside a translation, where `name` is one
//! or more ASCII word characters. Both generators share these helpers so that
//! the ARB `placeholders` map and the TypeScript accessor parameters always
//! agree.

use heck::ToLowerCamelCase;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap();
}

/// Returns the distinct placeholder names of `input` in first-seen order.
///
/// `"{a}{b}{a}"` yields `["a", "b"]`. Braces around anything other than word
/// characters (`{ a }`, `{a-b}`, `{}`) are plain text.
pub fn extract_placeholders(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for captures in PLACEHOLDER_REGEX.captures_iter(input) {
        let name = &captures[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Derives the exported accessor name for a key (`error_count` → `errorCount`).
pub fn accessor_name(key: &str) -> String {
    key.to_lower_camel_case()
}

/// Removes every whitespace character, used for one-line doc comments.
///
/// Whitespace here is the ECMAScript `\s` class: Unicode `White_Space` minus
/// U+0085, plus U+FEFF.
pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|&c| !is_js_whitespace(c)).collect()
}

fn is_js_whitespace(c: char) -> bool {
    match c {
        '\u{0085}' => false,
        '\u{FEFF}' => true,
        _ => c.is_whitespace(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_in_occurrence_order() {
        assert_eq!(
            extract_placeholders("{count} errors in {file}"),
            vec!["count", "file"]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(extract_placeholders("{a}{b}{a}"), vec!["a", "b"]);
    }

    #[test]
    fn test_no_placeholders() {
        assert!(extract_placeholders("Hello").is_empty());
        assert!(extract_placeholders("").is_empty());
    }

    #[test]
    fn test_ignores_non_word_braces() {
        assert!(extract_placeholders("{} { name } {a-b} {名前}").is_empty());
        assert_eq!(extract_placeholders("{{name}}"), vec!["name"]);
    }

    #[test]
    fn test_placeholders_inside_non_ascii_text() {
        assert_eq!(extract_placeholders("ようこそ{name}さん"), vec!["name"]);
        assert_eq!(extract_placeholders("{count}件のエラー"), vec!["count"]);
    }

    #[test]
    fn test_accessor_name() {
        assert_eq!(accessor_name("error_count"), "errorCount");
        assert_eq!(accessor_name("welcome"), "welcome");
        assert_eq!(accessor_name("user_profile_title"), "userProfileTitle");
        assert_eq!(accessor_name("already_camelCase"), "alreadyCamelCase");
    }

    #[test]
    fn test_strip_whitespace() {
        assert_eq!(strip_whitespace(" Welcome {name}\n"), "Welcome{name}");
        assert_eq!(strip_whitespace("ようこそ、{name}さん"), "ようこそ、{name}さん");
    }

    #[test]
    fn test_strip_whitespace_edge_characters() {
        assert_eq!(strip_whitespace("a\u{FEFF}b"), "ab");
        assert_eq!(strip_whitespace("a\u{0085}b"), "a\u{0085}b");
        assert_eq!(strip_whitespace("a\u{3000}b\u{00A0}c\u{2028}d"), "abcd");
    }
}
