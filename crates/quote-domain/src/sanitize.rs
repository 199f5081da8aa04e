//! # Sanitisation and Field Checks
//!
//! Text helpers shared by the client-side and server-side validators:
//! HTML tag stripping, email and phone format checks, and the two message
//! builders every whole-form validator uses.

use std::sync::OnceLock;

use regex::Regex;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Strip every `<...>` tag, then trim surrounding whitespace.
///
/// An unclosed `<` is left in place.
pub fn sanitize_html(input: &str) -> String {
    tag_regex().replace_all(input, "").trim().to_string()
}

/// Sanitise an optional field: blank input stays blank.
pub fn sanitize_optional(input: &str) -> String {
    if input.is_empty() {
        String::new()
    } else {
        sanitize_html(input)
    }
}

/// Whether `email` looks like `local@domain.tld` once trimmed.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

/// Whether `phone` holds 10 to 15 digits, ignoring every other character.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (10..=15).contains(&digits)
}

/// `"{label} is required"` when `value` is blank after trimming.
pub fn validate_required(value: &str, label: &str) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| format!("{label} is required"))
}

/// `"{label} must be {max} characters or less"` when `value` is longer
/// than `max` characters.
pub fn validate_length(value: &str, max: usize, label: &str) -> Option<String> {
    (value.chars().count() > max).then(|| format!("{label} must be {max} characters or less"))
}

/// Escape text for interpolation into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_trims() {
        assert_eq!(sanitize_html("  <b>Alice</b> "), "Alice");
        assert_eq!(sanitize_html("<script>alert(1)</script>Hi"), "alert(1)Hi");
        assert_eq!(sanitize_html("a < b"), "a < b");
    }

    #[test]
    fn optional_blank_stays_blank() {
        assert_eq!(sanitize_optional(""), "");
        assert_eq!(sanitize_optional(" <i>x</i>"), "x");
    }

    #[test]
    fn email_format() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("  alice@example.com  "));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("alice example@x.com"));
        assert!(!is_valid_email("@x.com"));
    }

    #[test]
    fn phone_digit_count() {
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("+44 20 7946 0958"));
        assert!(!is_valid_phone("555-1234"));
        assert!(!is_valid_phone("1234567890123456"));
    }

    #[test]
    fn required_and_length_messages() {
        assert_eq!(validate_required("  ", "Name"), Some("Name is required".into()));
        assert_eq!(validate_required("Al", "Name"), None);
        assert_eq!(
            validate_length(&"x".repeat(51), 50, "Name"),
            Some("Name must be 50 characters or less".into())
        );
        assert_eq!(validate_length(&"x".repeat(50), 50, "Name"), None);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & Jerry's</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }
}
