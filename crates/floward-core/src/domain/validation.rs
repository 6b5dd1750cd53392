use std::sync::LazyLock;

use regex::Regex;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Valid email regex"));

/// `local@domain.tld` without whitespace. Not a full address check.
pub fn is_email_shaped(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}
