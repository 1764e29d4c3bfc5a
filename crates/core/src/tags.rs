//! Tag name and color rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length of a tag name.
pub const MAX_TAG_NAME_LENGTH: usize = 50;

/// Color used when a tag is created without one.
pub const DEFAULT_TAG_COLOR: &str = "#6B7280";

/// Regex pattern for a `#RRGGBB` color.
pub const COLOR_PATTERN: &str = r"^#[0-9A-Fa-f]{6}$";

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COLOR_PATTERN).expect("valid regex"));

/// Trim a tag name and check it is non-empty and within length.
pub fn normalize_tag_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Tag name cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_TAG_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Tag name exceeds maximum length of {MAX_TAG_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a `#RRGGBB` color and return it upper-cased.
pub fn normalize_color(color: &str) -> Result<String, CoreError> {
    let trimmed = color.trim();
    if COLOR_RE.is_match(trimmed) {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Expected a hex color like #1E90FF"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_is_trimmed() {
        assert_eq!(normalize_tag_name("  robotics ").unwrap(), "robotics");
    }

    #[test]
    fn blank_and_long_names_rejected() {
        assert!(normalize_tag_name("   ").is_err());
        assert!(normalize_tag_name(&"x".repeat(MAX_TAG_NAME_LENGTH + 1)).is_err());
        assert!(normalize_tag_name(&"x".repeat(MAX_TAG_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn color_accepts_hex_and_uppercases() {
        assert_eq!(normalize_color("#1e90ff").unwrap(), "#1E90FF");
        assert!(normalize_color(DEFAULT_TAG_COLOR).is_ok());
    }

    #[test]
    fn color_rejects_other_forms() {
        assert!(normalize_color("1E90FF").is_err());
        assert!(normalize_color("#FFF").is_err());
        assert!(normalize_color("#GGGGGG").is_err());
        assert!(normalize_color("red").is_err());
    }
}
