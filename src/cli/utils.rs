//! Shared utilities for CLI commands

use tabled::{Table, settings::Style};

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a tags vector for display
pub fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.join(", ")
    }
}

/// Parse comma-separated tags string into vector
pub fn parse_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(|t| t.split(',').map(|s| s.trim().to_string()).collect())
        .unwrap_or_default()
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
    }

    #[test]
    fn test_truncate_long_string_gets_ellipsis() {
        assert_eq!(truncate_with_ellipsis("a very long name", 10), "a very ...");
    }

    #[test]
    fn test_parse_tags_trims_whitespace() {
        assert_eq!(
            parse_tags(Some("a, b ,c")),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(parse_tags(None).is_empty());
    }

    #[test]
    fn test_format_tags() {
        assert_eq!(format_tags(&[]), "-");
        assert_eq!(
            format_tags(&["a".to_string(), "b".to_string()]),
            "a, b"
        );
    }
}
