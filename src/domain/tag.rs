use serde::{Deserialize, Serialize};

pub const TAG_MAX_CHARS: usize = 50;
pub const TAG_SEPARATOR: char = ';';

/// A free-text label attached to a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub text: String,
}

impl Tag {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Parses the raw `;`-separated tag field into a full replacement list.
///
/// Segments are trimmed; empty segments and segments longer than
/// [`TAG_MAX_CHARS`] characters are dropped. Order and duplicates are kept.
pub fn parse_tags(raw: &str) -> Vec<Tag> {
    raw.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|segment| {
            let len = segment.chars().count();
            len > 0 && len <= TAG_MAX_CHARS
        })
        .map(Tag::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_empty_and_oversized_segments() {
        let raw = format!("a; b ;;{}", "x".repeat(51));
        assert_eq!(parse_tags(&raw), vec![Tag::new("a"), Tag::new("b")]);
    }

    #[test]
    fn keeps_boundary_length_and_duplicates() {
        let fifty = "y".repeat(50);
        let raw = format!("dup;{fifty}; dup");
        assert_eq!(
            parse_tags(&raw),
            vec![Tag::new("dup"), Tag::new(fifty), Tag::new("dup")]
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        let wide = "ж".repeat(50);
        assert_eq!(parse_tags(&wide), vec![Tag::new(wide.clone())]);
    }

    #[test]
    fn empty_input_yields_no_tags() {
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" ; ;").is_empty());
    }
}
