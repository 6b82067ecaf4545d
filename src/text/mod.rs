// Text normalization: turns submission title/body into stems.

pub mod stem;
pub mod traits;

/// True when the text is non-empty and pure ASCII.
///
/// Applied to the raw author-list field; records that fail it are left out
/// of both training and scoring.
pub fn is_ascii_text(text: &str) -> bool {
    !text.is_empty() && text.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_text() {
        assert!(is_ascii_text("alice,bob"));
        assert!(!is_ascii_text(""));
        assert!(!is_ascii_text("zoë,bob"));
    }
}
