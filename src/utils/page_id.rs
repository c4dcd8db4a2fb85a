/// Longest page id accepted in `/magic/{id}`.
const PAGE_ID_MAX_LENGTH: usize = 64;

/// Validate a page id: 1-64 characters of `[A-Za-z0-9_.-]`.
#[must_use]
pub fn is_valid_page_id(id: &str) -> bool {
    (1..=PAGE_ID_MAX_LENGTH).contains(&id.len())
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_page_id() {
        assert!(is_valid_page_id("hello"));
        assert!(is_valid_page_id("github-profile_v2.1"));
        assert!(is_valid_page_id(&"a".repeat(64)));
        assert!(!is_valid_page_id("")); // empty
        assert!(!is_valid_page_id(&"a".repeat(65))); // too long
        assert!(!is_valid_page_id("a b")); // space
        assert!(!is_valid_page_id("a#b")); // key separator
        assert!(!is_valid_page_id("ünï")); // non-ascii
    }
}
