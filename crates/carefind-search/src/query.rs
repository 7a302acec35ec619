/// Queries shorter than this (after trimming) match nothing.
pub const MIN_QUERY_CHARS: usize = 2;

/// Trim and lowercase `raw`; `None` when too short to search.
pub(crate) fn normalize(raw: &str) -> Option<String> {
    let normalized = raw.trim().to_lowercase();
    (normalized.chars().count() >= MIN_QUERY_CHARS).then_some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize("  MumBAI ").as_deref(), Some("mumbai"));
    }

    #[test]
    fn short_queries_are_rejected() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize(" v "), None);
        assert_eq!(normalize("é"), None);
        assert_eq!(normalize("va").as_deref(), Some("va"));
    }
}
