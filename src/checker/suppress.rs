//! Suppression key construction.
//!
//! Every key follows `skip_<check>[_<token>[_<token2>]]` and is matched
//! against the document's `suppresswarnings` set by exact string equality
//! only; there is no prefix, wildcard, or order-independent matching. For
//! pairwise keys the caller passes the tokens in configuration order, which
//! is the canonical order regardless of which side triggered the finding.

/// Key for a check suppressed as a whole.
pub fn rule_key(check: &str) -> String {
    format!("skip_{check}")
}

/// Key for one parameterized instance of a check (a word, tag, or field).
pub fn token_key(check: &str, token: &str) -> String {
    format!("skip_{check}_{token}")
}

/// Canonical key for a configured pair; `first`/`second` as declared in the
/// configuration, never swapped.
pub fn pair_key(check: &str, first: &str, second: &str) -> String {
    format!("skip_{check}_{first}_{second}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::Frontmatter;

    #[test]
    fn key_shapes() {
        assert_eq!(rule_key("fixme"), "skip_fixme");
        assert_eq!(token_key("missing_tags", "postgresql"), "skip_missing_tags_postgresql");
        assert_eq!(
            pair_key("missing_other_tags_both_ways", "icecream", "ice-cream"),
            "skip_missing_other_tags_both_ways_icecream_ice-cream"
        );
    }

    #[test]
    fn membership_is_exact() {
        let doc = "---\nsuppresswarnings:\n  - skip_missing_tags_postgresql\n---\nbody\n";
        let fm = Frontmatter::parse(doc).unwrap();
        assert!(fm.is_suppressed(&token_key("missing_tags", "postgresql")));
        // no prefix matching
        assert!(!fm.is_suppressed(&rule_key("missing_tags")));
        // no superstring matching
        assert!(!fm.is_suppressed(&token_key("missing_tags", "postgres")));
    }
}
