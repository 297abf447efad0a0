// file: src/agent/router.rs
// description: lexical routing decision over the model's yes/no reply

/// True when the decision text contains "yes" after trimming and
/// lowercasing. Deliberately a substring test, not equality: models often
/// reply with "Yes." or a full sentence, and any "yes" anywhere counts as
/// affirmative ("maybe yes maybe no" routes to search).
pub fn needs_search(decision: &str) -> bool {
    decision.trim().to_lowercase().contains("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_yes_variants_are_affirmative() {
        assert!(needs_search("yes"));
        assert!(needs_search("Yes."));
        assert!(needs_search("YES!"));
        assert!(needs_search("  yes  \n"));
    }

    #[test]
    fn test_no_is_negative() {
        assert!(!needs_search("no"));
        assert!(!needs_search("No."));
        assert!(!needs_search(""));
    }

    #[test]
    fn test_substring_rule_is_tolerant() {
        assert!(needs_search("maybe yes maybe no"));
        assert!(needs_search("I would say yes, a search helps here."));
    }

    #[test]
    fn test_unrelated_text_is_negative() {
        assert!(!needs_search("I cannot answer that."));
    }
}
