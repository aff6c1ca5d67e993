use unicode_normalization::UnicodeNormalization;

/// Normalize free text into a URL-safe slug.
///
/// Decomposes (NFKD) so accented letters keep their base letter, lower-cases,
/// drops anything that is not an ASCII letter, digit, `_`, `-` or whitespace,
/// folds each run of whitespace and hyphens into one `-`, then trims leading
/// and trailing `-` and `_`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for c in value.nfkd().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c);
        }
    }
    if pending_hyphen {
        slug.push('-');
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Acme Corp"), "acme-corp");
        assert_eq!(slugify("  Acme   -- Corp  "), "acme-corp");
    }

    #[test]
    fn drops_punctuation() {
        assert_eq!(slugify("Acme, Inc."), "acme-inc");
    }

    #[test]
    fn accents_fold_to_base_letters() {
        assert_eq!(slugify("Café Zürich"), "cafe-zurich");
        assert_eq!(slugify("Ångström Øresund"), "angstrom-resund");
        assert_ne!(slugify("Café Zürich"), slugify("Caf Zrich"));
    }

    #[test]
    fn compatibility_forms_are_folded() {
        // Fullwidth letters and the "ﬁ" ligature decompose to plain ASCII
        assert_eq!(slugify("ＡＣＭＥ ﬁnance"), "acme-finance");
    }

    #[test]
    fn scripts_without_decomposition_are_dropped() {
        assert_eq!(slugify("東京 Office"), "office");
    }

    #[test]
    fn strips_edge_underscores_keeps_inner() {
        assert_eq!(slugify("__tiny_team__"), "tiny_team");
    }

    #[test]
    fn all_punctuation_becomes_empty() {
        assert_eq!(slugify("!!!"), "");
    }
}
