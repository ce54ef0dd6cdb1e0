// crates/aplatam-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// Transliterates Unicode to ASCII with `deunicode` and lowercases the result,
/// so `"São Paulo"` and `"sao paulo"` fold to the same key.
///
/// ```rust
/// use aplatam_core::text::fold_key;
///
/// assert_eq!(fold_key("Córdoba"), "cordoba");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Equality after folding both sides with [`fold_key`].
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents_and_case() {
        assert_eq!(fold_key("SÃO PAULO"), "sao paulo");
        assert!(equals_folded("Perú", "peru"));
        assert!(!equals_folded("Lima", "La Paz"));
    }
}
