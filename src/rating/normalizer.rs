use std::collections::HashMap;

use super::types::RatingCategory;

/// Regional certificate tokens (already trimmed and uppercased) and the category each maps to.
///
/// The canonical category names are listed too, so normalizing a normalized value is a no-op.
pub const RATING_TABLE: &[(&str, RatingCategory)] = &[
    ("G", RatingCategory::G),
    ("U", RatingCategory::G),
    ("PG", RatingCategory::PG),
    ("U/A", RatingCategory::PG),
    ("PG-13", RatingCategory::PG13),
    ("PG13", RatingCategory::PG13),
    ("12", RatingCategory::PG13),
    ("12A", RatingCategory::PG13),
    ("15", RatingCategory::R),
    ("18", RatingCategory::R),
    ("R", RatingCategory::R),
    ("A", RatingCategory::R),
    ("NC-17", RatingCategory::NC17),
    ("NC17", RatingCategory::NC17),
    ("N/A", RatingCategory::AllAges),
    ("", RatingCategory::AllAges),
    ("ALL AGES", RatingCategory::AllAges),
];

/// Maps raw rating strings onto [`RatingCategory`].
///
/// Built once and shared by reference; lookups never fail; anything unknown is `AllAges`.
#[derive(Debug, Clone)]
pub struct RatingNormalizer {
    table: HashMap<&'static str, RatingCategory>,
}

impl RatingNormalizer {
    pub fn new() -> Self {
        Self::from_table(RATING_TABLE)
    }

    pub fn from_table(entries: &[(&'static str, RatingCategory)]) -> Self {
        Self {
            table: entries.iter().copied().collect(),
        }
    }

    pub fn normalize(&self, raw: Option<&str>) -> RatingCategory {
        raw.map(clean_token)
            .and_then(|token| self.table.get(token.as_str()).copied())
            .unwrap_or_default()
    }
}

impl Default for RatingNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn clean_token(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace_are_ignored() {
        let normalizer = RatingNormalizer::new();

        assert_eq!(normalizer.normalize(Some(" pg-13 ")), RatingCategory::PG13);
        assert_eq!(normalizer.normalize(Some("PG-13")), RatingCategory::PG13);
        assert_eq!(normalizer.normalize(Some("\tnc-17\n")), RatingCategory::NC17);
        assert_eq!(normalizer.normalize(Some("u/a")), RatingCategory::PG);
    }

    #[test]
    fn test_regional_tokens() {
        let normalizer = RatingNormalizer::new();
        let cases = [
            ("G", RatingCategory::G),
            ("U", RatingCategory::G),
            ("PG", RatingCategory::PG),
            ("12", RatingCategory::PG13),
            ("12a", RatingCategory::PG13),
            ("15", RatingCategory::R),
            ("18", RatingCategory::R),
            ("R", RatingCategory::R),
            ("A", RatingCategory::R),
        ];

        for (raw, expected) in cases {
            assert_eq!(normalizer.normalize(Some(raw)), expected, "rating {raw:?}");
        }
    }

    #[test]
    fn test_unknown_input_falls_back_to_all_ages() {
        let normalizer = RatingNormalizer::new();

        assert_eq!(normalizer.normalize(None), RatingCategory::AllAges);
        assert_eq!(normalizer.normalize(Some("")), RatingCategory::AllAges);
        assert_eq!(normalizer.normalize(Some("   ")), RatingCategory::AllAges);
        assert_eq!(normalizer.normalize(Some("N/A")), RatingCategory::AllAges);
        assert_eq!(normalizer.normalize(Some("xyz")), RatingCategory::AllAges);
        assert_eq!(normalizer.normalize(Some("TV-MA")), RatingCategory::AllAges);
    }

    #[test]
    fn test_renormalizing_canonical_output_is_stable() {
        let normalizer = RatingNormalizer::new();

        for category in RatingCategory::ALL {
            assert_eq!(normalizer.normalize(Some(category.as_str())), category);
        }
    }

    #[test]
    fn test_injected_table_replaces_defaults() {
        let normalizer = RatingNormalizer::from_table(&[("TV-MA", RatingCategory::R)]);

        assert_eq!(normalizer.normalize(Some("tv-ma")), RatingCategory::R);
        assert_eq!(normalizer.normalize(Some("G")), RatingCategory::AllAges);
    }
}
