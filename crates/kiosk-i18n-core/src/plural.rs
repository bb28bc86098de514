//! Plural categories and the per-language rules that select them.
//!
//! Dictionary keys carry the category as a suffix: `items_one`, `items_few`,
//! `items_many`, `items_other`.

use crate::language::Language;
use strum::{Display, EnumIter, IntoStaticStr};

#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, IntoStaticStr, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum PluralCategory {
    One,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The dictionary key for `base` in this category, e.g. `items_few`.
    pub fn key_for(self, base: &str) -> String {
        format!("{}_{}", base, self.as_str())
    }
}

/// Returns the plural category of `count` for `lang`.
///
/// The absolute value is used. Russian follows the one/few/many/other rule
/// on the last digit and last two digits; Azerbaijani and English only
/// distinguish exactly one from everything else. Non-finite counts are
/// always `Other`.
pub fn plural_category(lang: Language, count: f64) -> PluralCategory {
    let n = count.abs();
    match lang {
        Language::Ru => {
            let mod10 = n % 10.0;
            let mod100 = n % 100.0;
            if mod10 == 1.0 && mod100 != 11.0 {
                PluralCategory::One
            } else if (2.0..=4.0).contains(&mod10) && !(12.0..=14.0).contains(&mod100) {
                PluralCategory::Few
            } else if mod10 == 0.0
                || (5.0..=9.0).contains(&mod10)
                || (11.0..=14.0).contains(&mod100)
            {
                PluralCategory::Many
            } else {
                PluralCategory::Other
            }
        },
        Language::Az | Language::En => {
            if n == 1.0 {
                PluralCategory::One
            } else {
                PluralCategory::Other
            }
        },
    }
}

/// Strips a plural suffix from `key`, if it has one.
///
/// `items_few` becomes `Some(("items", Few))`.
pub fn split_plural_key(key: &str) -> Option<(&str, PluralCategory)> {
    use strum::IntoEnumIterator as _;

    PluralCategory::iter().find_map(|category| {
        key.strip_suffix(category.as_str())
            .and_then(|rest| rest.strip_suffix('_'))
            .filter(|base| !base.is_empty())
            .map(|base| (base, category))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1.0, PluralCategory::One)]
    #[case(2.0, PluralCategory::Few)]
    #[case(5.0, PluralCategory::Many)]
    #[case(11.0, PluralCategory::Many)]
    #[case(12.0, PluralCategory::Many)]
    #[case(21.0, PluralCategory::One)]
    #[case(22.0, PluralCategory::Few)]
    #[case(100.0, PluralCategory::Many)]
    #[case(101.0, PluralCategory::One)]
    #[case(111.0, PluralCategory::Many)]
    #[case(0.0, PluralCategory::Many)]
    #[case(-3.0, PluralCategory::Few)]
    #[case(1.5, PluralCategory::Other)]
    fn russian_rule(#[case] count: f64, #[case] expected: PluralCategory) {
        assert_eq!(plural_category(Language::Ru, count), expected);
    }

    #[rstest]
    #[case(Language::Az)]
    #[case(Language::En)]
    fn one_or_other_rule(#[case] lang: Language) {
        assert_eq!(plural_category(lang, 1.0), PluralCategory::One);
        assert_eq!(plural_category(lang, -1.0), PluralCategory::One);
        assert_eq!(plural_category(lang, 0.0), PluralCategory::Other);
        assert_eq!(plural_category(lang, 2.0), PluralCategory::Other);
        assert_eq!(plural_category(lang, 21.0), PluralCategory::Other);
    }

    #[test]
    fn non_finite_counts_are_other() {
        for lang in Language::ALL {
            assert_eq!(plural_category(lang, f64::NAN), PluralCategory::Other);
            assert_eq!(plural_category(lang, f64::INFINITY), PluralCategory::Other);
        }
    }

    #[test]
    fn key_for_appends_suffix() {
        assert_eq!(PluralCategory::Few.key_for("items"), "items_few");
    }

    #[rstest]
    #[case("items_one", Some(("items", PluralCategory::One)))]
    #[case("cart.items_many", Some(("cart.items", PluralCategory::Many)))]
    #[case("items", None)]
    #[case("_other", None)]
    #[case("someone", None)]
    fn split_plural_keys(#[case] key: &str, #[case] expected: Option<(&str, PluralCategory)>) {
        assert_eq!(split_plural_key(key), expected);
    }
}
