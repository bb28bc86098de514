use crate::language::Language;
use fluent_fallback::env::LocalesProvider;
use unic_langid::LanguageIdentifier;

/// Candidate identifiers for a runtime locale, most specific first.
///
/// A host locale such as `ru-RU` or `az-Latn-AZ` never names a supported
/// language exactly, so the bare language subtag (`ru`, `az`) follows it.
/// [`language_from_locale`] takes the first candidate that parses as a
/// [`Language`].
pub fn fallback_locales(locale: &LanguageIdentifier) -> impl LocalesProvider {
    let mut candidates = vec![locale.clone()];

    let is_qualified =
        locale.script.is_some() || locale.region.is_some() || locale.variants().next().is_some();

    if is_qualified && let Ok(bare) = locale.language.as_str().parse::<LanguageIdentifier>() {
        candidates.push(bare);
    }

    candidates
}

/// Maps a runtime locale tag to a supported language.
///
/// Accepts BCP 47 tags (`ru-RU`) as well as POSIX locale names
/// (`ru_RU.UTF-8`, `az_AZ@latin`). Returns `None` for `C`, `POSIX`, empty
/// strings and unsupported languages.
pub fn language_from_locale(tag: &str) -> Option<Language> {
    let normalized = normalize_locale_tag(tag);
    if normalized.is_empty() {
        return None;
    }

    let requested = normalized.parse::<LanguageIdentifier>().ok()?;

    fallback_locales(&requested)
        .locales()
        .find_map(|candidate| Language::parse(&candidate.to_string()))
}

/// Picks the locale the host process runs under, from the usual POSIX
/// environment variables in priority order.
pub fn system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
}

fn normalize_locale_tag(tag: &str) -> String {
    let tag = tag.trim();
    let tag = tag.split(['.', '@']).next().unwrap_or_default();
    tag.replace('_', "-")
}
