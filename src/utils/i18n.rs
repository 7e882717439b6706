use tracing::warn;

/// Locales shipped under `locales/`
pub const SUPPORTED_LOCALES: [&str; 2] = ["nl", "en"];

/// Switch the locale used by notices and table headers.
///
/// Unknown locales fall back to English. Returns the locale actually applied.
pub fn set_locale(locale: &str) -> &'static str {
    let requested = locale.trim().to_lowercase();
    let applied = SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|supported| requested == *supported || requested.starts_with(&format!("{}-", supported)))
        .unwrap_or_else(|| {
            warn!("Unsupported locale {}, falling back to en", locale);
            "en"
        });
    rust_i18n::set_locale(applied);
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_suffix_maps_to_language() {
        assert_eq!(set_locale("nl-NL"), "nl");
        assert_eq!(set_locale("EN"), "en");
        assert_eq!(set_locale("tr"), "en");
    }
}
