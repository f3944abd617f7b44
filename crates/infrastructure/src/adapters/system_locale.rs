//! System locale adapter
//!
//! Reads the process environment (`LC_ALL`, then `LANG`) and normalizes the
//! POSIX spelling (`en_GB.UTF-8`) to the BCP 47 form the resolver matches
//! against (`en-GB`).

use paperwall_application::ports::LocaleSource;

/// Locale source backed by the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocaleSource;

impl SystemLocaleSource {
    /// Creates a new system locale source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Normalizes a POSIX locale string; `C` and `POSIX` carry no region
/// information and normalize to `None`.
fn normalize(raw: &str) -> Option<String> {
    let without_encoding = raw.split(['.', '@']).next().unwrap_or(raw);
    if without_encoding.is_empty()
        || without_encoding.eq_ignore_ascii_case("C")
        || without_encoding.eq_ignore_ascii_case("POSIX")
    {
        return None;
    }
    Some(without_encoding.replace('_', "-"))
}

impl LocaleSource for SystemLocaleSource {
    fn locale(&self) -> Option<String> {
        ["LC_ALL", "LANG"]
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .as_deref()
            .and_then(normalize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_posix_spelling() {
        assert_eq!(normalize("en_GB.UTF-8"), Some("en-GB".to_string()));
        assert_eq!(normalize("zh_CN"), Some("zh-CN".to_string()));
        assert_eq!(normalize("de_DE@euro"), Some("de-DE".to_string()));
    }

    #[test]
    fn test_normalize_rejects_no_region_locales() {
        assert_eq!(normalize("C"), None);
        assert_eq!(normalize("C.UTF-8"), None);
        assert_eq!(normalize("POSIX"), None);
        assert_eq!(normalize(""), None);
    }
}
