//! Region codes and the built-in supported set

use serde::{Deserialize, Serialize};

/// A selectable content region: a language-region code plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Locale identifier, e.g. `zh-CN`.
    pub value: String,
    /// Human-readable label.
    pub label: String,
}

impl Region {
    /// Creates a region entry.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The language subtag, i.e. the portion before the region separator.
    #[must_use]
    pub fn language(&self) -> &str {
        self.value.split('-').next().unwrap_or(&self.value)
    }
}

/// The region code used when nothing else matches.
pub const DEFAULT_REGION: &str = "zh-CN";

/// The built-in supported-region set, used until a backend-provided list
/// replaces it.
#[must_use]
pub fn default_regions() -> Vec<Region> {
    [
        ("zh-CN", "China (zh-CN)"),
        ("en-US", "United States (en-US)"),
        ("ja-JP", "Japan (ja-JP)"),
        ("en-AU", "Australia (en-AU)"),
        ("en-GB", "United Kingdom (en-GB)"),
        ("de-DE", "Germany (de-DE)"),
        ("en-NZ", "New Zealand (en-NZ)"),
        ("en-CA", "Canada (en-CA)"),
        ("fr-FR", "France (fr-FR)"),
        ("it-IT", "Italy (it-IT)"),
        ("es-ES", "Spain (es-ES)"),
        ("pt-BR", "Brazil (pt-BR)"),
        ("ko-KR", "South Korea (ko-KR)"),
        ("en-IN", "India (en-IN)"),
        ("ru-RU", "Russia (ru-RU)"),
        ("zh-HK", "Hong Kong (zh-HK)"),
        ("zh-TW", "Taiwan (zh-TW)"),
    ]
    .into_iter()
    .map(|(value, label)| Region::new(value, label))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_language_subtag() {
        assert_eq!(Region::new("en-GB", "UK").language(), "en");
        assert_eq!(Region::new("zh-CN", "CN").language(), "zh");
    }

    #[test]
    fn test_default_set_contains_default_region() {
        let regions = default_regions();
        assert!(regions.iter().any(|r| r.value == DEFAULT_REGION));
        assert_eq!(regions.len(), 17);
    }
}
