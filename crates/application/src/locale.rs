//! Region resolution
//!
//! Resolves the effective content region from, in order: an explicit
//! override, the persisted preference, the environment locale (exact then
//! language-prefix match), and finally a fixed default. The supported set is
//! replaceable at runtime and is always read at call time.

use tokio::sync::RwLock;
use tracing::warn;

use paperwall_domain::{DEFAULT_REGION, Region, default_regions};

use crate::ports::{KeyValueStore, LocaleSource, StorageError};

/// Storage key of the selected region code.
pub const SELECTED_REGION_KEY: &str = "selected_mkt";

/// The process-wide region registry and resolver.
pub struct RegionRegistry<S, L> {
    storage: S,
    locale_source: L,
    regions: RwLock<Vec<Region>>,
}

impl<S, L> RegionRegistry<S, L>
where
    S: KeyValueStore,
    L: LocaleSource,
{
    /// Creates a registry seeded with the built-in region set.
    pub fn new(storage: S, locale_source: L) -> Self {
        Self {
            storage,
            locale_source,
            regions: RwLock::new(default_regions()),
        }
    }

    /// The currently supported regions.
    pub async fn supported(&self) -> Vec<Region> {
        self.regions.read().await.clone()
    }

    /// Replaces the supported set, e.g. with a backend-provided list.
    ///
    /// An empty replacement is ignored; resolution must always have a set to
    /// fall through.
    pub async fn set_supported_regions(&self, regions: Vec<Region>) {
        if regions.is_empty() {
            warn!("ignoring empty supported-region list");
            return;
        }
        *self.regions.write().await = regions;
    }

    /// Persists an explicit region selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be stored.
    pub async fn set_preference(&self, mkt: &str) -> Result<(), StorageError> {
        self.storage.set(SELECTED_REGION_KEY, mkt).await
    }

    /// Resolves the effective region code.
    ///
    /// Never returns a code outside the current supported set: candidates
    /// that fail the membership check fall through to the next source, and
    /// the chain ends in the fixed default.
    pub async fn resolve(&self, explicit: Option<&str>) -> String {
        let regions = self.regions.read().await.clone();

        if let Some(code) = explicit
            && let Some(region) = Self::exact_match(&regions, code)
        {
            return region.value.clone();
        }

        match self.storage.get(SELECTED_REGION_KEY).await {
            Ok(Some(saved)) => {
                if let Some(region) = regions.iter().find(|r| r.value == saved) {
                    return region.value.clone();
                }
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "failed to read region preference"),
        }

        if let Some(locale) = self.locale_source.locale() {
            if let Some(region) = Self::exact_match(&regions, &locale) {
                return region.value.clone();
            }
            if let Some(region) = Self::prefix_match(&regions, &locale) {
                return region.value.clone();
            }
        }

        DEFAULT_REGION.to_string()
    }

    fn exact_match<'a>(regions: &'a [Region], code: &str) -> Option<&'a Region> {
        regions.iter().find(|r| r.value.eq_ignore_ascii_case(code))
    }

    fn prefix_match<'a>(regions: &'a [Region], locale: &str) -> Option<&'a Region> {
        let language = locale.split('-').next().unwrap_or(locale);
        regions
            .iter()
            .find(|r| r.language().eq_ignore_ascii_case(language))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{FakeLocaleSource, FakeStorage};
    use pretty_assertions::assert_eq;

    fn registry(
        storage: FakeStorage,
        locale: Option<&str>,
    ) -> RegionRegistry<FakeStorage, FakeLocaleSource> {
        RegionRegistry::new(storage, FakeLocaleSource::new(locale))
    }

    fn registry_over(storage: FakeStorage) -> RegionRegistry<FakeStorage, FakeLocaleSource> {
        registry(storage, None)
    }

    #[tokio::test]
    async fn test_explicit_override_wins() {
        let registry = registry(FakeStorage::new(), Some("en-US"));
        assert_eq!(registry.resolve(Some("ja-JP")).await, "ja-JP");
    }

    #[tokio::test]
    async fn test_unsupported_override_falls_through() {
        let registry = registry(FakeStorage::new(), Some("en-GB"));
        assert_eq!(registry.resolve(Some("xx-XX")).await, "en-GB");
    }

    #[tokio::test]
    async fn test_persisted_preference() {
        let storage = FakeStorage::new();
        storage.set(SELECTED_REGION_KEY, "fr-FR").await.unwrap();
        let registry = registry(storage, Some("en-US"));
        assert_eq!(registry.resolve(None).await, "fr-FR");
    }

    #[tokio::test]
    async fn test_set_preference_persists_selection() {
        let storage = FakeStorage::new();
        let registry = registry(storage.clone(), Some("en-US"));

        registry.set_preference("ja-JP").await.unwrap();
        assert_eq!(registry.resolve(None).await, "ja-JP");

        // A fresh registry over the same storage sees the selection.
        let reopened = registry_over(storage);
        assert_eq!(reopened.resolve(None).await, "ja-JP");
    }

    #[tokio::test]
    async fn test_stale_preference_falls_through() {
        let storage = FakeStorage::new();
        storage.set(SELECTED_REGION_KEY, "xx-XX").await.unwrap();
        let registry = registry(storage, Some("en-US"));
        assert_eq!(registry.resolve(None).await, "en-US");
    }

    #[tokio::test]
    async fn test_exact_locale_match_is_case_insensitive() {
        let registry = registry(FakeStorage::new(), Some("EN-gb"));
        assert_eq!(registry.resolve(None).await, "en-GB");
    }

    #[tokio::test]
    async fn test_prefix_match_picks_first_in_set_order() {
        // en-GB is removed from the set; en-US is the first en-* entry.
        let registry = registry(FakeStorage::new(), Some("en-GB"));
        registry
            .set_supported_regions(vec![
                Region::new("zh-CN", "China"),
                Region::new("en-US", "United States"),
                Region::new("en-AU", "Australia"),
            ])
            .await;
        assert_eq!(registry.resolve(None).await, "en-US");
    }

    #[tokio::test]
    async fn test_no_match_yields_default() {
        let reg = registry(FakeStorage::new(), Some("sv-SE"));
        assert_eq!(reg.resolve(None).await, DEFAULT_REGION);

        let reg = registry(FakeStorage::new(), None);
        assert_eq!(reg.resolve(None).await, DEFAULT_REGION);
    }

    #[tokio::test]
    async fn test_resolution_uses_current_set() {
        let registry = registry(FakeStorage::new(), Some("ja-JP"));
        assert_eq!(registry.resolve(None).await, "ja-JP");

        registry
            .set_supported_regions(vec![Region::new("en-US", "United States")])
            .await;
        assert_eq!(registry.resolve(None).await, DEFAULT_REGION);
    }

    #[tokio::test]
    async fn test_empty_replacement_is_ignored() {
        let registry = registry(FakeStorage::new(), None);
        registry.set_supported_regions(vec![]).await;
        assert_eq!(registry.supported().await.len(), 17);
    }
}
