//! Time-limited settings cache
//!
//! Settings are read often (every command, every import) and change rarely.
//! `SettingsCache` keeps the last loaded copy for a fixed TTL; writes go
//! through the cache and invalidate it.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use tracing::debug;

use super::paths::MoneybagsPaths;
use super::settings::Settings;
use crate::error::MoneybagsError;

struct CachedSettings {
    settings: Settings,
    loaded_at: Instant,
}

/// Settings cache with explicit TTL and invalidation
pub struct SettingsCache {
    paths: MoneybagsPaths,
    ttl: Duration,
    cached: RwLock<Option<CachedSettings>>,
}

impl SettingsCache {
    /// Create a cache with the given TTL
    pub fn new(paths: MoneybagsPaths, ttl: Duration) -> Self {
        Self {
            paths,
            ttl,
            cached: RwLock::new(None),
        }
    }

    /// Create a cache using the TTL configured in the settings file
    pub fn from_settings_file(paths: MoneybagsPaths) -> Result<Self, MoneybagsError> {
        let settings = Settings::load_or_create(&paths)?;
        let cache = Self::new(paths, Duration::from_secs(settings.cache_ttl_secs));
        cache.store(settings)?;
        Ok(cache)
    }

    /// Whether a cached copy exists and is younger than the TTL at `now`
    pub fn is_valid_at(&self, now: Instant) -> Result<bool, MoneybagsError> {
        let cached = self
            .cached
            .read()
            .map_err(|e| MoneybagsError::Config(format!("Failed to acquire read lock: {}", e)))?;

        Ok(cached
            .as_ref()
            .map(|c| now.saturating_duration_since(c.loaded_at) < self.ttl)
            .unwrap_or(false))
    }

    /// Whether the cached copy is still fresh
    pub fn is_valid(&self) -> Result<bool, MoneybagsError> {
        self.is_valid_at(Instant::now())
    }

    /// Get settings, reloading from disk when the cached copy has expired
    pub fn get(&self) -> Result<Settings, MoneybagsError> {
        if self.is_valid()? {
            let cached = self.cached.read().map_err(|e| {
                MoneybagsError::Config(format!("Failed to acquire read lock: {}", e))
            })?;
            if let Some(c) = cached.as_ref() {
                debug!("Returning cached settings");
                return Ok(c.settings.clone());
            }
        }

        let settings = Settings::load_or_create(&self.paths)?;
        self.store(settings.clone())?;
        debug!("Settings cache refreshed");
        Ok(settings)
    }

    /// Persist new settings and drop the cached copy
    pub fn update(&self, settings: &Settings) -> Result<(), MoneybagsError> {
        settings.save(&self.paths)?;
        self.invalidate()
    }

    /// Drop the cached copy so the next `get` reads from disk
    pub fn invalidate(&self) -> Result<(), MoneybagsError> {
        let mut cached = self
            .cached
            .write()
            .map_err(|e| MoneybagsError::Config(format!("Failed to acquire write lock: {}", e)))?;
        *cached = None;
        debug!("Settings cache invalidated");
        Ok(())
    }

    fn store(&self, settings: Settings) -> Result<(), MoneybagsError> {
        let mut cached = self
            .cached
            .write()
            .map_err(|e| MoneybagsError::Config(format!("Failed to acquire write lock: {}", e)))?;
        *cached = Some(CachedSettings {
            settings,
            loaded_at: Instant::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::CurrencyFormat;
    use tempfile::TempDir;

    fn create_test_cache(ttl: Duration) -> (TempDir, MoneybagsPaths, SettingsCache) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneybagsPaths::with_base_dir(temp_dir.path().to_path_buf());
        let cache = SettingsCache::new(paths.clone(), ttl);
        (temp_dir, paths, cache)
    }

    #[test]
    fn test_empty_cache_is_invalid() {
        let (_temp_dir, _paths, cache) = create_test_cache(Duration::from_secs(300));
        assert!(!cache.is_valid().unwrap());
    }

    #[test]
    fn test_get_populates_cache() {
        let (_temp_dir, _paths, cache) = create_test_cache(Duration::from_secs(300));
        let settings = cache.get().unwrap();
        assert_eq!(settings.currency_format, CurrencyFormat::Nok);
        assert!(cache.is_valid().unwrap());
    }

    #[test]
    fn test_cached_copy_hides_external_writes_until_invalidated() {
        let (_temp_dir, paths, cache) = create_test_cache(Duration::from_secs(300));
        cache.get().unwrap();

        let mut changed = Settings::default();
        changed.currency_format = CurrencyFormat::Usd;
        changed.save(&paths).unwrap();

        assert_eq!(cache.get().unwrap().currency_format, CurrencyFormat::Nok);

        cache.invalidate().unwrap();
        assert_eq!(cache.get().unwrap().currency_format, CurrencyFormat::Usd);
    }

    #[test]
    fn test_update_invalidates() {
        let (_temp_dir, _paths, cache) = create_test_cache(Duration::from_secs(300));
        cache.get().unwrap();

        let mut changed = Settings::default();
        changed.currency_format = CurrencyFormat::Eur;
        cache.update(&changed).unwrap();

        assert!(!cache.is_valid().unwrap());
        assert_eq!(cache.get().unwrap().currency_format, CurrencyFormat::Eur);
    }

    #[test]
    fn test_expiry() {
        let (_temp_dir, _paths, cache) = create_test_cache(Duration::from_secs(60));
        cache.get().unwrap();

        let later = Instant::now() + Duration::from_secs(61);
        assert!(!cache.is_valid_at(later).unwrap());
        assert!(cache.is_valid_at(Instant::now()).unwrap());
    }

    #[test]
    fn test_zero_ttl_never_valid() {
        let (_temp_dir, _paths, cache) = create_test_cache(Duration::ZERO);
        cache.get().unwrap();
        assert!(!cache.is_valid().unwrap());
    }
}
