//! Storage configuration for user records.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, UserError};

/// Default upper bound for generated user ids.
pub const DEFAULT_MAX_ID: u32 = 100;
/// Default directory holding one file per user.
pub const DEFAULT_STORAGE_DIR: &str = "users";

/// Environment variable overriding [`StorageConfig::storage_dir`].
pub const STORAGE_DIR_ENV: &str = "USER_STORAGE_DIR";
/// Environment variable overriding [`StorageConfig::max_id`].
pub const MAX_ID_ENV: &str = "MAX_ID";

/// Where user files live and how ids are drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub storage_dir: PathBuf,
    /// Ids are drawn uniformly from `1..=max_id`.
    pub max_id: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            max_id: DEFAULT_MAX_ID,
        }
    }
}

impl StorageConfig {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_max_id(mut self, max_id: u32) -> Self {
        self.max_id = max_id;
        self
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Builds a config from `USER_STORAGE_DIR` and `MAX_ID`, using the
    /// defaults for whichever is unset.
    ///
    /// # Errors
    /// Returns [`UserError::Config`] if `MAX_ID` is not a positive integer.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup(STORAGE_DIR_ENV).filter(|dir| !dir.is_empty()) {
            config.storage_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(MAX_ID_ENV) {
            config.max_id = raw.trim().parse().map_err(|_| {
                UserError::Config(format!("{} must be a positive integer, got {:?}", MAX_ID_ENV, raw))
            })?;
        }

        config.validate()?;
        debug!(storage_dir = %config.storage_dir.display(), max_id = config.max_id, "Loaded storage config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_id == 0 {
            return Err(UserError::Config("max_id must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.storage_dir, PathBuf::from("users"));
        assert_eq!(config.max_id, 100);
    }

    #[test]
    fn test_from_env_overrides() {
        let config = StorageConfig::from_lookup(lookup_from(&[
            (STORAGE_DIR_ENV, "/tmp/accounts"),
            (MAX_ID_ENV, " 7 "),
        ]))
        .unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/accounts"));
        assert_eq!(config.max_id, 7);
    }

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        let config = StorageConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StorageConfig::default());
    }

    #[test]
    fn test_from_env_rejects_bad_max_id() {
        let err = StorageConfig::from_lookup(lookup_from(&[(MAX_ID_ENV, "lots")])).unwrap_err();
        assert!(matches!(err, UserError::Config(_)));

        let err = StorageConfig::from_lookup(lookup_from(&[(MAX_ID_ENV, "0")])).unwrap_err();
        assert!(matches!(err, UserError::Config(_)));
    }
}
