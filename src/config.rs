//! Configuration for dbprofile
//!
//! Resolves where the profile store lives. The location can be overridden
//! with the `DBPROFILE_STORE` environment variable; otherwise it sits in the
//! platform configuration directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ProfileResult;
use crate::registry::ProfileRegistry;

/// Environment variable overriding the store location
pub const STORE_ENV_VAR: &str = "DBPROFILE_STORE";

const APP_DIR: &str = "dbprofile";
const STORE_FILE: &str = "aliases.xml";

/// Where the profile registry is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    store_path: PathBuf,
}

impl RegistryConfig {
    /// Configuration from the environment and platform defaults
    pub fn from_env() -> Self {
        Self::with_store_path(Self::default_store_path())
    }

    pub fn with_store_path(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }

    /// Determine the default store path.
    /// Priority:
    /// 1) DBPROFILE_STORE env var
    /// 2) Platform config dir (e.g. ~/.config/dbprofile/aliases.xml)
    /// 3) Current directory fallback: ./aliases.xml
    pub fn default_store_path() -> PathBuf {
        resolve_store_path(std::env::var_os(STORE_ENV_VAR), dirs::config_dir())
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Open the registry stored at the configured location
    pub fn open_registry(&self) -> ProfileResult<ProfileRegistry> {
        ProfileRegistry::open(&self.store_path)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn resolve_store_path(env_override: Option<OsString>, config_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    match config_dir {
        Some(base) => base.join(APP_DIR).join(STORE_FILE),
        None => PathBuf::from(STORE_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_env_override_wins() {
        let path = resolve_store_path(
            Some(OsString::from("/srv/profiles.xml")),
            Some(PathBuf::from("/home/user/.config")),
        );
        assert_eq!(path, PathBuf::from("/srv/profiles.xml"));
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let path = resolve_store_path(Some(OsString::new()), Some(PathBuf::from("/home/user/.config")));
        assert_eq!(path, PathBuf::from("/home/user/.config/dbprofile/aliases.xml"));
    }

    #[test]
    fn test_fallback_to_current_directory() {
        assert_eq!(resolve_store_path(None, None), PathBuf::from("aliases.xml"));
    }

    #[test]
    fn test_open_registry_at_explicit_path() {
        let temp_dir = tempdir().unwrap();
        let config = RegistryConfig::with_store_path(temp_dir.path().join("aliases.xml"));

        assert_eq!(config.store_path(), temp_dir.path().join("aliases.xml"));
        let registry = config.open_registry().unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.store_path(), config.store_path());
    }
}
