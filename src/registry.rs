//! Profile registry for dbprofile
//!
//! This module owns the collection of saved profiles, keyed by name, and
//! persists it as a single XML document.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{ProfileError, ProfileResult};
use crate::profile::ConnectionProfile;
use crate::record::ProfileRecord;
use crate::xml_format;

/// Saved profiles bound to the store file they are loaded from and saved to
#[derive(Debug)]
pub struct ProfileRegistry {
    profiles: HashMap<String, ConnectionProfile>,
    store_path: PathBuf,
}

impl ProfileRegistry {
    /// Create an empty registry; nothing is read until `reload`
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            profiles: HashMap::new(),
            store_path: store_path.into(),
        }
    }

    /// Open a registry, loading the store if it exists
    pub fn open(store_path: impl Into<PathBuf>) -> ProfileResult<Self> {
        let mut registry = Self::new(store_path);
        registry.load_profiles()?;
        Ok(registry)
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Load all profiles from the store, replacing the in-memory set
    fn load_profiles(&mut self) -> ProfileResult<()> {
        self.profiles.clear();

        if !self.store_path.exists() {
            debug!("No profile store at {}, starting empty", self.store_path.display());
            return Ok(());
        }

        let content = fs::read_to_string(&self.store_path)
            .map_err(|e| ProfileError::storage(&self.store_path, e))?;
        let records = xml_format::read_document(&content)?;

        for record in &records {
            let profile = ConnectionProfile::from_record(record);
            if let Some(previous) = self.profiles.insert(profile.name().to_string(), profile) {
                warn!(
                    "Duplicate profile '{}' in {}, keeping the last entry",
                    previous.name(),
                    self.store_path.display()
                );
            }
        }

        info!("Loaded {} profiles from {}", self.profiles.len(), self.store_path.display());
        Ok(())
    }

    /// Write every profile to the store, creating its directory if needed
    pub fn save(&self) -> ProfileResult<()> {
        if let Some(parent) = self.store_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ProfileError::storage(parent, e))?;
            }
        }

        let records: Vec<ProfileRecord> = self.profiles().into_iter().map(ConnectionProfile::to_record).collect();
        let document = xml_format::write_document(&records)?;
        fs::write(&self.store_path, document).map_err(|e| ProfileError::storage(&self.store_path, e))?;

        info!("Saved {} profiles to {}", records.len(), self.store_path.display());
        Ok(())
    }

    /// Re-read the store, discarding unsaved changes
    pub fn reload(&mut self) -> ProfileResult<()> {
        self.load_profiles()
    }

    /// Register a new profile; fails if the name is taken
    pub fn add(&mut self, profile: ConnectionProfile) -> ProfileResult<()> {
        if self.profiles.contains_key(profile.name()) {
            return Err(ProfileError::Duplicate {
                name: profile.name().to_string(),
            });
        }
        self.profiles.insert(profile.name().to_string(), profile);
        Ok(())
    }

    /// Insert or overwrite a profile, returning the one it replaced
    pub fn replace(&mut self, profile: ConnectionProfile) -> Option<ConnectionProfile> {
        self.profiles.insert(profile.name().to_string(), profile)
    }

    pub fn get(&self, name: &str) -> Option<&ConnectionProfile> {
        self.profiles.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ConnectionProfile> {
        self.profiles.get_mut(name)
    }

    /// Like `get`, but a missing profile is an error
    pub fn require(&self, name: &str) -> ProfileResult<&ConnectionProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ProfileError::NotFound { name: name.to_string() })
    }

    pub fn require_mut(&mut self, name: &str) -> ProfileResult<&mut ConnectionProfile> {
        self.profiles
            .get_mut(name)
            .ok_or_else(|| ProfileError::NotFound { name: name.to_string() })
    }

    pub fn remove(&mut self, name: &str) -> Option<ConnectionProfile> {
        self.profiles.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Profile names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Profiles sorted by name
    pub fn profiles(&self) -> Vec<&ConnectionProfile> {
        let mut profiles: Vec<&ConnectionProfile> = self.profiles.values().collect();
        profiles.sort_by(|a, b| a.name().cmp(b.name()));
        profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
