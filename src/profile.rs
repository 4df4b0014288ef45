//! Connection profiles for dbprofile
//!
//! A `ConnectionProfile` is a named, persistable description of a database
//! target: where it lives, how to log in, and any configuration overrides to
//! apply when the connection is opened.

use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use log::debug;

use crate::connection_mode::ConnectionMode;
use crate::error::{ProfileError, ProfileResult};
use crate::fs_platform;
use crate::record::ProfileRecord;
use crate::text_utils::{empty_if_blank, non_blank};

/// A saved connection to a database.
///
/// Identity is the pair (`name`, `uri`); credentials, timestamps and
/// configuration overrides do not take part in equality or hashing.
#[derive(Debug, Clone)]
pub struct ConnectionProfile {
    name: String,
    uri: String,
    user_name: Option<String>,
    password: Option<String>,
    /// Epoch milliseconds
    created_time: i64,
    connection_mode: ConnectionMode,
    configuration_map: HashMap<String, String>,
}

impl ConnectionProfile {
    /// Create a profile from user supplied parameters.
    ///
    /// For a local target the location must be a writable directory. A
    /// missing directory is created (with its parents) and the profile then
    /// points at its canonical absolute path.
    pub fn new(name: &str, location: &str, user: Option<&str>, pass: Option<&str>) -> ProfileResult<Self> {
        let mut uri = location.to_string();
        let connection_mode = ConnectionMode::from_uri(location);

        if connection_mode.is_local() {
            uri = Self::prepare_local_target(location)?;
        }

        Ok(Self {
            name: name.to_string(),
            uri,
            user_name: non_blank(user),
            password: non_blank(pass),
            created_time: chrono::Utc::now().timestamp_millis(),
            connection_mode,
            configuration_map: HashMap::new(),
        })
    }

    /// Rebuild a profile from its persisted record.
    ///
    /// Never touches the filesystem. The creation time is not part of the
    /// record, so the rebuilt profile is stamped with the current time.
    pub fn from_record(record: &ProfileRecord) -> Self {
        let configuration_map = record
            .configurations
            .as_ref()
            .map(|configs| configs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();

        Self {
            name: record.name.clone(),
            uri: record.uri.clone(),
            user_name: non_blank(Some(&record.user_name)),
            password: non_blank(Some(&record.password)),
            created_time: chrono::Utc::now().timestamp_millis(),
            connection_mode: ConnectionMode::from_uri(&record.uri),
            configuration_map,
        }
    }

    /// Persisted form; the inverse of `from_record`
    pub fn to_record(&self) -> ProfileRecord {
        let configurations = if self.configuration_map.is_empty() {
            None
        } else {
            Some(
                self.configuration_map
                    .iter()
                    .map(|(k, v)| (empty_if_blank(Some(k)), empty_if_blank(Some(v))))
                    .collect(),
            )
        };

        ProfileRecord {
            name: empty_if_blank(Some(&self.name)),
            uri: empty_if_blank(Some(&self.uri)),
            user_name: empty_if_blank(self.user_name.as_deref()),
            password: empty_if_blank(self.password.as_deref()),
            configurations,
        }
    }

    /// Validate a local database directory, creating it when missing.
    /// Returns the uri the profile should store.
    fn prepare_local_target(location: &str) -> ProfileResult<String> {
        let dir = Path::new(location);
        let mut uri = location.to_string();

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                ProfileError::configuration(dir, format!("cannot create target directory: {e}"))
            })?;
            let absolute = fs::canonicalize(dir).map_err(|e| {
                ProfileError::configuration(dir, format!("cannot create target directory: {e}"))
            })?;
            debug!("Created database directory {}", absolute.display());
            uri = absolute.to_string_lossy().into_owned();
        }

        let metadata = fs::metadata(dir)
            .map_err(|e| ProfileError::configuration(dir, format!("cannot inspect target location: {e}")))?;
        if !metadata.is_dir() {
            return Err(ProfileError::configuration(dir, "target location is not a directory"));
        }
        let writable = fs_platform::can_write(dir)
            .map_err(|e| ProfileError::configuration(dir, format!("cannot inspect target location: {e}")))?;
        if !writable {
            return Err(ProfileError::Permission {
                path: dir.display().to_string(),
            });
        }

        Ok(uri)
    }

    pub fn created_time(&self) -> i64 {
        self.created_time
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn connection_mode(&self) -> ConnectionMode {
        self.connection_mode
    }

    pub fn configuration_map(&self) -> &HashMap<String, String> {
        &self.configuration_map
    }

    /// Look up a single configuration override
    pub fn configuration_by_key(&self, key: &str) -> Option<&str> {
        self.configuration_map.get(key).map(String::as_str)
    }

    /// Insert or overwrite a configuration override
    pub fn add_configuration(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.configuration_map.insert(key.into(), value.into());
    }
}

impl PartialEq for ConnectionProfile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.uri == other.uri
    }
}

impl Eq for ConnectionProfile {}

impl Hash for ConnectionProfile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.uri.hash(state);
    }
}
