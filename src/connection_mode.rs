//! Connection mode classification for dbprofile
//!
//! A profile's target location is either a directory on the local filesystem
//! or a server reached over HTTP. The mode is always derived from the
//! location string and never stored independently.

use serde::{Deserialize, Serialize};
use std::fmt;

/// URI schemes that address a remote database server
const REMOTE_SCHEMES: &[&str] = &["http://", "https://"];

/// How a profile reaches its database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionMode {
    /// Embedded database stored in a local directory
    Local,
    /// Database server reached over the network
    Remote,
}

impl ConnectionMode {
    /// Classify a target location.
    ///
    /// Locations starting with a remote scheme (case-insensitive) are
    /// `Remote`; everything else, including the empty string, is treated as
    /// a filesystem path.
    pub fn from_uri(uri: &str) -> Self {
        let trimmed = uri.trim_start();
        let is_remote = REMOTE_SCHEMES.iter().any(|scheme| {
            trimmed
                .get(..scheme.len())
                .map(|prefix| prefix.eq_ignore_ascii_case(scheme))
                .unwrap_or(false)
        });

        if is_remote {
            ConnectionMode::Remote
        } else {
            ConnectionMode::Local
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, ConnectionMode::Local)
    }
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionMode::Local => write!(f, "LOCAL"),
            ConnectionMode::Remote => write!(f, "REMOTE"),
        }
    }
}
