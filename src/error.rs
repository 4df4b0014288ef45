//! Error handling for dbprofile
//!
//! Profile construction can fail only while validating a local target
//! directory. The registry adds storage and document format failures on top.

use std::error::Error as StdError;
use std::fmt;
use std::path::Path;

/// Top-level error type for profile operations
#[derive(Debug)]
pub enum ProfileError {
    /// Target location cannot be used as a database directory
    Configuration { path: String, reason: String },
    /// Target directory exists but cannot be written to
    Permission { path: String },
    /// Registry store could not be read or written
    Storage { path: String, error: String },
    /// Stored document is not a valid profile document
    Format { message: String },
    /// A profile with this name is already registered
    Duplicate { name: String },
    /// No profile with this name is registered
    NotFound { name: String },
}

impl ProfileError {
    pub fn configuration(path: &Path, reason: impl Into<String>) -> Self {
        ProfileError::Configuration {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    pub fn storage(path: &Path, error: impl fmt::Display) -> Self {
        ProfileError::Storage {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        ProfileError::Format { message: message.into() }
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Configuration { path, reason } =>
                write!(f, "Invalid target location '{path}': {reason}"),
            ProfileError::Permission { path } =>
                write!(f, "Permission denied: target location is not writable '{path}'"),
            ProfileError::Storage { path, error } =>
                write!(f, "Profile store error '{path}': {error}"),
            ProfileError::Format { message } =>
                write!(f, "Malformed profile document: {message}"),
            ProfileError::Duplicate { name } =>
                write!(f, "Profile '{name}' already exists"),
            ProfileError::NotFound { name } =>
                write!(f, "Profile '{name}' not found"),
        }
    }
}

impl StdError for ProfileError {}

impl From<quick_xml::Error> for ProfileError {
    fn from(err: quick_xml::Error) -> Self {
        ProfileError::format(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ProfileError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ProfileError::format(err.to_string())
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        ProfileError::format(err.to_string())
    }
}

/// Result type alias for profile operations
pub type ProfileResult<T> = Result<T, ProfileError>;
