/// Connection mode classification for target locations
pub mod connection_mode;

/// Saved connection profiles
pub mod profile;

/// Persisted record form of a profile
pub mod record;

/// XML document adapter for profile records
pub mod xml_format;

/// Owned collection of profiles with XML persistence
pub mod registry;
pub mod config;
pub mod error;
pub mod fs_platform;
pub mod text_utils;

// Re-export the main types for easier access
pub use config::RegistryConfig;
pub use connection_mode::ConnectionMode;
pub use error::{ProfileError, ProfileResult};
pub use profile::ConnectionProfile;
pub use record::ProfileRecord;
pub use registry::ProfileRegistry;
