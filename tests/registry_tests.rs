//! Registry persistence tests
//!
//! Exercises the full path from parameter-built profiles through the XML
//! store and back.

use std::fs;

use dbprofile::{ConnectionMode, ConnectionProfile, ProfileError, ProfileRegistry, RegistryConfig};
use tempfile::tempdir;

#[test]
fn test_saved_registry_reopens_with_same_profiles() {
    let temp_dir = tempdir().unwrap();
    let store = temp_dir.path().join("aliases.xml");
    let db_path = temp_dir.path().join("graphs").join("db1");

    let mut local = ConnectionProfile::new("local1", db_path.to_str().unwrap(), None, None).unwrap();
    local.add_configuration("cache_type", "none");
    let remote = ConnectionProfile::new("remote1", "http://localhost:7474/db/data", Some("neo4j"), Some("secret")).unwrap();

    let mut registry = ProfileRegistry::new(&store);
    registry.add(local.clone()).unwrap();
    registry.add(remote.clone()).unwrap();
    registry.save().unwrap();

    let reopened = ProfileRegistry::open(&store).unwrap();
    assert_eq!(reopened.names(), vec!["local1", "remote1"]);

    let restored_local = reopened.get("local1").unwrap();
    assert_eq!(restored_local, &local);
    assert_eq!(restored_local.connection_mode(), ConnectionMode::Local);
    assert_eq!(restored_local.configuration_by_key("cache_type"), Some("none"));
    assert_eq!(restored_local.user_name(), None);
    assert_eq!(restored_local.password(), None);

    let restored_remote = reopened.get("remote1").unwrap();
    assert_eq!(restored_remote, &remote);
    assert_eq!(restored_remote.connection_mode(), ConnectionMode::Remote);
    assert_eq!(restored_remote.user_name(), Some("neo4j"));
    assert_eq!(restored_remote.password(), Some("secret"));
    assert!(restored_remote.configuration_map().is_empty());
}

#[test]
fn test_store_contains_empty_credentials_not_missing_ones() {
    let temp_dir = tempdir().unwrap();
    let store = temp_dir.path().join("aliases.xml");

    let mut registry = ProfileRegistry::new(&store);
    registry
        .add(ConnectionProfile::new("remote1", "https://graphs.example.com", Some("  "), None).unwrap())
        .unwrap();
    registry.save().unwrap();

    let document = fs::read_to_string(&store).unwrap();
    assert!(document.contains("<user-name/>"));
    assert!(document.contains("<password/>"));
    assert!(!document.contains("<configurations"));
}

#[test]
fn test_loading_does_not_create_local_directories() {
    let temp_dir = tempdir().unwrap();
    let store = temp_dir.path().join("aliases.xml");
    let db_path = temp_dir.path().join("moved_away");
    fs::write(
        &store,
        format!(
            "<aliases><alias><name>stale</name><uri>{}</uri></alias></aliases>",
            db_path.display()
        ),
    )
    .unwrap();

    let registry = ProfileRegistry::open(&store).unwrap();
    assert_eq!(registry.get("stale").unwrap().connection_mode(), ConnectionMode::Local);
    assert!(!db_path.exists());
}

#[test]
fn test_removed_profile_stays_removed_after_save() {
    let temp_dir = tempdir().unwrap();
    let config = RegistryConfig::with_store_path(temp_dir.path().join("nested").join("aliases.xml"));

    let mut registry = config.open_registry().unwrap();
    registry.add(ConnectionProfile::new("a", "http://a", None, None).unwrap()).unwrap();
    registry.add(ConnectionProfile::new("b", "http://b", None, None).unwrap()).unwrap();
    registry.save().unwrap();

    registry.remove("a");
    registry.save().unwrap();

    let reopened = config.open_registry().unwrap();
    assert_eq!(reopened.names(), vec!["b"]);
}

#[test]
fn test_unwritable_store_reports_storage_error() {
    let temp_dir = tempdir().unwrap();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, b"file").unwrap();

    let registry = ProfileRegistry::new(blocker.join("aliases.xml"));
    assert!(matches!(registry.save(), Err(ProfileError::Storage { .. })));
}
