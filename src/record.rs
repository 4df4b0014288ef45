//! Persisted form of a connection profile
//!
//! A `ProfileRecord` is the nested mapping a profile is written as. The XML
//! adapter in `xml_format` and the JSON export both work on records, never on
//! profiles directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ProfileResult;

/// Field names, stable across releases
pub const NAME: &str = "name";
pub const URI: &str = "uri";
pub const USER_NAME: &str = "user-name";
pub const PASSWORD: &str = "password";
pub const CONFIGURATIONS: &str = "configurations";

/// Serialized profile. Absent fields read back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(rename = "user-name", default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
    /// Present only when the profile carries configuration overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<BTreeMap<String, String>>,
}

impl ProfileRecord {
    /// Pretty-printed JSON form
    pub fn to_json(&self) -> ProfileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ProfileResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
