//! Browser compat data (BCD) model.
//!
//! The compat tree is held as raw JSON and only the nodes that are actually
//! looked up get deserialized into typed statements. The `browsers` section
//! is parsed eagerly since every release-gap calculation needs it.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::core::WebviewCompatError;
use crate::tree;

/// Key under which a tree node stores its compat statement.
pub const COMPAT_MEMBER: &str = "__compat";

/// Sentinel version for experimental, unreleased support.
pub const PREVIEW: &str = "preview";

/// Value of a support record's `version_added`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionAdded {
    /// Never supported.
    False,
    /// Supported since an unknown version (legacy form).
    True,
    /// Supported since this version (may be a range like `≤37` or `preview`).
    Version(String),
}

impl VersionAdded {
    /// The version text, if this is a version string.
    pub fn as_version(&self) -> Option<&str> {
        match self {
            VersionAdded::Version(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_preview(&self) -> bool {
        self.as_version() == Some(PREVIEW)
    }

    /// `true` for `True` and for non-empty version strings.
    pub fn is_truthy(&self) -> bool {
        match self {
            VersionAdded::False => false,
            VersionAdded::True => true,
            VersionAdded::Version(v) => !v.is_empty(),
        }
    }
}

impl fmt::Display for VersionAdded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionAdded::False => f.write_str("false"),
            VersionAdded::True => f.write_str("true"),
            VersionAdded::Version(v) => f.write_str(v),
        }
    }
}

impl Serialize for VersionAdded {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            VersionAdded::False => serializer.serialize_bool(false),
            VersionAdded::True => serializer.serialize_bool(true),
            VersionAdded::Version(v) => serializer.serialize_str(v),
        }
    }
}

impl<'de> Deserialize<'de> for VersionAdded {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => VersionAdded::False,
            Raw::Flag(true) => VersionAdded::True,
            Raw::Text(v) => VersionAdded::Version(v),
        })
    }
}

/// One browser's support record for a compat key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SupportRecord {
    #[serde(default)]
    pub version_added: Option<VersionAdded>,
    #[serde(default)]
    pub partial_implementation: Option<bool>,
}

impl SupportRecord {
    pub fn is_partial(&self) -> bool {
        self.partial_implementation == Some(true)
    }
}

/// A browser's support: either one record or several.
///
/// Only a single record is classified. A statement with several records
/// (prefixed, flagged or alternative-name history) has no classifiable
/// record, so it reads as unsupported and carries no version.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SupportStatement {
    Multiple(Vec<SupportRecord>),
    Single(SupportRecord),
}

impl SupportStatement {
    /// The record that decides classification, if this is a single record.
    pub fn single(&self) -> Option<&SupportRecord> {
        match self {
            SupportStatement::Single(record) => Some(record),
            SupportStatement::Multiple(_) => None,
        }
    }
}

/// The `__compat` block of a tree node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompatStatement {
    #[serde(default)]
    pub support: Option<IndexMap<String, SupportStatement>>,
}

impl CompatStatement {
    /// Support record for `browser`; `None` when absent or given as an array.
    pub fn record(&self, browser: &str) -> Option<&SupportRecord> {
        self.support.as_ref()?.get(browser)?.single()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReleaseStatement {
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ReleaseStatement {
    /// Parsed release date; `None` when absent or not `YYYY-MM-DD`.
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BrowserStatement {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub releases: IndexMap<String, ReleaseStatement>,
}

/// Read-only snapshot of the compat dataset.
#[derive(Debug, Clone)]
pub struct CompatDataset {
    tree: Value,
    browsers: IndexMap<String, BrowserStatement>,
}

impl CompatDataset {
    pub fn from_value(tree: Value) -> Result<Self, WebviewCompatError> {
        if !tree.is_object() {
            return Err(WebviewCompatError::Other(
                "compat dataset must be a JSON object".to_string(),
            ));
        }
        let browsers = match tree.get("browsers") {
            Some(section) => IndexMap::<String, BrowserStatement>::deserialize(section)?,
            None => {
                tracing::warn!("compat dataset has no browsers section, release gaps will be unknown");
                IndexMap::new()
            }
        };
        Ok(Self { tree, browsers })
    }

    pub fn from_json_str(json: &str) -> Result<Self, WebviewCompatError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, WebviewCompatError> {
        let content = std::fs::read_to_string(path)?;
        let dataset = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded compat dataset from {:?} ({} browsers)",
            path,
            dataset.browser_count()
        );
        Ok(dataset)
    }

    /// Tree node at a dotted compat key.
    pub fn resolve(&self, key: &str) -> Option<&Value> {
        tree::resolve_dotted(&self.tree, key)
    }

    /// Compat statement at `key`, if the node exists and carries a support block.
    pub fn compat_statement(&self, key: &str) -> Option<CompatStatement> {
        let node = self.resolve(key)?.get(COMPAT_MEMBER)?;
        match CompatStatement::deserialize(node) {
            Ok(statement) if statement.support.is_some() => Some(statement),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Malformed compat statement at {}: {}", key, e);
                None
            }
        }
    }

    pub fn browser(&self, id: &str) -> Option<&BrowserStatement> {
        self.browsers.get(id)
    }

    pub fn releases(&self, id: &str) -> Option<&IndexMap<String, ReleaseStatement>> {
        self.browser(id).map(|b| &b.releases)
    }

    pub fn browser_count(&self) -> usize {
        self.browsers.len()
    }
}
