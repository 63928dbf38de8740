//! web-features catalog model.
//!
//! Only the members the enrichment reads are typed. Everything else on a
//! feature, its status, or a compat key status is kept in a flattened map so
//! an enriched catalog carries the source data through unchanged.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::core::WebviewCompatError;
use crate::data::webview::{CompatKeyWebviewSupport, WebviewSupportEntry};

/// Feature catalog keyed by feature id, in source order.
pub type FeatureCatalog = IndexMap<String, FeatureEntry>;

/// Baseline status: not widely available, newly available, widely available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Baseline {
    #[default]
    False,
    Low,
    High,
}

impl Baseline {
    /// Whether this is any baseline level at all.
    pub fn is_baseline(self) -> bool {
        !matches!(self, Baseline::False)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Baseline::False => "false",
            Baseline::Low => "low",
            Baseline::High => "high",
        }
    }
}

impl Serialize for Baseline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Baseline::False => serializer.serialize_bool(false),
            Baseline::Low => serializer.serialize_str("low"),
            Baseline::High => serializer.serialize_str("high"),
        }
    }
}

impl<'de> Deserialize<'de> for Baseline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None | Some(Raw::Flag(false)) => Ok(Baseline::False),
            Some(Raw::Text(s)) if s == "low" => Ok(Baseline::Low),
            Some(Raw::Text(s)) if s == "high" => Ok(Baseline::High),
            Some(Raw::Flag(true)) => Err(serde::de::Error::custom(
                "baseline must be false, \"low\" or \"high\"",
            )),
            Some(Raw::Text(s)) => Err(serde::de::Error::custom(format!(
                "unknown baseline status \"{}\"",
                s
            ))),
        }
    }
}

/// A catalog entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureEntry {
    Feature(FeatureData),
    Moved(MovedData),
    Split(SplitData),
}

impl FeatureEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            FeatureEntry::Feature(_) => "feature",
            FeatureEntry::Moved(_) => "moved",
            FeatureEntry::Split(_) => "split",
        }
    }

    pub fn as_feature(&self) -> Option<&FeatureData> {
        match self {
            FeatureEntry::Feature(data) => Some(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureData {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webview_support: Option<WebviewSupportEntry>,
}

impl FeatureData {
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }

    pub fn is_discouraged(&self) -> bool {
        self.extra.get("discouraged").is_some_and(|v| !v.is_null())
    }

    pub fn baseline(&self) -> Baseline {
        self.status.as_ref().map(|s| s.baseline).unwrap_or_default()
    }

    /// Compat keys of this feature, empty when the feature has no status.
    pub fn compat_keys(&self) -> impl Iterator<Item = (&String, &CompatKeyStatus)> {
        self.status.iter().flat_map(|s| s.by_compat_key.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureStatus {
    #[serde(default)]
    pub baseline: Baseline,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub support: Map<String, Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub by_compat_key: IndexMap<String, CompatKeyStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatKeyStatus {
    #[serde(default)]
    pub baseline: Baseline,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub support: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webview_support: Option<CompatKeyWebviewSupport>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovedData {
    pub redirect_target: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitData {
    #[serde(default)]
    pub redirect_targets: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Whether a `status.support` map lists `browser` with a truthy version.
pub fn support_lists(support: &Map<String, Value>, browser: &str) -> bool {
    match support.get(browser) {
        Some(Value::String(v)) => !v.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

/// Parse a catalog from either a bare `id -> entry` object or a web-features
/// document with a top-level `features` member.
pub fn parse_feature_catalog(json: &str) -> Result<FeatureCatalog, WebviewCompatError> {
    let mut features: Value = serde_json::from_str(json)?;
    if features.get("features").is_some_and(Value::is_object) {
        features = features["features"].take();
    }
    if !features.is_object() {
        return Err(WebviewCompatError::Other(
            "feature catalog must be a JSON object".to_string(),
        ));
    }
    Ok(FeatureCatalog::deserialize(features)?)
}

pub fn load_feature_catalog(path: &Path) -> Result<FeatureCatalog, WebviewCompatError> {
    let content = std::fs::read_to_string(path)?;
    let catalog = parse_feature_catalog(&content)?;
    tracing::info!("Loaded {} catalog entries from {:?}", catalog.len(), path);
    Ok(catalog)
}
