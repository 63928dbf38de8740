//! Manually curated WebView support.
//!
//! Overrides replace computed analysis for known-bad compat data. They are
//! loaded from:
//! 1. A user-supplied JSON file, when given
//! 2. The JSON document embedded in the binary (fallback)

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::core::WebviewCompatError;
use crate::data::webview::WebviewSupport;

const EMBEDDED_OVERRIDES: &str = include_str!("../../data/overrides.json");

/// Feature id to the `webview_support` value applied verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    entries: IndexMap<String, Value>,
}

impl Overrides {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Overrides shipped with the crate.
    pub fn builtin() -> Result<Self, WebviewCompatError> {
        Self::from_json_str(EMBEDDED_OVERRIDES)
    }

    pub fn from_json_str(json: &str) -> Result<Self, WebviewCompatError> {
        let mut entries: IndexMap<String, Value> = serde_json::from_str(json)?;
        entries.retain(|id, value| {
            let keep = is_applicable(value);
            if !keep {
                tracing::warn!("Ignoring empty override for {}", id);
            }
            keep
        });
        for (id, value) in &entries {
            if serde_json::from_value::<WebviewSupport>(value.clone()).is_err() {
                tracing::warn!(
                    "Override for {} is not a complete webview_support object, applying it verbatim",
                    id
                );
            }
        }
        Ok(Self { entries })
    }

    pub fn from_path(path: &Path) -> Result<Self, WebviewCompatError> {
        let content = std::fs::read_to_string(path)?;
        let overrides = Self::from_json_str(&content)?;
        tracing::info!("Loaded {} overrides from {:?}", overrides.len(), path);
        Ok(overrides)
    }

    pub fn insert(&mut self, feature_id: impl Into<String>, value: Value) {
        self.entries.insert(feature_id.into(), value);
    }

    /// Override for `feature_id`; `null`, `false`, `0` and `""` never apply.
    pub fn get(&self, feature_id: &str) -> Option<&Value> {
        self.entries.get(feature_id).filter(|v| is_applicable(v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_applicable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
