//! Core enrichment API shared by the CLI and library users.
//! Both datasets are passed in explicitly; nothing is loaded globally.

use std::path::Path;

use crate::analyzer::{DatasetWalker, FeatureEnricher, WalkStats};
use crate::data::compat::CompatDataset;
use crate::data::features::{load_feature_catalog, FeatureCatalog, FeatureData};
use crate::data::overrides::Overrides;

#[derive(Debug, thiserror::Error)]
pub enum WebviewCompatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Feature with id \"{feature_id}\" {reason}")]
    Integrity { feature_id: String, reason: String },
    #[error("Feature with id \"{0}\" does not exist")]
    MissingFeature(String),
    #[error("{0}")]
    Other(String),
}

/// Options for an enrichment run (CLI or library).
#[derive(Clone, Debug)]
pub struct EnrichOptions {
    pub overrides: Overrides,
    /// Follow one `moved` redirect when enriching by id.
    pub follow_redirects: bool,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            overrides: Overrides::empty(),
            follow_redirects: true,
        }
    }
}

impl EnrichOptions {
    /// Default options with the overrides shipped in the crate.
    pub fn with_builtin_overrides() -> Result<Self, WebviewCompatError> {
        Ok(Self {
            overrides: Overrides::builtin()?,
            ..Self::default()
        })
    }
}

/// Enriched catalog with pass counts.
#[derive(Debug, Clone)]
pub struct EnrichmentResult {
    pub catalog: FeatureCatalog,
    pub stats: WalkStats,
}

/// Core enrichment API used by the CLI.
pub struct WebviewCompatCore;

impl WebviewCompatCore {
    /// Enrich every feature of `catalog` against `dataset`.
    pub fn enrich(
        catalog: &FeatureCatalog,
        dataset: &CompatDataset,
        options: &EnrichOptions,
    ) -> Result<EnrichmentResult, WebviewCompatError> {
        let walker = DatasetWalker::new(FeatureEnricher::new(dataset, options));
        let (catalog, stats) = walker.enrich_all_with_stats(catalog)?;
        Ok(EnrichmentResult { catalog, stats })
    }

    /// Enrich a single feature by id, following one `moved` redirect.
    pub fn enrich_feature(
        catalog: &FeatureCatalog,
        dataset: &CompatDataset,
        options: &EnrichOptions,
        feature_id: &str,
    ) -> Result<FeatureData, WebviewCompatError> {
        FeatureEnricher::new(dataset, options).enrich_by_id(catalog, feature_id)
    }

    /// Load both datasets from disk and enrich the catalog.
    pub fn enrich_files(
        features_path: &Path,
        compat_path: &Path,
        options: &EnrichOptions,
    ) -> Result<EnrichmentResult, WebviewCompatError> {
        let catalog = load_feature_catalog(features_path)?;
        let dataset = CompatDataset::from_path(compat_path)?;
        Self::enrich(&catalog, &dataset, options)
    }
}

/// Serialize an enriched catalog.
pub fn catalog_to_json(catalog: &FeatureCatalog, pretty: bool) -> Result<String, WebviewCompatError> {
    let json = if pretty {
        serde_json::to_string_pretty(catalog)?
    } else {
        serde_json::to_string(catalog)?
    };
    Ok(json)
}
