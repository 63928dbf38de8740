//! Whole-catalog enrichment.

use crate::analyzer::enricher::FeatureEnricher;
use crate::core::WebviewCompatError;
use crate::data::features::{FeatureCatalog, FeatureEntry};

/// Counts from one catalog pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct WalkStats {
    pub features: usize,
    pub overridden: usize,
    pub passed_through: usize,
}

pub struct DatasetWalker<'a> {
    enricher: FeatureEnricher<'a>,
}

impl<'a> DatasetWalker<'a> {
    pub fn new(enricher: FeatureEnricher<'a>) -> Self {
        Self { enricher }
    }

    /// Enrich every `feature` entry; `moved` and `split` entries are copied as-is.
    pub fn enrich_all(&self, catalog: &FeatureCatalog) -> Result<FeatureCatalog, WebviewCompatError> {
        self.enrich_all_with_stats(catalog).map(|(catalog, _)| catalog)
    }

    pub fn enrich_all_with_stats(
        &self,
        catalog: &FeatureCatalog,
    ) -> Result<(FeatureCatalog, WalkStats), WebviewCompatError> {
        let mut stats = WalkStats::default();
        let mut output = FeatureCatalog::with_capacity(catalog.len());

        for (id, entry) in catalog {
            let enriched = match entry {
                FeatureEntry::Feature(_) => {
                    let feature = self.enricher.enrich_by_id(catalog, id)?;
                    stats.features += 1;
                    if feature
                        .webview_support
                        .as_ref()
                        .is_some_and(|s| s.is_overridden())
                    {
                        stats.overridden += 1;
                    }
                    FeatureEntry::Feature(feature)
                }
                FeatureEntry::Moved(_) | FeatureEntry::Split(_) => {
                    stats.passed_through += 1;
                    entry.clone()
                }
            };
            output.insert(id.clone(), enriched);
        }

        tracing::info!(
            "Enriched {} features ({} overridden), passed through {} redirects",
            stats.features,
            stats.overridden,
            stats.passed_through
        );
        Ok((output, stats))
    }
}
