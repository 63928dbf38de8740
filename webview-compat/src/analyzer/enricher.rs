//! Feature-level WebView support.
//!
//! Every resolvable compat key of a feature is annotated with the WebView
//! versions and release gaps, then per-platform discrepancies between the
//! main browser and its WebView are aggregated into a three-state level:
//!
//! ```text
//! key: main supported, webview not   ──▶ platform = partial, key listed
//! partial + every baseline key listed ──▶ platform = unsupported
//! partial + no baseline keys and every
//!   main-supported key listed         ──▶ platform = unsupported
//! all = unsupported (both) | supported (both) | partial (otherwise)
//! ```

use crate::analyzer::release_gap::ReleaseGapCalculator;
use crate::analyzer::support::{is_supported, webview_version_or_false};
use crate::core::{EnrichOptions, WebviewCompatError};
use crate::data::compat::{CompatDataset, CompatStatement, VersionAdded};
use crate::data::features::{FeatureCatalog, FeatureData, FeatureEntry};
use crate::data::webview::{
    CompatKeyWebviewSupport, Platform, ReleaseGap, SupportLevel, WebviewSupport,
    WebviewSupportEntry,
};

/// Running per-platform result while compat keys are processed.
#[derive(Debug)]
struct PlatformTally {
    platform: Platform,
    level: SupportLevel,
    unsupported: Vec<String>,
    main_supported: usize,
}

impl PlatformTally {
    fn new(platform: Platform) -> Self {
        Self {
            platform,
            level: SupportLevel::Supported,
            unsupported: Vec::new(),
            main_supported: 0,
        }
    }

    fn observe(&mut self, key: &str, statement: &CompatStatement) {
        if !is_supported(statement.record(self.platform.main_browser())) {
            return;
        }
        self.main_supported += 1;
        if !is_supported(statement.record(self.platform.webview_browser())) {
            self.level = SupportLevel::Partial;
            self.unsupported.push(key.to_string());
        }
    }

    fn escalate(&mut self, baseline_keys: &[String]) {
        if self.level != SupportLevel::Partial {
            return;
        }
        let fully_unsupported = if baseline_keys.is_empty() {
            self.unsupported.len() == self.main_supported
        } else {
            baseline_keys.iter().all(|key| self.unsupported.contains(key))
        };
        if fully_unsupported {
            self.level = SupportLevel::Unsupported;
        }
    }
}

/// Computes `webview_support` for features against one compat dataset.
pub struct FeatureEnricher<'a> {
    dataset: &'a CompatDataset,
    options: &'a EnrichOptions,
    gaps: ReleaseGapCalculator<'a>,
}

impl<'a> FeatureEnricher<'a> {
    pub fn new(dataset: &'a CompatDataset, options: &'a EnrichOptions) -> Self {
        Self {
            dataset,
            options,
            gaps: ReleaseGapCalculator::new(dataset),
        }
    }

    /// Look up `feature_id` in `catalog`, following one `moved` redirect,
    /// and enrich it.
    pub fn enrich_by_id(
        &self,
        catalog: &FeatureCatalog,
        feature_id: &str,
    ) -> Result<FeatureData, WebviewCompatError> {
        let mut entry = catalog
            .get(feature_id)
            .ok_or_else(|| WebviewCompatError::MissingFeature(feature_id.to_string()))?;

        if let FeatureEntry::Moved(moved) = entry {
            if !self.options.follow_redirects {
                return Err(WebviewCompatError::Integrity {
                    feature_id: feature_id.to_string(),
                    reason: format!("has moved to \"{}\"", moved.redirect_target),
                });
            }
            entry = catalog.get(&moved.redirect_target).ok_or_else(|| {
                WebviewCompatError::Integrity {
                    feature_id: feature_id.to_string(),
                    reason: format!(
                        "redirect target \"{}\" does not exist",
                        moved.redirect_target
                    ),
                }
            })?;
        }

        match entry {
            FeatureEntry::Feature(feature) => Ok(self.enrich(feature_id, feature)),
            other => Err(WebviewCompatError::Integrity {
                feature_id: feature_id.to_string(),
                reason: format!("is not of kind \"feature\" (found \"{}\")", other.kind()),
            }),
        }
    }

    /// Enriched copy of `feature`; the source is left untouched.
    pub fn enrich(&self, feature_id: &str, feature: &FeatureData) -> FeatureData {
        let mut enriched = feature.clone();

        if let Some(value) = self.options.overrides.get(feature_id) {
            tracing::debug!("Applying webview override for {}", feature_id);
            enriched.webview_support = Some(WebviewSupportEntry::Overridden(value.clone()));
            return enriched;
        }

        let mut android = PlatformTally::new(Platform::Android);
        let mut ios = PlatformTally::new(Platform::Ios);

        if let Some(status) = enriched.status.as_mut() {
            let baseline_keys: Vec<String> = status
                .by_compat_key
                .iter()
                .filter(|(_, key_status)| key_status.baseline.is_baseline())
                .map(|(key, _)| key.clone())
                .collect();

            for (key, key_status) in status.by_compat_key.iter_mut() {
                let Some(statement) = self.dataset.compat_statement(key) else {
                    tracing::debug!("{}: no compat support data for {}, skipping", feature_id, key);
                    continue;
                };

                key_status.webview_support = Some(self.annotate(&statement));
                android.observe(key, &statement);
                ios.observe(key, &statement);
            }

            android.escalate(&baseline_keys);
            ios.escalate(&baseline_keys);
        }

        enriched.webview_support = Some(WebviewSupportEntry::Computed(WebviewSupport {
            all: SupportLevel::aggregate(android.level, ios.level),
            android: android.level,
            android_unsupported_compat_features: android.unsupported,
            ios: ios.level,
            ios_unsupported_compat_features: ios.unsupported,
        }));
        enriched
    }

    fn annotate(&self, statement: &CompatStatement) -> CompatKeyWebviewSupport {
        CompatKeyWebviewSupport {
            android: webview_version_or_false(
                statement.record(Platform::Android.webview_browser()),
            ),
            ios: webview_version_or_false(statement.record(Platform::Ios.webview_browser())),
            android_gap: self.platform_gap(Platform::Android, statement),
            ios_gap: self.platform_gap(Platform::Ios, statement),
        }
    }

    fn platform_gap(&self, platform: Platform, statement: &CompatStatement) -> Option<ReleaseGap> {
        let version = |browser: &str| {
            statement
                .record(browser)
                .and_then(|r| r.version_added.as_ref())
                .and_then(VersionAdded::as_version)
        };
        self.gaps.gap(
            platform.main_browser(),
            platform.webview_browser(),
            version(platform.main_browser()),
            version(platform.webview_browser()),
        )
    }
}
