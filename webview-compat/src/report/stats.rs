//! Unsupported-feature counts over an enriched catalog.

use serde::Serialize;

use crate::data::features::{Baseline, FeatureCatalog, FeatureData};
use crate::data::webview::{Platform, SupportLevel};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsBucket {
    pub total: usize,
    pub all_unsupported: usize,
    pub android_unsupported: usize,
    pub ios_unsupported: usize,
}

impl StatsBucket {
    fn count(&mut self, feature: &FeatureData) {
        self.total += 1;
        let Some(entry) = feature.webview_support.as_ref() else {
            return;
        };
        if entry.all() == Some(SupportLevel::Unsupported) {
            self.all_unsupported += 1;
        }
        if entry.level(Platform::Android) == Some(SupportLevel::Unsupported) {
            self.android_unsupported += 1;
        }
        if entry.level(Platform::Ios) == Some(SupportLevel::Unsupported) {
            self.ios_unsupported += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WebviewStats {
    pub all: StatsBucket,
    /// Widely available (`baseline: "high"`) features.
    pub widely: StatsBucket,
    /// Newly available (`baseline: "low"`) features.
    pub newly: StatsBucket,
}

impl WebviewStats {
    pub fn from_catalog(catalog: &FeatureCatalog) -> Self {
        let mut stats = Self::default();
        for feature in catalog.values().filter_map(|e| e.as_feature()) {
            stats.all.count(feature);
            match feature.baseline() {
                Baseline::High => stats.widely.count(feature),
                Baseline::Low => stats.newly.count(feature),
                Baseline::False => {}
            }
        }
        stats
    }

    /// Aligned plain-text summary.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (title, bucket) in [
            ("Total features:", &self.all),
            ("Total widely features:", &self.widely),
            ("Total newly features:", &self.newly),
        ] {
            out.push_str(&format!("{:<32}{}\n", title, bucket.total));
            out.push_str(&format!("{:<32}{}\n", "All webview unsupported:", bucket.all_unsupported));
            out.push_str(&format!(
                "{:<32}{}\n",
                "Android webview unsupported:", bucket.android_unsupported
            ));
            out.push_str(&format!("{:<32}{}\n\n", "iOS webview unsupported:", bucket.ios_unsupported));
        }
        out
    }
}
