//! webview-compat - WebView support for web platform features
//!
//! This library cross-references a web-features catalog with browser compat
//! data (BCD) and derives whether each feature works in Android WebView and
//! iOS WKWebView, not just in Chrome for Android and Safari on iOS.
//!
//! # Quick Start
//!
//! ```no_run
//! use webview_compat::{EnrichOptions, WebviewCompatCore};
//! use std::path::Path;
//!
//! let options = EnrichOptions::with_builtin_overrides().unwrap();
//! let result = WebviewCompatCore::enrich_files(
//!     Path::new("web-features.json"),
//!     Path::new("bcd.json"),
//!     &options,
//! ).unwrap();
//!
//! for (id, entry) in &result.catalog {
//!     if let Some(feature) = entry.as_feature() {
//!         let all = feature.webview_support.as_ref().and_then(|s| s.all());
//!         println!("{}: {:?}", id, all);
//!     }
//! }
//! ```
//!
//! # Features
//!
//! - **Feature-level support**: `supported` / `partial` / `unsupported` per
//!   platform and overall, with the compat keys responsible
//! - **Compat-key annotations**: WebView version added and release gap
//!   behind the main browser
//! - **Overrides**: curated results applied verbatim
//! - **Reports**: CSV tables and unsupported-feature statistics

pub mod analyzer;
pub mod core;
pub mod data;
pub mod report;
pub mod tree;

// Re-export main types
pub use crate::core::{
    catalog_to_json, EnrichOptions, EnrichmentResult, WebviewCompatCore, WebviewCompatError,
};
pub use analyzer::{DatasetWalker, FeatureEnricher, ReleaseGapCalculator, WalkStats};
pub use data::{
    load_feature_catalog, parse_feature_catalog, Baseline, CompatDataset, FeatureCatalog,
    FeatureData, FeatureEntry, Overrides, Platform, ReleaseGap, SupportLevel, WebviewSupport,
    WebviewSupportEntry,
};
pub use report::WebviewStats;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CompatDataset, EnrichOptions, EnrichmentResult, FeatureCatalog, FeatureEntry, Platform,
        SupportLevel, WebviewCompatCore, WebviewCompatError, WebviewStats, WebviewSupportEntry,
    };
}
