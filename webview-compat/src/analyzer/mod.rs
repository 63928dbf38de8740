//! WebView support analysis
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │   Feature    │───▶│   Dataset    │───▶│   Feature    │
//! │   Catalog    │    │    Walker    │    │   Enricher   │
//! └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                │  per compat key
//!                              ┌─────────────────┴─────────────────┐
//!                              ▼                                   ▼
//!                      ┌──────────────┐                    ┌──────────────┐
//!                      │   Support    │                    │ Release Gap  │
//!                      │  Classifier  │                    │  Calculator  │
//!                      └──────────────┘                    └──────────────┘
//! ```

pub mod enricher;
pub mod release_gap;
pub mod support;
pub mod version_order;
pub mod walker;

pub use enricher::FeatureEnricher;
pub use release_gap::ReleaseGapCalculator;
pub use support::{is_supported, webview_version_or_false};
pub use walker::{DatasetWalker, WalkStats};
