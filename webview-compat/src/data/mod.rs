//! Input and output data models.

pub mod compat;
pub mod features;
pub mod overrides;
pub mod webview;

pub use compat::{
    BrowserStatement, CompatDataset, CompatStatement, ReleaseStatement, SupportRecord,
    SupportStatement, VersionAdded,
};
pub use features::{
    load_feature_catalog, parse_feature_catalog, Baseline, CompatKeyStatus, FeatureCatalog,
    FeatureData, FeatureEntry, FeatureStatus, MovedData, SplitData,
};
pub use overrides::Overrides;
pub use webview::{
    CompatKeyWebviewSupport, Platform, ReleaseGap, SupportLevel, WebviewSupport,
    WebviewSupportEntry,
};
