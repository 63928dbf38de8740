//! Reports over an enriched catalog: CSV tables and summary statistics.

pub mod export;
pub mod stats;

pub use export::{
    compat_key_rows, detailed_feature_rows, feature_rows, to_csv_string, write_csv, CompatKeyRow,
    CsvRow, DetailedFeatureRow, FeatureRow,
};
pub use stats::{StatsBucket, WebviewStats};
