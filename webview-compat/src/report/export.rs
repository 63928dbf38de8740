//! Row-oriented CSV exports of an enriched catalog.
//!
//! Three layouts: one row per feature, one detailed row per feature with the
//! main browsers alongside, and one row per (feature, compat key).

use std::io::Write;

use serde::Serialize;

use crate::core::WebviewCompatError;
use crate::data::features::{support_lists, FeatureCatalog, FeatureData};
use crate::data::webview::{Platform, SupportLevel, WebviewSupportEntry};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A serializable CSV row with a fixed column list.
///
/// The csv writer derives the header from the first serialized row, so an
/// empty table falls back to `HEADERS`. They must match the serde names.
pub trait CsvRow: Serialize {
    const HEADERS: &'static [&'static str];
}

/// One row per feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRow {
    pub id: String,
    pub baseline: &'static str,
    pub webview_all: &'static str,
    pub webview_android: &'static str,
    pub webview_ios: &'static str,
    pub webview_android_unsupported_compat_features: String,
    pub webview_ios_unsupported_compat_features: String,
}

impl CsvRow for FeatureRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "baseline",
        "webview_all",
        "webview_android",
        "webview_ios",
        "webview_android_unsupported_compat_features",
        "webview_ios_unsupported_compat_features",
    ];
}

/// One row per feature, alongside the main browsers' feature-level support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedFeatureRow {
    #[serde(rename = "feature ID")]
    pub feature_id: String,
    #[serde(rename = "baseline status")]
    pub baseline_status: &'static str,
    #[serde(rename = "webview support")]
    pub webview_support: &'static str,
    pub chrome_android: &'static str,
    pub webview_android: &'static str,
    pub unsupported_compat_keys_android: String,
    #[serde(rename = "safari_ios support")]
    pub safari_ios_support: &'static str,
    pub webview_ios: &'static str,
    pub unsupported_compat_keys_ios: String,
}

impl CsvRow for DetailedFeatureRow {
    const HEADERS: &'static [&'static str] = &[
        "feature ID",
        "baseline status",
        "webview support",
        "chrome_android",
        "webview_android",
        "unsupported_compat_keys_android",
        "safari_ios support",
        "webview_ios",
        "unsupported_compat_keys_ios",
    ];
}

/// One row per (feature, compat key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatKeyRow {
    #[serde(rename = "feature ID")]
    pub feature_id: String,
    #[serde(rename = "BCD key")]
    pub bcd_key: String,
    #[serde(rename = "overall baseline status")]
    pub overall_baseline_status: &'static str,
    #[serde(rename = "key baseline status")]
    pub key_baseline_status: &'static str,
    pub webview_support_overall: &'static str,
    pub chrome_android_overall: &'static str,
    pub webview_android_overall: &'static str,
    pub chrome_android_key: &'static str,
    pub webview_android_key: String,
    pub safari_ios_overall: &'static str,
    pub webview_ios_overall: &'static str,
    pub safari_ios_key: &'static str,
    pub webview_ios_key: String,
}

impl CsvRow for CompatKeyRow {
    const HEADERS: &'static [&'static str] = &[
        "feature ID",
        "BCD key",
        "overall baseline status",
        "key baseline status",
        "webview_support_overall",
        "chrome_android_overall",
        "webview_android_overall",
        "chrome_android_key",
        "webview_android_key",
        "safari_ios_overall",
        "webview_ios_overall",
        "safari_ios_key",
        "webview_ios_key",
    ];
}

fn level_str(level: Option<SupportLevel>) -> &'static str {
    level.map_or("", SupportLevel::as_str)
}

fn webview_levels(entry: Option<&WebviewSupportEntry>) -> [&'static str; 3] {
    [
        level_str(entry.and_then(WebviewSupportEntry::all)),
        level_str(entry.and_then(|e| e.level(Platform::Android))),
        level_str(entry.and_then(|e| e.level(Platform::Ios))),
    ]
}

fn unsupported_keys(entry: Option<&WebviewSupportEntry>, platform: Platform, sep: &str) -> String {
    entry
        .map(|e| e.unsupported_compat_features(platform).join(sep))
        .unwrap_or_default()
}

fn supported_str(supported: bool) -> &'static str {
    if supported {
        "supported"
    } else {
        "unsupported"
    }
}

/// Feature-level support of a main browser.
fn browser_overall(feature: &FeatureData, browser: &str) -> &'static str {
    if feature.is_discouraged() {
        return "discouraged";
    }
    supported_str(
        feature
            .status
            .as_ref()
            .is_some_and(|s| support_lists(&s.support, browser)),
    )
}

/// Compat-key-level support of a main browser.
fn browser_for_key(feature: &FeatureData, key: &str, browser: &str) -> &'static str {
    if feature.is_discouraged() {
        return "discouraged";
    }
    supported_str(
        feature
            .status
            .as_ref()
            .and_then(|s| s.by_compat_key.get(key))
            .is_some_and(|k| support_lists(&k.support, browser)),
    )
}

fn features(catalog: &FeatureCatalog) -> impl Iterator<Item = (&String, &FeatureData)> {
    catalog
        .iter()
        .filter_map(|(id, entry)| entry.as_feature().map(|f| (id, f)))
}

pub fn feature_rows(catalog: &FeatureCatalog) -> Vec<FeatureRow> {
    features(catalog)
        .map(|(id, feature)| {
            let entry = feature.webview_support.as_ref();
            let [all, android, ios] = webview_levels(entry);
            FeatureRow {
                id: id.clone(),
                baseline: feature.baseline().as_str(),
                webview_all: all,
                webview_android: android,
                webview_ios: ios,
                webview_android_unsupported_compat_features: unsupported_keys(
                    entry,
                    Platform::Android,
                    ", ",
                ),
                webview_ios_unsupported_compat_features: unsupported_keys(
                    entry,
                    Platform::Ios,
                    ", ",
                ),
            }
        })
        .collect()
}

pub fn detailed_feature_rows(catalog: &FeatureCatalog) -> Vec<DetailedFeatureRow> {
    features(catalog)
        .map(|(id, feature)| {
            let entry = feature.webview_support.as_ref();
            let [all, android, ios] = webview_levels(entry);
            DetailedFeatureRow {
                feature_id: id.clone(),
                baseline_status: feature.baseline().as_str(),
                webview_support: all,
                chrome_android: supported_str(feature.status.as_ref().is_some_and(|s| {
                    support_lists(&s.support, Platform::Android.main_browser())
                })),
                webview_android: android,
                unsupported_compat_keys_android: unsupported_keys(entry, Platform::Android, ","),
                safari_ios_support: supported_str(feature.status.as_ref().is_some_and(|s| {
                    support_lists(&s.support, Platform::Ios.main_browser())
                })),
                webview_ios: ios,
                unsupported_compat_keys_ios: unsupported_keys(entry, Platform::Ios, ","),
            }
        })
        .collect()
}

pub fn compat_key_rows(catalog: &FeatureCatalog) -> Vec<CompatKeyRow> {
    let mut rows = Vec::new();
    for (id, feature) in features(catalog) {
        let entry = feature.webview_support.as_ref();
        let [all, android, ios] = webview_levels(entry);
        let overall_baseline = if feature.is_discouraged() {
            "discouraged"
        } else {
            feature.baseline().as_str()
        };

        for (key, key_status) in feature.compat_keys() {
            let annotation = key_status.webview_support.as_ref();
            let webview_key = |platform: Platform| {
                annotation
                    .and_then(|a| a.version(platform))
                    .map(ToString::to_string)
                    .unwrap_or_default()
            };
            rows.push(CompatKeyRow {
                feature_id: id.clone(),
                bcd_key: key.clone(),
                overall_baseline_status: overall_baseline,
                key_baseline_status: key_status.baseline.as_str(),
                webview_support_overall: all,
                chrome_android_overall: browser_overall(feature, Platform::Android.main_browser()),
                webview_android_overall: android,
                chrome_android_key: browser_for_key(feature, key, Platform::Android.main_browser()),
                webview_android_key: webview_key(Platform::Android),
                safari_ios_overall: browser_overall(feature, Platform::Ios.main_browser()),
                webview_ios_overall: ios,
                safari_ios_key: browser_for_key(feature, key, Platform::Ios.main_browser()),
                webview_ios_key: webview_key(Platform::Ios),
            });
        }
    }
    rows
}

/// Write `rows` as CSV with a header row, optionally prefixed by a UTF-8 BOM.
pub fn write_csv<W: Write, R: CsvRow>(
    mut writer: W,
    rows: &[R],
    bom: bool,
) -> Result<(), WebviewCompatError> {
    if bom {
        writer.write_all(UTF8_BOM)?;
    }
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer.write_record(R::HEADERS)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render `rows` to a CSV string.
pub fn to_csv_string<R: CsvRow>(rows: &[R], bom: bool) -> Result<String, WebviewCompatError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, rows, bom)?;
    String::from_utf8(buffer).map_err(|e| WebviewCompatError::Other(e.to_string()))
}
