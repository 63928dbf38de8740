//! Tests for CSV and statistics reports over the enriched fixtures

use webview_compat::prelude::*;
use webview_compat::report::{compat_key_rows, feature_rows, to_csv_string, write_csv, StatsBucket};
use webview_compat::Overrides;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn enrich_fixtures() -> FeatureCatalog {
    let options = EnrichOptions {
        overrides: Overrides::from_path(&fixture_path("overrides.json")).unwrap(),
        ..EnrichOptions::default()
    };
    WebviewCompatCore::enrich_files(
        &fixture_path("features.json"),
        &fixture_path("bcd.json"),
        &options,
    )
    .expect("Should enrich fixtures")
    .catalog
}

#[test]
fn test_stats_over_fixtures() {
    let stats = WebviewStats::from_catalog(&enrich_fixtures());

    assert_eq!(
        stats.all,
        StatsBucket {
            total: 12,
            all_unsupported: 1,
            android_unsupported: 5,
            ios_unsupported: 1,
        }
    );
    assert_eq!(
        stats.widely,
        StatsBucket {
            total: 7,
            all_unsupported: 1,
            android_unsupported: 3,
            ios_unsupported: 1,
        }
    );
    assert_eq!(
        stats.newly,
        StatsBucket {
            total: 2,
            all_unsupported: 0,
            android_unsupported: 1,
            ios_unsupported: 0,
        }
    );
}

#[test]
fn test_feature_rows_cover_features_only() {
    let rows = feature_rows(&enrich_fixtures());

    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r.id != "old-name" && r.id != "split-feature"));

    let overridden = rows.iter().find(|r| r.id == "overridden-feature").unwrap();
    assert_eq!(overridden.webview_ios, "partial");
    assert_eq!(overridden.webview_ios_unsupported_compat_features, "api.NoWebview");
}

#[test]
fn test_compat_key_rows_for_discouraged_feature() {
    let rows = compat_key_rows(&enrich_fixtures());
    let row = rows
        .iter()
        .find(|r| r.feature_id == "nowhere-in-webview")
        .expect("Should have a row per compat key");

    assert_eq!(row.bcd_key, "api.NoWebview");
    assert_eq!(row.overall_baseline_status, "discouraged");
    assert_eq!(row.key_baseline_status, "high");
    assert_eq!(row.webview_support_overall, "unsupported");
    assert_eq!(row.chrome_android_key, "discouraged");
    assert_eq!(row.webview_android_key, "false");
    assert_eq!(row.webview_ios_key, "false");

    let mixed: Vec<_> = rows.iter().filter(|r| r.feature_id == "mixed-keys").collect();
    assert_eq!(mixed.len(), 2);
    assert_eq!(mixed[1].bcd_key, "api.Mixed.extra");
    assert_eq!(mixed[1].chrome_android_key, "supported");
    assert_eq!(mixed[1].webview_android_key, "false");
    assert_eq!(mixed[1].webview_ios_key, "16");
}

#[test]
fn test_csv_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("features.csv");
    let rows = feature_rows(&enrich_fixtures());

    let file = std::fs::File::create(&path).unwrap();
    write_csv(file, &rows, false).expect("Should write CSV");

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,baseline,webview_all,webview_android,webview_ios,webview_android_unsupported_compat_features,webview_ios_unsupported_compat_features")
    );
    assert_eq!(lines.count(), 12);
    assert_eq!(to_csv_string(&rows, false).unwrap(), content);
}
