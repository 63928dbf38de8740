//! Integration tests for webview-compat against the fixture datasets

use webview_compat::data::VersionAdded;
use webview_compat::prelude::*;
use webview_compat::{FeatureData, Overrides, ReleaseGap, WebviewSupport};
use serde_json::json;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn options_with_fixture_overrides() -> EnrichOptions {
    EnrichOptions {
        overrides: Overrides::from_path(&fixture_path("overrides.json"))
            .expect("Should load overrides"),
        ..EnrichOptions::default()
    }
}

fn enrich_fixtures() -> FeatureCatalog {
    WebviewCompatCore::enrich_files(
        &fixture_path("features.json"),
        &fixture_path("bcd.json"),
        &options_with_fixture_overrides(),
    )
    .expect("Should enrich fixtures")
    .catalog
}

fn feature<'a>(catalog: &'a FeatureCatalog, id: &str) -> &'a FeatureData {
    catalog[id]
        .as_feature()
        .unwrap_or_else(|| panic!("{} should be a feature", id))
}

fn computed<'a>(catalog: &'a FeatureCatalog, id: &str) -> &'a WebviewSupport {
    match feature(catalog, id).webview_support.as_ref() {
        Some(WebviewSupportEntry::Computed(support)) => support,
        other => panic!("{} should have computed support, got {:?}", id, other),
    }
}

fn levels(support: &WebviewSupport) -> (SupportLevel, SupportLevel, SupportLevel) {
    (support.all, support.android, support.ios)
}

#[test]
fn test_fully_supported_feature() {
    let catalog = enrich_fixtures();
    let support = computed(&catalog, "fully-supported");

    assert_eq!(support, &WebviewSupport::default());
}

#[test]
fn test_feature_missing_in_android_webview() {
    use webview_compat::SupportLevel::*;
    let catalog = enrich_fixtures();
    let support = computed(&catalog, "android-webview-missing");

    assert_eq!(levels(support), (Partial, Unsupported, Supported));
    assert_eq!(support.android_unsupported_compat_features, vec!["api.AndroidGap"]);
    assert!(support.ios_unsupported_compat_features.is_empty());
}

#[test]
fn test_feature_missing_in_every_webview() {
    use webview_compat::SupportLevel::*;
    let catalog = enrich_fixtures();
    let support = computed(&catalog, "nowhere-in-webview");

    assert_eq!(levels(support), (Unsupported, Unsupported, Unsupported));
    assert_eq!(support.android_unsupported_compat_features, vec!["api.NoWebview"]);
    assert_eq!(support.ios_unsupported_compat_features, vec!["api.NoWebview"]);
}

#[test]
fn test_non_baseline_gap_is_partial() {
    use webview_compat::SupportLevel::*;
    let catalog = enrich_fixtures();
    let support = computed(&catalog, "mixed-keys");

    assert_eq!(levels(support), (Partial, Partial, Supported));
    assert_eq!(support.android_unsupported_compat_features, vec!["api.Mixed.extra"]);
}

#[test]
fn test_feature_without_baseline_keys() {
    use webview_compat::SupportLevel::*;
    let catalog = enrich_fixtures();
    let support = computed(&catalog, "no-baseline-keys");

    assert_eq!(levels(support), (Partial, Unsupported, Supported));
    assert!(support.ios_unsupported_compat_features.is_empty());
}

#[test]
fn test_features_without_usable_keys_stay_supported() {
    let catalog = enrich_fixtures();

    for id in ["empty-feature", "dangling-key", "preview-only"] {
        assert_eq!(
            computed(&catalog, id),
            &WebviewSupport::default(),
            "{} should keep the optimistic default",
            id
        );
    }

    let dangling = feature(&catalog, "dangling-key");
    assert!(dangling
        .compat_keys()
        .all(|(_, key)| key.webview_support.is_none()));
}

#[test]
fn test_array_support_statements_are_unclassified() {
    use webview_compat::SupportLevel::*;
    let catalog = enrich_fixtures();
    let support = computed(&catalog, "array-support");

    // webview_android is an array: not supported against a supported chrome_android
    assert_eq!(levels(support), (Partial, Unsupported, Supported));
    assert_eq!(support.android_unsupported_compat_features, vec!["api.ArrayForm"]);
    // safari_ios is an array: no main-browser support to compare against
    assert!(support.ios_unsupported_compat_features.is_empty());

    let key = feature(&catalog, "array-support").status.as_ref().unwrap().by_compat_key
        ["api.ArrayForm"]
        .webview_support
        .clone()
        .expect("Resolvable keys should be annotated");
    assert_eq!(key.android, None);
    assert_eq!(key.ios, Some(VersionAdded::Version("16".into())));
    assert_eq!(key.android_gap, None);
    assert_eq!(key.ios_gap, None);
}

#[test]
fn test_partial_implementation_counts_as_unsupported() {
    use webview_compat::SupportLevel::*;
    let catalog = enrich_fixtures();
    let support = computed(&catalog, "partial-webview");
    assert_eq!(levels(support), (Partial, Unsupported, Supported));

    let status = feature(&catalog, "partial-webview").status.as_ref().unwrap();
    let annotation = status.by_compat_key["api.PartialImpl"]
        .webview_support
        .as_ref()
        .expect("Should annotate key");
    assert_eq!(annotation.android, Some(VersionAdded::False));
    // same release on both sides
    assert_eq!(annotation.android_gap, None);
}

#[test]
fn test_release_gaps_on_keys() {
    let catalog = enrich_fixtures();
    let status = feature(&catalog, "gapped").status.as_ref().unwrap();
    let annotation = status.by_compat_key["api.Gapped"]
        .webview_support
        .as_ref()
        .expect("Should annotate key");

    assert_eq!(annotation.android, Some(VersionAdded::Version("81".into())));
    assert_eq!(annotation.android_gap, Some(ReleaseGap { versions: 1, time: 63 }));
    assert_eq!(annotation.ios, Some(VersionAdded::Version("15".into())));
    assert_eq!(annotation.ios_gap, Some(ReleaseGap { versions: 1, time: 369 }));

    let preview = feature(&catalog, "preview-only").status.as_ref().unwrap();
    let annotation = preview.by_compat_key["api.Preview"]
        .webview_support
        .as_ref()
        .expect("Should annotate key");
    assert_eq!(annotation.android, Some(VersionAdded::Version("preview".into())));
    assert_eq!(annotation.android_gap, None);
    assert_eq!(annotation.ios_gap, None);
}

#[test]
fn test_override_applied_verbatim() {
    let catalog = enrich_fixtures();
    let overridden = feature(&catalog, "overridden-feature");

    assert_eq!(
        serde_json::to_value(&overridden.webview_support).unwrap(),
        json!({
            "all": "partial",
            "android": "supported",
            "ios": "partial",
            "ios_unsupported_compat_features": ["api.NoWebview"],
            "notes": "Verified manually in WKWebView"
        })
    );
    assert!(overridden
        .compat_keys()
        .all(|(_, key)| key.webview_support.is_none()));
}

#[test]
fn test_redirect_entries_unchanged() {
    let source = webview_compat::load_feature_catalog(&fixture_path("features.json"))
        .expect("Should load catalog");
    let catalog = enrich_fixtures();

    assert_eq!(catalog.len(), source.len());
    assert_eq!(catalog["old-name"], source["old-name"]);
    assert_eq!(catalog["split-feature"], source["split-feature"]);
    assert_eq!(
        catalog.keys().collect::<Vec<_>>(),
        source.keys().collect::<Vec<_>>()
    );
}

#[test]
fn test_all_unsupported_only_when_both_platforms_unsupported() {
    let catalog = enrich_fixtures();

    for entry in catalog.values() {
        let Some(support) = entry.as_feature().and_then(|f| f.webview_support.as_ref()) else {
            continue;
        };
        if support.all() == Some(SupportLevel::Unsupported) {
            assert_eq!(support.level(Platform::Android), Some(SupportLevel::Unsupported));
            assert_eq!(support.level(Platform::Ios), Some(SupportLevel::Unsupported));
        }
    }
}

#[test]
fn test_enrich_single_feature_through_redirect() {
    let catalog = webview_compat::load_feature_catalog(&fixture_path("features.json")).unwrap();
    let dataset = CompatDataset::from_path(&fixture_path("bcd.json")).unwrap();
    let options = EnrichOptions::default();

    let feature = WebviewCompatCore::enrich_feature(&catalog, &dataset, &options, "old-name")
        .expect("Should follow the redirect");
    assert_eq!(feature.name(), Some("Fully supported"));

    let err = WebviewCompatCore::enrich_feature(&catalog, &dataset, &options, "split-feature")
        .unwrap_err();
    assert!(matches!(err, WebviewCompatError::Integrity { .. }));
    assert!(err.to_string().contains("split-feature"));
}

#[test]
fn test_enriched_json_keeps_source_members() {
    let catalog = enrich_fixtures();
    let json = webview_compat::catalog_to_json(&catalog, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let fully = &value["fully-supported"];
    assert_eq!(fully["kind"], "feature");
    assert_eq!(fully["description"], "Works everywhere, including WebViews.");
    assert_eq!(fully["status"]["baseline_high_date"], "2023-03-16");
    assert_eq!(
        fully["webview_support"],
        json!({ "all": "supported", "android": "supported", "ios": "supported" })
    );
    assert_eq!(
        fully["status"]["by_compat_key"]["api.Good"]["webview_support"],
        json!({ "android": "80", "ios": "14" })
    );

    // the enriched output reads back as a catalog
    let reparsed = webview_compat::parse_feature_catalog(&json).unwrap();
    assert_eq!(reparsed.len(), catalog.len());
}
