//! Release gap between a main browser version and its WebView counterpart.
//!
//! Two measures are reported: how many releases apart the two versions are
//! in the main browser's release history, and how many days separate their
//! release dates. `None` means the gap is unknown or there is none; a zero
//! gap is never returned.

use crate::analyzer::version_order::sorted_versions;
use crate::data::compat::{CompatDataset, PREVIEW};
use crate::data::webview::ReleaseGap;

/// Version with any pre-release suffix (`-beta`, ...) removed.
pub fn sanitize_version(version: &str) -> &str {
    version.split_once('-').map_or(version, |(head, _)| head)
}

pub struct ReleaseGapCalculator<'a> {
    dataset: &'a CompatDataset,
}

impl<'a> ReleaseGapCalculator<'a> {
    pub fn new(dataset: &'a CompatDataset) -> Self {
        Self { dataset }
    }

    /// Gap from `main_version` of `main_browser` to `webview_version` of
    /// `webview_browser`.
    pub fn gap(
        &self,
        main_browser: &str,
        webview_browser: &str,
        main_version: Option<&str>,
        webview_version: Option<&str>,
    ) -> Option<ReleaseGap> {
        let (main_version, webview_version) = (main_version?, webview_version?);
        if main_version == PREVIEW || webview_version == PREVIEW {
            return None;
        }
        let main_version = sanitize_version(main_version);
        let webview_version = sanitize_version(webview_version);

        let main_releases = self.dataset.releases(main_browser)?;
        let webview_releases = self.dataset.releases(webview_browser)?;

        let main_date = main_releases.get(main_version)?.date()?;
        let webview_date = webview_releases.get(webview_version)?.date()?;
        let time = (webview_date - main_date).num_days();

        let ordering = sorted_versions(main_releases.keys());
        let main_index = ordering.iter().position(|v| *v == main_version)?;
        let webview_index = ordering.iter().position(|v| *v == webview_version)?;
        let versions = main_index.abs_diff(webview_index);

        if versions > 0 || time != 0 {
            Some(ReleaseGap { versions, time })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset() -> CompatDataset {
        CompatDataset::from_value(json!({
            "browsers": {
                "chrome_android": {
                    "releases": {
                        "100": { "release_date": "2022-03-29" },
                        "98": { "release_date": "2022-02-01" },
                        "99": { "release_date": "2022-03-01" },
                        "97": { "release_date": "2022-01-04" },
                        "preview": { "status": "nightly" }
                    }
                },
                "webview_android": {
                    "releases": {
                        "97": { "release_date": "2022-01-04" },
                        "98": { "release_date": "2022-04-08" },
                        "99": { "release_date": "2022-03-01" },
                        "100": { "release_date": "2022-03-29" },
                        "101": { "release_date": "2022-04-26" }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_gap_counts_releases_and_days() {
        let ds = dataset();
        let calc = ReleaseGapCalculator::new(&ds);
        let gap = calc.gap("chrome_android", "webview_android", Some("100"), Some("98"));
        assert_eq!(gap, Some(ReleaseGap { versions: 2, time: 10 }));
    }

    #[test]
    fn test_negative_time_when_webview_first() {
        let ds = dataset();
        let calc = ReleaseGapCalculator::new(&ds);
        let gap = calc.gap("chrome_android", "webview_android", Some("100"), Some("97"));
        assert_eq!(gap, Some(ReleaseGap { versions: 3, time: -84 }));
    }

    #[test]
    fn test_same_release_is_no_gap() {
        let ds = dataset();
        let calc = ReleaseGapCalculator::new(&ds);
        assert_eq!(
            calc.gap("chrome_android", "webview_android", Some("99"), Some("99")),
            None
        );
    }

    #[test]
    fn test_preview_is_no_gap() {
        let ds = dataset();
        let calc = ReleaseGapCalculator::new(&ds);
        assert_eq!(
            calc.gap("chrome_android", "webview_android", Some("preview"), Some("99")),
            None
        );
        assert_eq!(
            calc.gap("chrome_android", "webview_android", Some("99"), Some("preview")),
            None
        );
    }

    #[test]
    fn test_unknown_release_is_no_gap() {
        let ds = dataset();
        let calc = ReleaseGapCalculator::new(&ds);
        // 101 has a webview date but is not in the main browser's history
        assert_eq!(
            calc.gap("chrome_android", "webview_android", Some("100"), Some("101")),
            None
        );
        assert_eq!(
            calc.gap("chrome_android", "webview_android", Some("50"), Some("99")),
            None
        );
        assert_eq!(
            calc.gap("chrome_android", "webview_ios", Some("99"), Some("99")),
            None
        );
        assert_eq!(calc.gap("chrome_android", "webview_android", None, Some("99")), None);
    }

    #[test]
    fn test_prerelease_suffix_stripped() {
        let ds = dataset();
        let calc = ReleaseGapCalculator::new(&ds);
        let gap = calc.gap("chrome_android", "webview_android", Some("100-beta"), Some("98"));
        assert_eq!(gap, Some(ReleaseGap { versions: 2, time: 10 }));
        assert_eq!(sanitize_version("16.4-rc1"), "16.4");
        assert_eq!(sanitize_version("16.4"), "16.4");
    }
}
