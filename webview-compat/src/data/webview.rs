//! WebView support annotations attached to enriched features.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::compat::VersionAdded;

/// Browser id of Chrome for Android.
pub const CHROME_ANDROID: &str = "chrome_android";
/// Browser id of Android WebView.
pub const WEBVIEW_ANDROID: &str = "webview_android";
/// Browser id of Safari on iOS.
pub const SAFARI_IOS: &str = "safari_ios";
/// Browser id of WKWebView on iOS.
pub const WEBVIEW_IOS: &str = "webview_ios";

/// Three-state WebView support classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportLevel {
    Supported,
    Partial,
    Unsupported,
}

impl SupportLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            SupportLevel::Supported => "supported",
            SupportLevel::Partial => "partial",
            SupportLevel::Unsupported => "unsupported",
        }
    }

    /// Combine the two platform levels into the `all` level.
    pub fn aggregate(android: SupportLevel, ios: SupportLevel) -> SupportLevel {
        match (android, ios) {
            (SupportLevel::Unsupported, SupportLevel::Unsupported) => SupportLevel::Unsupported,
            (SupportLevel::Supported, SupportLevel::Supported) => SupportLevel::Supported,
            _ => SupportLevel::Partial,
        }
    }
}

/// A mobile platform with a main browser and its WebView counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub fn main_browser(self) -> &'static str {
        match self {
            Platform::Android => CHROME_ANDROID,
            Platform::Ios => SAFARI_IOS,
        }
    }

    pub fn webview_browser(self) -> &'static str {
        match self {
            Platform::Android => WEBVIEW_ANDROID,
            Platform::Ios => WEBVIEW_IOS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

/// Lag between a main browser release and the matching WebView release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseGap {
    /// Number of releases between the two versions.
    pub versions: usize,
    /// Days from the main browser release to the WebView release.
    pub time: i64,
}

/// Feature-level WebView support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebviewSupport {
    pub all: SupportLevel,
    pub android: SupportLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub android_unsupported_compat_features: Vec<String>,
    pub ios: SupportLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ios_unsupported_compat_features: Vec<String>,
}

impl Default for WebviewSupport {
    fn default() -> Self {
        Self {
            all: SupportLevel::Supported,
            android: SupportLevel::Supported,
            android_unsupported_compat_features: Vec::new(),
            ios: SupportLevel::Supported,
            ios_unsupported_compat_features: Vec::new(),
        }
    }
}

impl WebviewSupport {
    pub fn level(&self, platform: Platform) -> SupportLevel {
        match platform {
            Platform::Android => self.android,
            Platform::Ios => self.ios,
        }
    }

    pub fn unsupported_compat_features(&self, platform: Platform) -> &[String] {
        match platform {
            Platform::Android => &self.android_unsupported_compat_features,
            Platform::Ios => &self.ios_unsupported_compat_features,
        }
    }
}

/// WebView support attached to a feature: computed, or taken verbatim from overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WebviewSupportEntry {
    Computed(WebviewSupport),
    Overridden(Value),
}

impl WebviewSupportEntry {
    pub fn all(&self) -> Option<SupportLevel> {
        match self {
            WebviewSupportEntry::Computed(support) => Some(support.all),
            WebviewSupportEntry::Overridden(value) => level_member(value, "all"),
        }
    }

    pub fn level(&self, platform: Platform) -> Option<SupportLevel> {
        match self {
            WebviewSupportEntry::Computed(support) => Some(support.level(platform)),
            WebviewSupportEntry::Overridden(value) => level_member(value, platform.as_str()),
        }
    }

    pub fn unsupported_compat_features(&self, platform: Platform) -> Vec<String> {
        match self {
            WebviewSupportEntry::Computed(support) => {
                support.unsupported_compat_features(platform).to_vec()
            }
            WebviewSupportEntry::Overridden(value) => value
                .get(format!("{}_unsupported_compat_features", platform.as_str()))
                .and_then(Value::as_array)
                .map(|keys| {
                    keys.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn is_overridden(&self) -> bool {
        matches!(self, WebviewSupportEntry::Overridden(_))
    }
}

fn level_member(value: &Value, member: &str) -> Option<SupportLevel> {
    SupportLevel::deserialize(value.get(member)?).ok()
}

/// Per-compat-key WebView annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatKeyWebviewSupport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<VersionAdded>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<VersionAdded>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_gap: Option<ReleaseGap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios_gap: Option<ReleaseGap>,
}

impl CompatKeyWebviewSupport {
    pub fn version(&self, platform: Platform) -> Option<&VersionAdded> {
        match platform {
            Platform::Android => self.android.as_ref(),
            Platform::Ios => self.ios.as_ref(),
        }
    }
}
