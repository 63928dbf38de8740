//! Support classification for a single browser's support record.
//!
//! [`is_supported`] answers the boolean question used to compare a main
//! browser against its WebView. [`webview_version_or_false`] keeps the raw
//! version as a per-key annotation and leaves `preview` as it is.

use crate::data::compat::{SupportRecord, VersionAdded};

/// Fully supported: not a partial implementation and added in a released version.
pub fn is_supported(record: Option<&SupportRecord>) -> bool {
    let Some(record) = record else {
        return false;
    };
    if record.is_partial() {
        return false;
    }
    record
        .version_added
        .as_ref()
        .is_some_and(|v| v.is_truthy() && !v.is_preview())
}

/// `false` for partial implementations, else `version_added` unchanged.
pub fn webview_version_or_false(record: Option<&SupportRecord>) -> Option<VersionAdded> {
    let record = record?;
    if record.is_partial() {
        return Some(VersionAdded::False);
    }
    record.version_added.clone()
}
