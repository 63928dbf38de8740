//! Path lookup over arbitrary nested trees.
//!
//! Compat keys such as `api.Foo.bar` are dotted paths into the compat
//! dataset. The walk itself knows nothing about that dataset: any tree that
//! can hand out a child by name can be walked, which keeps the lookup
//! testable with small synthetic trees.

use serde_json::Value;

/// A node that can be descended into by segment name.
pub trait PathTree {
    /// Child node named `segment`, if any.
    fn child(&self, segment: &str) -> Option<&Self>;
}

impl PathTree for Value {
    fn child(&self, segment: &str) -> Option<&Value> {
        self.as_object()?.get(segment)
    }
}

/// Walk `root` one segment at a time, stopping at the first missing segment.
pub fn walk<'a, T, I, S>(root: &'a T, segments: I) -> Option<&'a T>
where
    T: PathTree + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .try_fold(root, |node, segment| node.child(segment.as_ref()))
}

/// Walk `root` along a `.`-separated path.
pub fn resolve_dotted<'a, T>(root: &'a T, path: &str) -> Option<&'a T>
where
    T: PathTree + ?Sized,
{
    walk(root, path.split('.'))
}
