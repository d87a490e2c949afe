//! Invocation records and the ignore-key filtering applied before comparison.
//!
//! A [`Props`] value is the full set of named inputs a component received at
//! one render. Before two renders are compared, the keys named in the
//! caller's [`IgnoreKeys`] are removed, yielding a [`FilteredView`]. Views
//! borrow the record they were derived from and are never stored.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use super::equal::deep_equal;
use crate::error::PeekError;

/// The named inputs passed to a monitored component at one render.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Props(Map<String, Value>);

impl Props {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from any value that serializes to a JSON object.
    ///
    /// Structs with named fields, maps keyed by strings, and
    /// `serde_json::json!({ .. })` literals all qualify.
    pub fn from_serialize<T: Serialize + ?Sized>(props: &T) -> Result<Self, PeekError> {
        Self::try_from(serde_json::to_value(props)?)
    }

    /// Insert or replace one named value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// View this record with the ignored keys removed.
    pub fn filtered<'a>(&'a self, ignore: &'a IgnoreKeys) -> FilteredView<'a> {
        FilteredView {
            props: self,
            ignore,
        }
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Props {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Props {
    type Error = PeekError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(PeekError::NotAnObject(value_kind(&other))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Key names excluded from comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreKeys(BTreeSet<String>);

impl IgnoreKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Options accepted by [`RenderMonitor::observe`](super::RenderMonitor::observe).
///
/// # Example
///
/// ```
/// use render_peek::PeekOptions;
///
/// let options = PeekOptions::new().ignore("on_click").ignore("style");
/// assert!(options.ignored().contains("on_click"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeekOptions {
    ignore_keys: IgnoreKeys,
}

impl PeekOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude one more key from comparison.
    pub fn ignore(mut self, key: impl Into<String>) -> Self {
        self.ignore_keys.insert(key);
        self
    }

    /// Replace the whole ignore set.
    pub fn ignore_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_keys = keys.into_iter().collect();
        self
    }

    pub fn ignored(&self) -> &IgnoreKeys {
        &self.ignore_keys
    }
}

/// A [`Props`] record with the ignored keys hidden.
#[derive(Debug, Clone, Copy)]
pub struct FilteredView<'a> {
    props: &'a Props,
    ignore: &'a IgnoreKeys,
}

impl<'a> FilteredView<'a> {
    /// Value for `key`, or `None` if absent or ignored.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        if self.ignore.contains(key) {
            return None;
        }
        self.props.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a String, &'a Value)> + '_ {
        self.props.iter().filter(|(key, _)| !self.ignore.contains(key))
    }

    pub fn len(&self) -> usize {
        if self.ignore.is_empty() {
            return self.props.len();
        }
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deep structural equality against another filtered view.
    pub fn deep_eq(&self, other: &FilteredView<'_>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|theirs| deep_equal(value, theirs)))
    }

    /// Materialize the view as an owned record.
    pub fn to_props(&self) -> Props {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct CardProps {
        title: String,
        width: u16,
    }

    #[test]
    fn test_from_serialize_struct() {
        let props = Props::from_serialize(&CardProps {
            title: "Inbox".to_string(),
            width: 40,
        })
        .unwrap();

        assert_eq!(props.len(), 2);
        assert_eq!(props.get("title"), Some(&json!("Inbox")));
        assert_eq!(props.get("width"), Some(&json!(40)));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = Props::try_from(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, PeekError::NotAnObject("an array")));

        let err = Props::from_serialize(&42u8).unwrap_err();
        assert!(err.to_string().contains("a number"));
    }

    #[test]
    fn test_filtered_view_hides_ignored_keys() {
        let props = Props::try_from(json!({ "a": 1, "cb": "fn#1", "b": 2 })).unwrap();
        let ignore: IgnoreKeys = ["cb"].into_iter().collect();
        let view = props.filtered(&ignore);

        assert_eq!(view.len(), 2);
        assert!(view.get("cb").is_none());
        assert_eq!(view.get("a"), Some(&json!(1)));
        assert_eq!(view.to_props(), Props::try_from(json!({ "a": 1, "b": 2 })).unwrap());
    }

    #[test]
    fn test_ignoring_absent_key_is_harmless() {
        let props = Props::try_from(json!({ "a": 1 })).unwrap();
        let ignore: IgnoreKeys = ["missing"].into_iter().collect();
        assert_eq!(props.filtered(&ignore).len(), 1);
    }

    #[test]
    fn test_filtered_views_compare_without_ignored_keys() {
        let ignore: IgnoreKeys = ["cb"].into_iter().collect();
        let first = Props::try_from(json!({ "a": 1, "cb": "fn#1" })).unwrap();
        let second = Props::try_from(json!({ "a": 1, "cb": "fn#2" })).unwrap();

        assert!(first.filtered(&ignore).deep_eq(&second.filtered(&ignore)));

        let none = IgnoreKeys::new();
        assert!(!first.filtered(&none).deep_eq(&second.filtered(&none)));
    }

    #[test]
    fn test_filtered_view_detects_extra_key() {
        let ignore = IgnoreKeys::new();
        let first = Props::try_from(json!({ "a": 1 })).unwrap();
        let second = Props::try_from(json!({ "a": 1, "b": null })).unwrap();
        assert!(!first.filtered(&ignore).deep_eq(&second.filtered(&ignore)));
        assert!(!second.filtered(&ignore).deep_eq(&first.filtered(&ignore)));
    }

    #[test]
    fn test_options_builder() {
        let options = PeekOptions::new().ignore("a").ignore("b");
        assert!(options.ignored().contains("a"));
        assert!(options.ignored().contains("b"));

        let replaced = options.ignore_keys(["c"]);
        assert!(!replaced.ignored().contains("a"));
        assert_eq!(replaced.ignored().iter().collect::<Vec<_>>(), vec!["c"]);
    }
}
