//! Uniform access into untyped JSON documents.
//!
//! Every read the adapter performs on upstream payloads goes through
//! [`Doc`]. A missing key, a `null`, and a node of the wrong type all
//! collapse to the same "absent" state, so callers never branch on shape.

use serde_json::{Map, Value};

use crate::coerce::to_array;

static NULL: Value = Value::Null;

/// A cursor into an untyped document that may point at nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Doc<'a>(Option<&'a Value>);

impl<'a> Doc<'a> {
    #[must_use]
    pub fn root(value: &'a Value) -> Self {
        Self(Some(value))
    }

    #[must_use]
    pub fn absent() -> Self {
        Self(None)
    }

    /// Step into an object member. Non-objects yield an absent cursor.
    #[must_use]
    pub fn get(self, key: &str) -> Self {
        Self(self.0.and_then(Value::as_object).and_then(|map| map.get(key)))
    }

    /// Step through a sequence of object members.
    #[must_use]
    pub fn path(self, keys: &[&str]) -> Self {
        keys.iter().fold(self, |doc, key| doc.get(key))
    }

    /// Present and not `null`.
    #[must_use]
    pub fn is_present(self) -> bool {
        matches!(self.0, Some(value) if !value.is_null())
    }

    /// JavaScript-style truthiness: everything except absent, `null`,
    /// `false`, `0`, and `""`.
    #[must_use]
    pub fn is_truthy(self) -> bool {
        match self.0 {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(text)) => !text.is_empty(),
            Some(Value::Array(_) | Value::Object(_)) => true,
        }
    }

    #[must_use]
    pub fn as_object(self) -> Option<&'a Map<String, Value>> {
        self.0.and_then(Value::as_object)
    }

    #[must_use]
    pub fn as_str(self) -> Option<&'a str> {
        self.0.and_then(Value::as_str)
    }

    #[must_use]
    pub fn is_list(self) -> bool {
        matches!(self.0, Some(Value::Array(_)))
    }

    /// Array elements as cursors; anything but an array yields nothing.
    pub fn items(self) -> impl Iterator<Item = Doc<'a>> {
        to_array(self.value()).iter().map(Doc::root)
    }

    #[must_use]
    pub fn non_empty_list(self) -> bool {
        !to_array(self.value()).is_empty()
    }

    /// The underlying value, or `null` when absent.
    #[must_use]
    pub fn value(self) -> &'a Value {
        self.0.unwrap_or(&NULL)
    }
}
