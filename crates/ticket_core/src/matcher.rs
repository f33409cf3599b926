use serde::{Deserialize, Serialize};

use crate::Attribute;

/// True if `attrs` holds an attribute with exactly this key and value.
pub fn has_attr(attrs: &[Attribute], key: &str, value: &str) -> bool {
    attrs.iter().any(|a| a.key == key && a.value == value)
}

/// Value of the first attribute named `key`.
pub fn attr_value<'a>(attrs: &'a [Attribute], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.value.as_str())
}

/// Identifies a tag by name plus one `key="value"` attribute,
/// e.g. `<article itemprop="tickets">`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMarker {
    pub tag: String,
    pub key: String,
    pub value: String,
}

impl TagMarker {
    pub fn new(tag: &str, key: &str, value: &str) -> Self {
        Self {
            tag: tag.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn matches(&self, name: &str, attrs: &[Attribute]) -> bool {
        name == self.tag && has_attr(attrs, &self.key, &self.value)
    }
}
