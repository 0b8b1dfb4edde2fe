use std::{fmt, mem};

use serde::{Serialize, Serializer, ser::SerializeStruct as _};

use crate::render::Render;

/// A key-value pair stored in a table.
///
/// The key is fixed once the entry is created; the value can be replaced in
/// place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replaces the value, returning the previous one.
    pub fn set_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    #[must_use]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: Render, V: Render> Render for Entry<K, V> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.render(f)?;
        f.write_str("=")?;
        self.value.render(f)
    }
}

impl<K: Render, V: Render> fmt::Display for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl<K: Serialize, V: Serialize> Serialize for Entry<K, V> {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = ser.serialize_struct("Entry", 2)?;
        state.serialize_field("key", &self.key)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn value_is_mutable_in_place() {
        let mut entry = Entry::new(6, "A");
        assert_eq!(entry.set_value("A+"), "A");
        assert_eq!(entry.value(), &"A+");
        assert_eq!(entry.key(), &6);

        *entry.value_mut() = "B";
        assert_eq!(entry.into_parts(), (6, "B"));
    }

    #[test]
    fn renders_as_key_equals_value() {
        assert_eq!(Entry::new(6, "A+").to_string(), "6=A+");
        assert_eq!(Entry::new(None::<i32>, Some("x")).to_string(), "null=x");
        assert_eq!(Entry::new(Some(1), None::<String>).to_string(), "1=null");
    }

    #[test]
    fn serializes_key_and_value() {
        let json = serde_json::to_string(&Entry::new(8, "B")).unwrap();
        assert_eq!(json, r#"{"key":8,"value":"B"}"#);
    }
}
