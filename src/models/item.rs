use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// Declared field set of one entity type, with the default value of each field.
pub trait Schema {
    /// Entity name used in error messages.
    const NAME: &'static str;

    fn defaults() -> Map<String, Value>;
}

/// Client-side representation of one server resource.
///
/// Fields are seeded from `S::defaults()`. Only declared fields, plus those
/// attached with [`Item::add_attribute`], can be read or written; anything
/// else is an [`Error::Attribute`]. Unknown keys coming from the server are
/// dropped on construction so new server-side fields never break parsing.
pub struct Item<S> {
    data: Map<String, Value>,
    extra: Map<String, Value>,
    schema: PhantomData<S>,
}

impl<S: Schema> Item<S> {
    /// Item holding the schema defaults.
    pub fn new() -> Self {
        Self {
            data: S::defaults(),
            extra: Map::new(),
            schema: PhantomData,
        }
    }

    /// Item with the schema defaults overridden by the declared keys of `partial`.
    pub fn from_map(partial: &Map<String, Value>) -> Self {
        let mut item = Self::new();
        item.update(partial);
        item
    }

    pub fn from_json(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => Ok(Self::from_map(&map)),
            other => Err(Error::client(format!(
                "Expected a JSON object for {}, got: {}",
                S::NAME,
                other
            ))),
        }
    }

    /// Build from a server response, which must be a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_map(&map)),
            other => Err(Error::client(format!(
                "Unexpected {} representation from server: {}",
                S::NAME,
                other
            ))),
        }
    }

    /// Overwrite the fields already known to this item, ignoring other keys.
    pub fn update(&mut self, partial: &Map<String, Value>) {
        for (key, value) in partial {
            if let Some(slot) = self.data.get_mut(key) {
                *slot = value.clone();
            } else if let Some(slot) = self.extra.get_mut(key) {
                *slot = value.clone();
            }
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.data.contains_key(name) || self.extra.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        self.data
            .get(name)
            .or_else(|| self.extra.get(name))
            .ok_or_else(|| Self::attribute_error(name))
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let slot = match self.data.get_mut(name) {
            Some(slot) => slot,
            None => self
                .extra
                .get_mut(name)
                .ok_or_else(|| Self::attribute_error(name))?,
        };
        *slot = value.into();
        Ok(())
    }

    /// Declare `name` if needed and set its value.
    ///
    /// Used for request-only fields such as `addOptions` that are not part
    /// of the entity schema.
    pub fn add_attribute(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.data.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.extra.insert(name.to_string(), value);
            }
        }
    }

    /// Fields attached with [`Item::add_attribute`].
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// All live fields: schema fields in declaration order, then added ones.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.data.clone();
        map.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        map
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_map())?)
    }

    pub(crate) fn str_field(&self, name: &str) -> &str {
        self.data.get(name).and_then(Value::as_str).unwrap_or_default()
    }

    pub(crate) fn i64_field(&self, name: &str) -> i64 {
        self.data.get(name).and_then(Value::as_i64).unwrap_or_default()
    }

    pub(crate) fn bool_field(&self, name: &str) -> bool {
        self.data.get(name).and_then(Value::as_bool).unwrap_or_default()
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.data.get_mut(name)
    }

    fn attribute_error(name: &str) -> Error {
        Error::Attribute {
            kind: S::NAME,
            name: name.to_string(),
        }
    }
}

impl<S: Schema> Default for Item<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Item<S> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            extra: self.extra.clone(),
            schema: PhantomData,
        }
    }
}

impl<S> PartialEq for Item<S> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.extra == other.extra
    }
}

impl<S> fmt::Debug for Item<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("data", &self.data)
            .field("extra", &self.extra)
            .finish()
    }
}

impl<S: Schema> fmt::Display for Item<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = serde_json::to_string_pretty(&self.to_map()).map_err(|_| fmt::Error)?;
        f.write_str(&pretty)
    }
}

impl<S: Schema> Serialize for Item<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> std::result::Result<Z::Ok, Z::Error> {
        self.to_map().serialize(serializer)
    }
}

/// A get or lookup response: a single resource or a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Items<S> {
    One(Item<S>),
    Many(Vec<Item<S>>),
}

impl<S: Schema> Items<S> {
    /// Wrap a get response: a list is always [`Items::Many`].
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(values) => values
                .into_iter()
                .map(Item::from_value)
                .collect::<Result<Vec<_>>>()
                .map(Items::Many),
            other => Item::from_value(other).map(Items::One),
        }
    }

    /// Wrap a lookup response. A one-element list collapses to
    /// [`Items::One`]; `null` and empty lists give `None`.
    pub fn from_lookup(value: Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Array(values) => {
                let mut items = values
                    .into_iter()
                    .map(Item::from_value)
                    .collect::<Result<Vec<_>>>()?;
                match items.len() {
                    0 => Ok(None),
                    1 => Ok(items.pop().map(Items::One)),
                    _ => Ok(Some(Items::Many(items))),
                }
            }
            other => Item::from_value(other).map(|item| Some(Items::One(item))),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Items::One(_) => 1,
            Items::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first(&self) -> Option<&Item<S>> {
        match self {
            Items::One(item) => Some(item),
            Items::Many(items) => items.first(),
        }
    }

    pub fn into_first(self) -> Option<Item<S>> {
        match self {
            Items::One(item) => Some(item),
            Items::Many(items) => items.into_iter().next(),
        }
    }

    pub fn into_vec(self) -> Vec<Item<S>> {
        match self {
            Items::One(item) => vec![item],
            Items::Many(items) => items,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Items::One(item) => item.to_value(),
            Items::Many(items) => Value::Array(items.iter().map(Item::to_value).collect()),
        }
    }
}
