//! Deserialization of name-keyed mappings that refuse repeated names.
//!
//! A JSON object may legally repeat a key and most parsers silently keep the last value.
//! Views, filters, shows and the other named sections of a design document must have
//! unique names, so the mapping is read entry by entry and a repeat is an error.

use crate::errors::{data_error, ErrorKind};
use indexmap::IndexMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt::Formatter;
use std::marker::PhantomData;

/// Ordered mapping from a unique name to a value.
pub type NamedMap<V> = IndexMap<String, V>;

struct UniqueNamesVisitor<V> {
    marker: PhantomData<V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueNamesVisitor<V> {
    type Value = NamedMap<V>;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a map with unique names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = NamedMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, value)) = access.next_entry::<String, V>()? {
            if map.contains_key(&name) {
                log::error!("Name '{}' is defined more than once", name);
                return Err(data_error(
                    ErrorKind::DuplicateName,
                    format!("'{}' is defined more than once", name),
                ));
            }
            map.insert(name, value);
        }
        Ok(map)
    }
}

struct OptionalUniqueNamesVisitor<V> {
    marker: PhantomData<V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OptionalUniqueNamesVisitor<V> {
    type Value = Option<NamedMap<V>>;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("null or a map with unique names")
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        unique(deserializer).map(Some)
    }
}

/// Reads a mapping, failing on the first repeated name.
pub fn unique<'de, D, V>(deserializer: D) -> Result<NamedMap<V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_map(UniqueNamesVisitor {
        marker: PhantomData,
    })
}

/// Optional form of [`unique`]; pair it with `#[serde(default)]` so that an absent
/// mapping stays `None` while `{}` becomes an empty map.
pub fn optional_unique<'de, D, V>(deserializer: D) -> Result<Option<NamedMap<V>>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_option(OptionalUniqueNamesVisitor {
        marker: PhantomData,
    })
}

struct UniqueKeysValue(Value);

struct UniqueKeysVisitor;

impl<'de> Visitor<'de> for UniqueKeysVisitor {
    type Value = UniqueKeysValue;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("any JSON value without repeated keys")
    }

    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(UniqueKeysValue(Value::Bool(v)))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(UniqueKeysValue(Value::from(v)))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(UniqueKeysValue(Value::from(v)))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(UniqueKeysValue(Value::from(v)))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(UniqueKeysValue(Value::String(v.to_string())))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(UniqueKeysValue(Value::String(v)))
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(UniqueKeysValue(Value::Null))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(UniqueKeysValue(Value::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        UniqueKeysValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(UniqueKeysValue(item)) = access.next_element()? {
            items.push(item);
        }
        Ok(UniqueKeysValue(Value::Array(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = Map::new();
        while let Some((key, UniqueKeysValue(value))) = access.next_entry::<String, _>()? {
            if map.contains_key(&key) {
                log::error!("Key '{}' is defined more than once", key);
                return Err(data_error(
                    ErrorKind::DuplicateName,
                    format!("key '{}' is defined more than once", key),
                ));
            }
            map.insert(key, value);
        }
        Ok(UniqueKeysValue(Value::Object(map)))
    }
}

impl<'de> Deserialize<'de> for UniqueKeysValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UniqueKeysVisitor)
    }
}

/// Reads an arbitrary JSON value, failing on a repeated key at any depth.
pub fn unique_keys<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
    UniqueKeysValue::deserialize(deserializer).map(|UniqueKeysValue(value)| value)
}
