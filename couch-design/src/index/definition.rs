use crate::common::{SortOrder, WireFormat, JSON_INDEX, SPECIAL_INDEX, TEXT_INDEX};
use crate::errors::{data_error, DesignError, DesignResult, ErrorKind};
use crate::index::{Analyzer, DefaultField, JsonField, TextField};
use crate::selector::Selector;
use crate::common::names::unique_keys;
use itertools::Itertools;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DEF: &str = "def";
const CREATE_DEF: &str = "index";

/// The `type` of a query index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum IndexType {
    /// Index over field values, queried by exact match and range.
    #[default]
    Json,
    /// Full-text index.
    Text,
    /// The primary index over `_id`, reported by the server but never created.
    Special,
}

impl IndexType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexType::Json => JSON_INDEX,
            IndexType::Text => TEXT_INDEX,
            IndexType::Special => SPECIAL_INDEX,
        }
    }
}

impl Display for IndexType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexType {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            JSON_INDEX => Ok(IndexType::Json),
            TEXT_INDEX => Ok(IndexType::Text),
            SPECIAL_INDEX => Ok(IndexType::Special),
            other => {
                log::error!("'{}' is not a known index type", other);
                Err(DesignError::new(
                    &format!("'{}' is not a known index type", other),
                    ErrorKind::UnknownIndexType,
                ))
            }
        }
    }
}

impl Serialize for IndexType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IndexType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse()
            .map_err(|err: DesignError| data_error(ErrorKind::UnknownIndexType, err.message()))
    }
}

/// Definition body of a json index.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct JsonIndexDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) partial_filter_selector: Option<Selector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) selector: Option<Selector>,
    pub(crate) fields: Vec<JsonField>,
}

impl JsonIndexDef {
    pub fn new(fields: Vec<JsonField>) -> Self {
        JsonIndexDef {
            fields,
            ..JsonIndexDef::default()
        }
    }

    pub fn fields(&self) -> &[JsonField] {
        &self.fields
    }

    pub fn partial_filter_selector(&self) -> Option<&Selector> {
        self.partial_filter_selector.as_ref()
    }

    pub fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }
}

/// Definition body of a text index.
///
/// Every member is optional. A text index without fields indexes every field.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct TextIndexDef {
    #[serde(
        default,
        alias = "analyzer",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) default_analyzer: Option<Analyzer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) default_field: Option<DefaultField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) partial_filter_selector: Option<Selector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) selector: Option<Selector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) fields: Option<Vec<TextField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) index_array_lengths: Option<bool>,
}

impl TextIndexDef {
    pub fn new() -> Self {
        TextIndexDef::default()
    }

    pub fn default_analyzer(&self) -> Option<&Analyzer> {
        self.default_analyzer.as_ref()
    }

    pub fn default_field(&self) -> Option<&DefaultField> {
        self.default_field.as_ref()
    }

    pub fn partial_filter_selector(&self) -> Option<&Selector> {
        self.partial_filter_selector.as_ref()
    }

    pub fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }

    pub fn fields(&self) -> Option<&[TextField]> {
        self.fields.as_deref()
    }

    pub fn index_array_lengths(&self) -> Option<bool> {
        self.index_array_lengths
    }
}

/// The `def` of an index, shaped by its type.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexDef {
    Json(JsonIndexDef),
    Text(TextIndexDef),
    Special(JsonIndexDef),
}

impl IndexDef {
    pub fn index_type(&self) -> IndexType {
        match self {
            IndexDef::Json(_) => IndexType::Json,
            IndexDef::Text(_) => IndexType::Text,
            IndexDef::Special(_) => IndexType::Special,
        }
    }

    fn parse<E: serde::de::Error>(index_type: IndexType, def: Value) -> Result<IndexDef, E> {
        let parsed = match index_type {
            IndexType::Json => serde_json::from_value(def).map(IndexDef::Json),
            IndexType::Text => serde_json::from_value(def).map(IndexDef::Text),
            IndexType::Special => serde_json::from_value(def).map(IndexDef::Special),
        };
        parsed.map_err(E::custom)
    }

    fn serialize_entry<M: SerializeMap>(&self, map: &mut M, key: &str) -> Result<(), M::Error> {
        match self {
            IndexDef::Json(def) | IndexDef::Special(def) => map.serialize_entry(key, def),
            IndexDef::Text(def) => map.serialize_entry(key, def),
        }
    }
}

/// A query index as listed by the server or sent to create one.
///
/// ```json
/// {
///   "ddoc": "_design/testindexddoc",
///   "name": "complexjson",
///   "type": "json",
///   "def": {"fields": [{"Person_name": "asc"}, {"Movie_year": "desc"}]}
/// }
/// ```
///
/// The definition is read from either `def` (listing shape) or `index` (creation shape).
/// Serialization writes the listing shape; [`IndexDefinition::to_create_payload`] writes
/// the creation shape.
///
/// `ddoc` and `name` keep an explicit `null` apart from a missing key, as in the
/// listing entry of the primary `_all_docs` index.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexDefinition {
    ddoc: Option<Option<String>>,
    name: Option<Option<String>>,
    def: IndexDef,
}

impl IndexDefinition {
    pub fn new(ddoc: Option<&str>, name: Option<&str>, def: IndexDef) -> Self {
        IndexDefinition {
            ddoc: ddoc.map(|ddoc| Some(ddoc.to_string())),
            name: name.map(|name| Some(name.to_string())),
            def,
        }
    }

    /// Id of the design document holding the index. `None` for the primary index or when
    /// the server should choose.
    pub fn design_document_id(&self) -> Option<&str> {
        self.ddoc.as_ref().and_then(Option::as_deref)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Option::as_deref)
    }

    pub fn index_type(&self) -> IndexType {
        self.def.index_type()
    }

    pub fn definition(&self) -> &IndexDef {
        &self.def
    }

    /// Fields of a json or special index.
    pub fn json_fields(&self) -> Option<&[JsonField]> {
        match &self.def {
            IndexDef::Json(def) | IndexDef::Special(def) => Some(def.fields()),
            IndexDef::Text(_) => None,
        }
    }

    /// Fields of a text index. `None` also when the text index lists no fields.
    pub fn text_fields(&self) -> Option<&[TextField]> {
        match &self.def {
            IndexDef::Text(def) => def.fields(),
            _ => None,
        }
    }

    /// Indexed fields as `(name, descriptor)` pairs in definition order. The descriptor is
    /// the direction of a json field (`asc` when not given) or the type of a text field.
    pub fn fields(&self) -> Vec<(&str, &str)> {
        match &self.def {
            IndexDef::Json(def) | IndexDef::Special(def) => def
                .fields()
                .iter()
                .map(|field| {
                    let order = field.order().unwrap_or(SortOrder::Ascending);
                    (field.name(), order.as_str())
                })
                .collect(),
            IndexDef::Text(def) => def
                .fields()
                .unwrap_or_default()
                .iter()
                .map(|field| (field.name(), field.field_type().as_str()))
                .collect(),
        }
    }

    /// Indexed fields written as `name:descriptor`, as accepted by the builders.
    pub fn field_specs(&self) -> Vec<String> {
        match &self.def {
            IndexDef::Json(def) | IndexDef::Special(def) => {
                def.fields().iter().map(JsonField::to_string).collect()
            }
            IndexDef::Text(def) => def
                .fields()
                .unwrap_or_default()
                .iter()
                .map(TextField::to_string)
                .collect(),
        }
    }

    /// The partial filter of the index, whichever of `partial_filter_selector` and
    /// `selector` was given. `partial_filter_selector` wins when both are.
    pub fn filter_selector(&self) -> Option<&Selector> {
        match &self.def {
            IndexDef::Json(def) | IndexDef::Special(def) => def
                .partial_filter_selector()
                .or_else(|| def.selector()),
            IndexDef::Text(def) => def
                .partial_filter_selector()
                .or_else(|| def.selector()),
        }
    }

    /// Body of the request creating this index, with the definition under `index`.
    pub fn to_create_payload(&self) -> DesignResult<Value> {
        if self.index_type() == IndexType::Special {
            log::error!("The primary index cannot be created");
            return Err(DesignError::new(
                "An index of type 'special' cannot be created",
                ErrorKind::ValidationError,
            ));
        }
        self.validate()?;
        serde_json::to_value(CreatePayload(self)).map_err(|err| {
            log::error!("Failed to write index creation payload: {}", err);
            DesignError::new_with_cause(
                "Failed to write index creation payload",
                ErrorKind::InternalError,
                err.into(),
            )
        })
    }

    /// Checks the definition for a json index without fields and for empty field names.
    pub fn validate(&self) -> DesignResult<()> {
        if let Some(name) = self.name() {
            if name.trim().is_empty() {
                return Err(invalid("Index name cannot be empty"));
            }
        }

        match &self.def {
            IndexDef::Json(def) | IndexDef::Special(def) => {
                if def.fields().is_empty() {
                    return Err(invalid(&format!(
                        "{} index must have at least one field",
                        self.index_type()
                    )));
                }
                if def.fields().iter().any(|f| f.name().is_empty()) {
                    return Err(invalid("Index field name cannot be empty"));
                }
            }
            IndexDef::Text(def) => {
                if def.fields().unwrap_or_default().iter().any(|f| f.name().is_empty()) {
                    return Err(invalid("Index field name cannot be empty"));
                }
            }
        }
        Ok(())
    }

    fn serialize_with<S: Serializer>(&self, serializer: S, def_key: &str) -> Result<S::Ok, S::Error> {
        let len = 2 + usize::from(self.ddoc.is_some()) + usize::from(self.name.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(ddoc) = &self.ddoc {
            map.serialize_entry("ddoc", ddoc)?;
        }
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        map.serialize_entry("type", &self.index_type())?;
        self.def.serialize_entry(&mut map, def_key)?;
        map.end()
    }
}

fn invalid(message: &str) -> DesignError {
    log::error!("{}", message);
    DesignError::new(message, ErrorKind::ValidationError)
}

impl Display for IndexDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) [{}]",
            self.name().unwrap_or("<unnamed>"),
            self.index_type(),
            self.field_specs().iter().join(", ")
        )
    }
}

impl Serialize for IndexDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize_with(serializer, DEF)
    }
}

struct CreatePayload<'a>(&'a IndexDefinition);

impl Serialize for CreatePayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize_with(serializer, CREATE_DEF)
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
struct RawIndexDefinition {
    #[serde(default, deserialize_with = "present")]
    ddoc: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    name: Option<Option<String>>,
    #[serde(default, rename = "type")]
    index_type: IndexType,
    #[serde(alias = "index", deserialize_with = "unique_keys")]
    def: Value,
}

impl<'de> Deserialize<'de> for IndexDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawIndexDefinition::deserialize(deserializer)?;
        if !raw.def.is_object() {
            return Err(D::Error::custom("index definition `def` must be an object"));
        }
        let def = IndexDef::parse(raw.index_type, raw.def)?;
        Ok(IndexDefinition {
            ddoc: raw.ddoc,
            name: raw.name,
            def,
        })
    }
}

impl WireFormat for IndexDefinition {}
