use crate::common::SortOrder;
use crate::errors::{data_error, DesignError, ErrorKind};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A field of a json index.
///
/// On the wire a field is a single-entry object mapping the field name to its direction,
/// `{"Movie_year": "desc"}`. A bare string `"Movie_year"` is also accepted and means the
/// field has no explicit direction; it is written back as a bare string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JsonField {
    name: String,
    order: Option<SortOrder>,
}

impl JsonField {
    pub fn new(name: &str, order: SortOrder) -> Self {
        JsonField {
            name: name.to_string(),
            order: Some(order),
        }
    }

    /// Creates a field without an explicit direction.
    pub fn unordered(name: &str) -> Self {
        JsonField {
            name: name.to_string(),
            order: None,
        }
    }

    pub fn asc(name: &str) -> Self {
        JsonField::new(name, SortOrder::Ascending)
    }

    pub fn desc(name: &str) -> Self {
        JsonField::new(name, SortOrder::Descending)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> Option<SortOrder> {
        self.order
    }
}

impl Display for JsonField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.order {
            Some(order) => write!(f, "{}:{}", self.name, order),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Parses `name` or `name:asc` / `name:desc`.
impl FromStr for JsonField {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once(':') {
            None => Ok(JsonField::unordered(s)),
            Some((name, direction)) => {
                let order = direction.parse::<SortOrder>()?;
                Ok(JsonField::new(name, order))
            }
        }
    }
}

impl Serialize for JsonField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.order {
            Some(order) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(&self.name, &order)?;
                map.end()
            }
            None => serializer.serialize_str(&self.name),
        }
    }
}

struct JsonFieldVisitor;

impl<'de> Visitor<'de> for JsonFieldVisitor {
    type Value = JsonField;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a field name or a single-entry object of field name to direction")
    }

    fn visit_str<E: serde::de::Error>(self, name: &str) -> Result<Self::Value, E> {
        Ok(JsonField::unordered(name))
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
        let (name, direction) = single_entry(access)?;
        match SortOrder::from_wire(&direction) {
            Some(order) => Ok(JsonField {
                name,
                order: Some(order),
            }),
            None => {
                log::error!("Json index field '{}' has direction '{}'", name, direction);
                Err(data_error(
                    ErrorKind::InvalidFieldShape,
                    format!(
                        "json index field '{}' has direction '{}', expected 'asc' or 'desc'",
                        name, direction
                    ),
                ))
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(JsonFieldVisitor)
    }
}

/// The value type a text index field is indexed as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextFieldType {
    String,
    Number,
    Boolean,
}

impl TextFieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextFieldType::String => "string",
            TextFieldType::Number => "number",
            TextFieldType::Boolean => "boolean",
        }
    }

    /// Looks up a wire name without logging.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "string" => Some(TextFieldType::String),
            "number" => Some(TextFieldType::Number),
            "boolean" => Some(TextFieldType::Boolean),
            _ => None,
        }
    }
}

impl Display for TextFieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextFieldType {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextFieldType::from_wire(s).ok_or_else(|| {
            log::error!("'{}' is not a text field type", s);
            DesignError::new(
                &format!(
                    "'{}' is not a text field type, expected 'string', 'number' or 'boolean'",
                    s
                ),
                ErrorKind::InvalidFieldShape,
            )
        })
    }
}

/// A field of a text index: `{"Movie_runtime": "number"}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextField {
    name: String,
    field_type: TextFieldType,
}

impl TextField {
    pub fn new(name: &str, field_type: TextFieldType) -> Self {
        TextField {
            name: name.to_string(),
            field_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> TextFieldType {
        self.field_type
    }
}

impl Display for TextField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.field_type)
    }
}

/// Parses `name:string`, `name:number` or `name:boolean`.
impl FromStr for TextField {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once(':') {
            Some((name, type_name)) => Ok(TextField::new(name, type_name.parse()?)),
            None => {
                log::error!("Text field '{}' has no type", s);
                Err(DesignError::new(
                    &format!("text index field '{}' must declare a type", s),
                    ErrorKind::InvalidFieldShape,
                ))
            }
        }
    }
}

impl Serialize for TextField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, self.field_type.as_str())?;
        map.end()
    }
}

struct TextFieldVisitor;

impl<'de> Visitor<'de> for TextFieldVisitor {
    type Value = TextField;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a single-entry object of field name to type")
    }

    fn visit_str<E: serde::de::Error>(self, name: &str) -> Result<Self::Value, E> {
        Err(data_error(
            ErrorKind::InvalidFieldShape,
            format!("text index field '{}' must declare a type", name),
        ))
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
        let (name, type_name) = single_entry(access)?;
        match TextFieldType::from_wire(&type_name) {
            Some(field_type) => Ok(TextField { name, field_type }),
            None => {
                log::error!("Text index field '{}' has type '{}'", name, type_name);
                Err(data_error(
                    ErrorKind::InvalidFieldShape,
                    format!(
                        "text index field '{}' has type '{}', expected 'string', 'number' or 'boolean'",
                        name, type_name
                    ),
                ))
            }
        }
    }
}

impl<'de> Deserialize<'de> for TextField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TextFieldVisitor)
    }
}

fn single_entry<'de, A: MapAccess<'de>>(mut access: A) -> Result<(String, String), A::Error> {
    let entry = access.next_entry::<String, String>()?;
    let extra = access.next_key::<String>()?;
    match (entry, extra) {
        (Some(entry), None) => Ok(entry),
        (None, _) => Err(data_error(
            ErrorKind::InvalidFieldShape,
            "index field entry is an empty object",
        )),
        (Some((name, _)), Some(other)) => Err(data_error(
            ErrorKind::InvalidFieldShape,
            format!(
                "index field entry must name exactly one field, found '{}' and '{}'",
                name, other
            ),
        )),
    }
}
