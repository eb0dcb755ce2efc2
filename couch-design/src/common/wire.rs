use crate::errors::{DesignError, DesignResult, ErrorKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Conversion between a descriptor and its JSON wire format.
///
/// Every top-level descriptor (design documents, index definitions, index listings and
/// selectors) shares the same conversions. The defaults are built on the descriptor's
/// serde implementation and map failures to [`DesignError`] with a matching kind.
///
/// # Examples
///
/// ```rust
/// use couch_design::common::WireFormat;
/// use couch_design::index::IndexDefinition;
///
/// let json = r#"{"ddoc":"_design/d","name":"n","type":"json","def":{"fields":[{"a":"asc"}]}}"#;
/// let index = IndexDefinition::from_json(json).unwrap();
/// assert_eq!(index.name(), Some("n"));
/// ```
pub trait WireFormat: Serialize + DeserializeOwned {
    /// Parses the descriptor from JSON text.
    fn from_json(json: &str) -> DesignResult<Self> {
        serde_json::from_str(json).map_err(|err| {
            let err = DesignError::from(err);
            log::error!("Failed to parse {}: {}", short_type_name::<Self>(), err);
            err
        })
    }

    /// Parses the descriptor from JSON bytes.
    fn from_slice(json: &[u8]) -> DesignResult<Self> {
        serde_json::from_slice(json).map_err(|err| {
            let err = DesignError::from(err);
            log::error!("Failed to parse {}: {}", short_type_name::<Self>(), err);
            err
        })
    }

    /// Converts an already parsed JSON value into the descriptor.
    ///
    /// Duplicate keys cannot be detected here because a parsed [`Value`] has already
    /// collapsed them; use [`WireFormat::from_json`] when that matters.
    fn from_value(value: Value) -> DesignResult<Self> {
        serde_json::from_value(value).map_err(DesignError::from)
    }

    /// Writes the descriptor as compact JSON.
    fn to_json(&self) -> DesignResult<String> {
        serde_json::to_string(self).map_err(serialization_error)
    }

    /// Writes the descriptor as indented JSON.
    fn to_json_pretty(&self) -> DesignResult<String> {
        serde_json::to_string_pretty(self).map_err(serialization_error)
    }

    /// Converts the descriptor into a JSON value.
    fn to_value(&self) -> DesignResult<Value> {
        serde_json::to_value(self).map_err(serialization_error)
    }
}

fn serialization_error(err: serde_json::Error) -> DesignError {
    log::error!("Failed to serialize descriptor: {}", err);
    DesignError::new_with_cause(
        "Failed to serialize descriptor",
        ErrorKind::InternalError,
        DesignError::from(err),
    )
}

fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}
