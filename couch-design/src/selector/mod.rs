//! Query selectors.
//!
//! A selector is a JSON object describing which documents match, for example
//! `{"year": {"$gt": 2010}}`. Index definitions use one as their partial filter.
//!
//! Selectors can be parsed from text or assembled with the fluent builders:
//!
//! ```rust
//! use couch_design::selector::{and, field, Selector};
//!
//! let recent = field("year").gt(2010);
//! assert_eq!(recent.to_string(), r#"{"year":{"$gt":2010}}"#);
//!
//! let both = and(vec![recent, field("rating").gte(4)]);
//! assert!(both.as_map().contains_key("$and"));
//!
//! let parsed = Selector::parse(r#""selector": {"year": {"$gt": 2010}}"#).unwrap();
//! assert_eq!(parsed, field("year").gt(2010));
//! ```

mod fluent;

pub use fluent::*;

use crate::common::{WireFormat, SELECTOR};
use crate::errors::{DesignError, DesignResult, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// A selector object.
///
/// The wrapped map keeps the key order it was created or parsed with.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(Map<String, Value>);

impl Selector {
    /// Creates an empty selector, which matches every document.
    pub fn new() -> Self {
        Selector(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Selector(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses a selector from text.
    ///
    /// Accepted forms:
    /// - a JSON object: `{"year": {"$gt": 2010}}`
    /// - an object nesting the selector: `{"selector": {"year": {"$gt": 2010}}}`
    /// - a keyed fragment: `"selector": {"year": {"$gt": 2010}}`
    ///
    /// # Errors
    /// Returns `ErrorKind::InvalidSelector` if the text is empty or matches none of the forms.
    pub fn parse(text: &str) -> DesignResult<Selector> {
        Selector::parse_keyed(SELECTOR, text)
    }

    /// Like [`Selector::parse`] with a different wrapping key, for example
    /// `partial_filter_selector`.
    pub fn parse_keyed(key: &str, text: &str) -> DesignResult<Selector> {
        let text = text.trim();
        if text.is_empty() {
            log::error!("Selector text cannot be empty");
            return Err(DesignError::new(
                "Selector text cannot be empty",
                ErrorKind::InvalidSelector,
            ));
        }

        let object = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                log::error!("Selector must be a JSON object, found {}", other);
                return Err(DesignError::new(
                    "Selector must be a JSON object",
                    ErrorKind::InvalidSelector,
                ));
            }
            Err(_) => Selector::parse_fragment(key, text)?,
        };

        Ok(Selector(Selector::unwrap_nested(key, object)))
    }

    fn parse_fragment(key: &str, text: &str) -> DesignResult<Map<String, Value>> {
        let quoted = format!("\"{}\"", key);
        if !(text.starts_with(key) || text.starts_with(&quoted)) {
            log::error!("Selector text is neither JSON nor a '{}' fragment", key);
            return Err(DesignError::new(
                &format!("Selector should be valid JSON or like \"{}\": {{...}}", key),
                ErrorKind::InvalidSelector,
            ));
        }

        let body = match text.find(':') {
            Some(position) => text[position + 1..].trim(),
            None => "",
        };
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(_) => Err(DesignError::new(
                &format!("Value of \"{}\" must be a JSON object", key),
                ErrorKind::InvalidSelector,
            )),
            Err(err) => {
                log::error!("Invalid JSON after \"{}\": {}", key, err);
                Err(DesignError::new_with_cause(
                    &format!("Invalid JSON after \"{}\"", key),
                    ErrorKind::InvalidSelector,
                    err.into(),
                ))
            }
        }
    }

    fn unwrap_nested(key: &str, mut object: Map<String, Value>) -> Map<String, Value> {
        if object.len() == 1 {
            if let Some(Value::Object(_)) = object.get(key) {
                if let Some(Value::Object(inner)) = object.remove(key) {
                    return inner;
                }
            }
        }
        object
    }
}

impl WireFormat for Selector {}

impl Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

impl From<Map<String, Value>> for Selector {
    fn from(map: Map<String, Value>) -> Self {
        Selector(map)
    }
}

impl From<Selector> for Value {
    fn from(selector: Selector) -> Self {
        selector.into_value()
    }
}
