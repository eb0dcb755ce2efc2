use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Source text of a function embedded in a design document.
///
/// Map, reduce, filter, show, list, update and indexing functions travel as plain strings.
/// A `FunctionBody` is never parsed or executed by this crate: it is carried byte-for-byte
/// from input to output, whitespace and all.
///
/// # Examples
///
/// ```rust
/// use couch_design::common::FunctionBody;
///
/// let body = FunctionBody::new("function(doc) { emit(doc._id, null); }");
/// assert!(body.as_str().starts_with("function"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionBody(String);

impl FunctionBody {
    pub fn new(source: impl Into<String>) -> Self {
        FunctionBody(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns `true` when the body is empty or contains only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for FunctionBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FunctionBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FunctionBody {
    fn from(source: &str) -> Self {
        FunctionBody::new(source)
    }
}

impl From<String> for FunctionBody {
    fn from(source: String) -> Self {
        FunctionBody(source)
    }
}
