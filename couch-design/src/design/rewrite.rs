use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A URL rewrite rule. Rules are matched in the order they are listed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewriteRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    query: Option<Map<String, Value>>,
}

impl RewriteRule {
    pub fn new(from: &str, to: &str) -> Self {
        RewriteRule {
            from: Some(from.to_string()),
            to: to.to_string(),
            method: None,
            query: None,
        }
    }

    pub fn with_method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }

    pub fn with_query(mut self, query: Map<String, Value>) -> Self {
        self.query = Some(query);
        self
    }

    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn query(&self) -> Option<&Map<String, Value>> {
        self.query.as_ref()
    }
}
