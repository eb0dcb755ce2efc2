use crate::common::FunctionBody;
use crate::index::Analyzer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A search index of a design document (member `indexes`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    index: FunctionBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    analyzer: Option<Analyzer>,
}

impl SearchIndex {
    pub fn new(index: impl Into<FunctionBody>) -> Self {
        SearchIndex {
            index: index.into(),
            analyzer: None,
        }
    }

    pub fn with_analyzer(mut self, analyzer: impl Into<Analyzer>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn index(&self) -> &FunctionBody {
        &self.index
    }

    pub fn analyzer(&self) -> Option<&Analyzer> {
        self.analyzer.as_ref()
    }
}

/// A full-text index of a design document (member `fulltext`), used by the Lucene
/// integration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FulltextIndex {
    index: FunctionBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    defaults: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    analyzer: Option<String>,
}

impl FulltextIndex {
    pub fn new(index: impl Into<FunctionBody>) -> Self {
        FulltextIndex {
            index: index.into(),
            defaults: None,
            analyzer: None,
        }
    }

    pub fn with_defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn with_analyzer(mut self, analyzer: &str) -> Self {
        self.analyzer = Some(analyzer.to_string());
        self
    }

    pub fn index(&self) -> &FunctionBody {
        &self.index
    }

    pub fn defaults(&self) -> Option<&Map<String, Value>> {
        self.defaults.as_ref()
    }

    pub fn analyzer(&self) -> Option<&str> {
        self.analyzer.as_deref()
    }
}
