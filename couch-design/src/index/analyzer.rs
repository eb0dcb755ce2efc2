use crate::common::NamedMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The analyzer of a text index or search index.
///
/// Either a bare analyzer name such as `"keyword"`, or an object configuring it, for
/// example the `perfield` analyzer with one analyzer per field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Analyzer {
    Named(String),
    Config(AnalyzerConfig),
}

impl Analyzer {
    pub fn named(name: &str) -> Self {
        Analyzer::Named(name.to_string())
    }

    /// Returns the analyzer name in either form.
    pub fn name(&self) -> &str {
        match self {
            Analyzer::Named(name) => name,
            Analyzer::Config(config) => &config.name,
        }
    }
}

impl From<&str> for Analyzer {
    fn from(name: &str) -> Self {
        Analyzer::named(name)
    }
}

impl From<AnalyzerConfig> for Analyzer {
    fn from(config: AnalyzerConfig) -> Self {
        Analyzer::Config(config)
    }
}

/// Object form of an [`Analyzer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<NamedMap<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stopwords: Option<Vec<String>>,
    #[serde(flatten)]
    extras: Map<String, Value>,
}

impl AnalyzerConfig {
    pub fn new(name: &str) -> Self {
        AnalyzerConfig {
            name: name.to_string(),
            default: None,
            fields: None,
            stopwords: None,
            extras: Map::new(),
        }
    }

    /// A `perfield` analyzer falling back to `default` for fields not listed.
    pub fn per_field(default: &str) -> Self {
        AnalyzerConfig::new("perfield").with_default(default)
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn with_field(mut self, field: &str, analyzer: &str) -> Self {
        self.fields
            .get_or_insert_with(NamedMap::new)
            .insert(field.to_string(), analyzer.to_string());
        self
    }

    pub fn with_stopwords(mut self, stopwords: Vec<String>) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_analyzer(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn fields(&self) -> Option<&NamedMap<String>> {
        self.fields.as_ref()
    }

    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields
            .as_ref()
            .and_then(|fields| fields.get(field))
            .map(|analyzer| analyzer.as_str())
    }

    pub fn stopwords(&self) -> Option<&[String]> {
        self.stopwords.as_deref()
    }

    /// Members not modelled above, kept so they are written back.
    pub fn extras(&self) -> &Map<String, Value> {
        &self.extras
    }
}

/// The `default_field` of a text index.
///
/// Every member is optional and an empty object `{}` is a valid value, distinct from
/// omitting `default_field` altogether.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct DefaultField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    analyzer: Option<Analyzer>,
}

impl DefaultField {
    pub fn new() -> Self {
        DefaultField::default()
    }

    pub fn enabled(analyzer: &str) -> Self {
        DefaultField {
            enabled: Some(true),
            analyzer: Some(Analyzer::named(analyzer)),
        }
    }

    pub fn disabled() -> Self {
        DefaultField {
            enabled: Some(false),
            analyzer: None,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_analyzer(mut self, analyzer: impl Into<Analyzer>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn is_enabled(&self) -> Option<bool> {
        self.enabled
    }

    pub fn analyzer(&self) -> Option<&Analyzer> {
        self.analyzer.as_ref()
    }
}
