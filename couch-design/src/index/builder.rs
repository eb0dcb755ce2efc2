use crate::common::PARTIAL_FILTER_SELECTOR;
use crate::errors::{DesignError, DesignResult};
use crate::index::{
    Analyzer, DefaultField, IndexDef, IndexDefinition, JsonField, JsonIndexDef, TextField,
    TextFieldType, TextIndexDef,
};
use crate::selector::Selector;

impl IndexDefinition {
    /// Starts building a json index.
    pub fn json_builder() -> JsonIndexBuilder {
        JsonIndexBuilder::new()
    }

    /// Starts building a text index.
    pub fn text_builder() -> TextIndexBuilder {
        TextIndexBuilder::new()
    }
}

/// Builder for json index definitions.
///
/// Errors from invalid input are captured and returned by [`JsonIndexBuilder::build`],
/// so calls can be chained without checking each one.
///
/// # Examples
///
/// ```rust
/// use couch_design::index::IndexDefinition;
/// use couch_design::selector::field;
///
/// let index = IndexDefinition::json_builder()
///     .design_document("_design/testindexddoc")
///     .name("complexjson")
///     .partial_filter_selector(field("year").gt(2010))
///     .asc(&["Person_name"])
///     .desc(&["Movie_year"])
///     .build()
///     .unwrap();
///
/// assert_eq!(index.field_specs(), vec!["Person_name:asc", "Movie_year:desc"]);
/// ```
#[derive(Default)]
pub struct JsonIndexBuilder {
    error: Option<DesignError>,
    ddoc: Option<String>,
    name: Option<String>,
    def: JsonIndexDef,
}

impl JsonIndexBuilder {
    pub fn new() -> Self {
        JsonIndexBuilder::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets the design document holding the index. Without one the server picks it.
    pub fn design_document(mut self, ddoc: &str) -> Self {
        self.ddoc = Some(ddoc.to_string());
        self
    }

    pub fn partial_filter_selector(mut self, selector: Selector) -> Self {
        self.def.partial_filter_selector = Some(selector);
        self
    }

    /// Parses the partial filter from text, see [`Selector::parse_keyed`].
    pub fn parse_partial_filter_selector(mut self, text: &str) -> Self {
        if self.error.is_none() {
            match Selector::parse_keyed(PARTIAL_FILTER_SELECTOR, text) {
                Ok(selector) => self.def.partial_filter_selector = Some(selector),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Adds fields sorted in ascending order.
    pub fn asc(mut self, names: &[&str]) -> Self {
        self.def
            .fields
            .extend(names.iter().map(|name| JsonField::asc(name)));
        self
    }

    /// Adds fields sorted in descending order.
    pub fn desc(mut self, names: &[&str]) -> Self {
        self.def
            .fields
            .extend(names.iter().map(|name| JsonField::desc(name)));
        self
    }

    pub fn field(mut self, field: JsonField) -> Self {
        self.def.fields.push(field);
        self
    }

    /// Adds a field written as `name`, `name:asc` or `name:desc`.
    pub fn field_spec(mut self, spec: &str) -> Self {
        if self.error.is_none() {
            match spec.parse::<JsonField>() {
                Ok(field) => self.def.fields.push(field),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Builds the index definition, returning the first captured error or a validation
    /// failure.
    pub fn build(self) -> DesignResult<IndexDefinition> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let index = IndexDefinition::new(
            self.ddoc.as_deref(),
            self.name.as_deref(),
            IndexDef::Json(self.def),
        );
        index.validate()?;
        Ok(index)
    }
}

/// Builder for text index definitions.
///
/// # Examples
///
/// ```rust
/// use couch_design::index::{DefaultField, IndexDefinition};
///
/// let index = IndexDefinition::text_builder()
///     .name("simpleselector")
///     .analyzer("keyword")
///     .default_field(DefaultField::new())
///     .string(&["Movie_name"])
///     .index_array_lengths(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(index.fields(), vec![("Movie_name", "string")]);
/// ```
#[derive(Default)]
pub struct TextIndexBuilder {
    error: Option<DesignError>,
    ddoc: Option<String>,
    name: Option<String>,
    def: TextIndexDef,
}

impl TextIndexBuilder {
    pub fn new() -> Self {
        TextIndexBuilder::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn design_document(mut self, ddoc: &str) -> Self {
        self.ddoc = Some(ddoc.to_string());
        self
    }

    pub fn string(self, names: &[&str]) -> Self {
        self.typed(names, TextFieldType::String)
    }

    pub fn number(self, names: &[&str]) -> Self {
        self.typed(names, TextFieldType::Number)
    }

    pub fn boolean(self, names: &[&str]) -> Self {
        self.typed(names, TextFieldType::Boolean)
    }

    pub fn field(mut self, field: TextField) -> Self {
        self.def.fields.get_or_insert_with(Vec::new).push(field);
        self
    }

    /// Adds a field written as `name:string`, `name:number` or `name:boolean`.
    pub fn field_spec(mut self, spec: &str) -> Self {
        if self.error.is_none() {
            match spec.parse::<TextField>() {
                Ok(field) => return self.field(field),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    pub fn analyzer(mut self, analyzer: impl Into<Analyzer>) -> Self {
        self.def.default_analyzer = Some(analyzer.into());
        self
    }

    pub fn default_field(mut self, default_field: DefaultField) -> Self {
        self.def.default_field = Some(default_field);
        self
    }

    pub fn index_array_lengths(mut self, index_array_lengths: bool) -> Self {
        self.def.index_array_lengths = Some(index_array_lengths);
        self
    }

    pub fn partial_filter_selector(mut self, selector: Selector) -> Self {
        self.def.partial_filter_selector = Some(selector);
        self
    }

    pub fn parse_partial_filter_selector(mut self, text: &str) -> Self {
        if self.error.is_none() {
            match Selector::parse_keyed(PARTIAL_FILTER_SELECTOR, text) {
                Ok(selector) => self.def.partial_filter_selector = Some(selector),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    pub fn build(self) -> DesignResult<IndexDefinition> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let index = IndexDefinition::new(
            self.ddoc.as_deref(),
            self.name.as_deref(),
            IndexDef::Text(self.def),
        );
        index.validate()?;
        Ok(index)
    }

    fn typed(mut self, names: &[&str], field_type: TextFieldType) -> Self {
        self.def
            .fields
            .get_or_insert_with(Vec::new)
            .extend(names.iter().map(|name| TextField::new(name, field_type)));
        self
    }
}
