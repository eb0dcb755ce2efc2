use crate::common::{ensure_design_prefix, FunctionBody, NamedMap};
use crate::design::{DesignDocument, FulltextIndex, MapReduce, Reducer, RewriteRule, SearchIndex};
use crate::errors::{DesignError, DesignResult, ErrorKind};

impl DesignDocument {
    /// Starts building a design document. The `_design/` prefix is added to `id` when
    /// missing.
    pub fn builder(id: &str) -> DesignDocumentBuilder {
        DesignDocumentBuilder::new(id)
    }
}

/// Builder for design documents.
///
/// Like the index builders it captures the first error, such as a name added twice to
/// the same section, and returns it from [`DesignDocumentBuilder::build`].
///
/// # Examples
///
/// ```rust
/// use couch_design::design::{BuiltinReducer, DesignDocument};
///
/// let ddoc = DesignDocument::builder("views101")
///     .language("javascript")
///     .view("latin_name", "function(doc) { emit(doc.latin_name, null); }")
///     .view_with_reduce("diet_sum", "function(doc) { emit(doc.diet, 1); }", BuiltinReducer::Sum)
///     .build()
///     .unwrap();
///
/// assert_eq!(ddoc.id(), "_design/views101");
/// assert_eq!(ddoc.view("diet_sum").unwrap().reduce().unwrap().as_str(), "_sum");
/// ```
pub struct DesignDocumentBuilder {
    error: Option<DesignError>,
    document: DesignDocument,
}

impl DesignDocumentBuilder {
    pub fn new(id: &str) -> Self {
        DesignDocumentBuilder {
            error: None,
            document: DesignDocument::new(&ensure_design_prefix(id)),
        }
    }

    pub fn rev(mut self, rev: &str) -> Self {
        self.document = self.document.with_rev(rev);
        self
    }

    pub fn language(mut self, language: &str) -> Self {
        self.document.set_language(language);
        self
    }

    /// Adds a view without a reduce.
    pub fn view(self, name: &str, map: &str) -> Self {
        self.map_reduce(name, MapReduce::new(map))
    }

    /// Adds a view with a reduce, either a [`BuiltinReducer`](crate::design::BuiltinReducer)
    /// or a function body.
    pub fn view_with_reduce(self, name: &str, map: &str, reduce: impl Into<Reducer>) -> Self {
        self.map_reduce(name, MapReduce::new(map).with_reduce(reduce))
    }

    /// Adds a fully specified view.
    pub fn map_reduce(mut self, name: &str, view: MapReduce) -> Self {
        if self.error.is_none() {
            if let Err(e) = add_named("views", self.document.views_mut(), name, view) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn search_index(mut self, name: &str, index: SearchIndex) -> Self {
        if self.error.is_none() {
            if let Err(e) = add_named("indexes", self.document.indexes_mut(), name, index) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn filter(mut self, name: &str, body: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = add_named("filters", self.document.filters_mut(), name, body.into()) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn show(mut self, name: &str, body: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = add_named("shows", self.document.shows_mut(), name, body.into()) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn list(mut self, name: &str, body: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = add_named("lists", self.document.lists_mut(), name, body.into()) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn update(mut self, name: &str, body: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = add_named("updates", self.document.updates_mut(), name, body.into()) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn validate_doc_update(mut self, body: &str) -> Self {
        self.document.set_validate_doc_update(FunctionBody::from(body));
        self
    }

    /// Appends a rewrite rule. Rules keep the order they are added in.
    pub fn rewrite(mut self, rule: RewriteRule) -> Self {
        self.document.rewrites_mut().push(rule);
        self
    }

    pub fn fulltext(mut self, name: &str, index: FulltextIndex) -> Self {
        if self.error.is_none() {
            if let Err(e) = add_named("fulltext", self.document.fulltext_mut(), name, index) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Returns the design document, or the first captured error, or the failure of
    /// [`DesignDocument::validate`].
    pub fn build(self) -> DesignResult<DesignDocument> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.document.validate()?;
        Ok(self.document)
    }
}

fn add_named<V>(section: &str, map: &mut NamedMap<V>, name: &str, value: V) -> DesignResult<()> {
    if name.trim().is_empty() {
        log::error!("Empty name added to '{}'", section);
        return Err(DesignError::new(
            &format!("Names in '{}' cannot be empty", section),
            ErrorKind::ValidationError,
        ));
    }
    if map.contains_key(name) {
        log::error!("'{}' is already defined in '{}'", name, section);
        return Err(DesignError::new(
            &format!("'{}' is already defined in '{}'", name, section),
            ErrorKind::DuplicateName,
        ));
    }
    map.insert(name.to_string(), value);
    Ok(())
}
