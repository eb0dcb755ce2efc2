use crate::common::names::optional_unique;
use crate::common::{FunctionBody, NamedMap, WireFormat, DESIGN_PREFIX};
use crate::design::{FulltextIndex, MapReduce, RewriteRule, SearchIndex};
use crate::errors::{DesignError, DesignResult, ErrorKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A design document.
///
/// Every member besides `_id` is optional. An absent member stays absent when the
/// document is written back and an empty one (`"views": {}`) stays empty. Names inside
/// each mapping must be unique; a repeated name fails with [`ErrorKind::DuplicateName`].
/// Members this type does not model are kept in [`DesignDocument::extras`].
///
/// # Examples
///
/// ```rust
/// use couch_design::common::WireFormat;
/// use couch_design::design::DesignDocument;
///
/// let json = r#"{
///     "_id": "_design/views101",
///     "language": "javascript",
///     "views": {
///         "diet_sum": {"map": "function(doc) { emit(doc.diet, 1); }", "reduce": "_sum\n"}
///     }
/// }"#;
///
/// let ddoc = DesignDocument::from_json(json).unwrap();
/// let view = ddoc.view("diet_sum").unwrap();
/// assert_eq!(view.reduce().unwrap().as_str(), "_sum\n");
/// assert!(ddoc.filters().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    rev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_unique",
        skip_serializing_if = "Option::is_none"
    )]
    views: Option<NamedMap<MapReduce>>,
    #[serde(
        default,
        deserialize_with = "optional_unique",
        skip_serializing_if = "Option::is_none"
    )]
    indexes: Option<NamedMap<SearchIndex>>,
    #[serde(
        default,
        deserialize_with = "optional_unique",
        skip_serializing_if = "Option::is_none"
    )]
    filters: Option<NamedMap<FunctionBody>>,
    #[serde(
        default,
        deserialize_with = "optional_unique",
        skip_serializing_if = "Option::is_none"
    )]
    shows: Option<NamedMap<FunctionBody>>,
    #[serde(
        default,
        deserialize_with = "optional_unique",
        skip_serializing_if = "Option::is_none"
    )]
    lists: Option<NamedMap<FunctionBody>>,
    #[serde(
        default,
        deserialize_with = "optional_unique",
        skip_serializing_if = "Option::is_none"
    )]
    updates: Option<NamedMap<FunctionBody>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validate_doc_update: Option<FunctionBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rewrites: Option<Vec<RewriteRule>>,
    #[serde(
        default,
        deserialize_with = "optional_unique",
        skip_serializing_if = "Option::is_none"
    )]
    fulltext: Option<NamedMap<FulltextIndex>>,
    #[serde(flatten)]
    extras: IndexMap<String, Value>,
}

impl DesignDocument {
    /// Creates an empty design document. The id is used as given; see
    /// [`DesignDocument::builder`] for one that adds the `_design/` prefix.
    pub fn new(id: &str) -> Self {
        DesignDocument {
            id: id.to_string(),
            rev: None,
            language: None,
            views: None,
            indexes: None,
            filters: None,
            shows: None,
            lists: None,
            updates: None,
            validate_doc_update: None,
            rewrites: None,
            fulltext: None,
            extras: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rev(&self) -> Option<&str> {
        self.rev.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn views(&self) -> Option<&NamedMap<MapReduce>> {
        self.views.as_ref()
    }

    pub fn indexes(&self) -> Option<&NamedMap<SearchIndex>> {
        self.indexes.as_ref()
    }

    pub fn filters(&self) -> Option<&NamedMap<FunctionBody>> {
        self.filters.as_ref()
    }

    pub fn shows(&self) -> Option<&NamedMap<FunctionBody>> {
        self.shows.as_ref()
    }

    pub fn lists(&self) -> Option<&NamedMap<FunctionBody>> {
        self.lists.as_ref()
    }

    pub fn updates(&self) -> Option<&NamedMap<FunctionBody>> {
        self.updates.as_ref()
    }

    pub fn validate_doc_update(&self) -> Option<&FunctionBody> {
        self.validate_doc_update.as_ref()
    }

    pub fn rewrites(&self) -> Option<&[RewriteRule]> {
        self.rewrites.as_deref()
    }

    pub fn fulltext(&self) -> Option<&NamedMap<FulltextIndex>> {
        self.fulltext.as_ref()
    }

    /// Top-level members not modelled by this type, in input order.
    pub fn extras(&self) -> &IndexMap<String, Value> {
        &self.extras
    }

    pub fn view(&self, name: &str) -> Option<&MapReduce> {
        self.views.as_ref().and_then(|views| views.get(name))
    }

    pub fn search_index(&self, name: &str) -> Option<&SearchIndex> {
        self.indexes.as_ref().and_then(|indexes| indexes.get(name))
    }

    pub fn filter(&self, name: &str) -> Option<&FunctionBody> {
        self.filters.as_ref().and_then(|filters| filters.get(name))
    }

    pub fn show(&self, name: &str) -> Option<&FunctionBody> {
        self.shows.as_ref().and_then(|shows| shows.get(name))
    }

    pub fn list(&self, name: &str) -> Option<&FunctionBody> {
        self.lists.as_ref().and_then(|lists| lists.get(name))
    }

    pub fn update(&self, name: &str) -> Option<&FunctionBody> {
        self.updates.as_ref().and_then(|updates| updates.get(name))
    }

    pub fn fulltext_index(&self, name: &str) -> Option<&FulltextIndex> {
        self.fulltext.as_ref().and_then(|fulltext| fulltext.get(name))
    }

    /// Returns a copy carrying the given revision.
    pub fn with_rev(mut self, rev: &str) -> Self {
        self.rev = Some(rev.to_string());
        self
    }

    /// Returns a copy without a revision, as needed to create the document.
    pub fn without_rev(mut self) -> Self {
        self.rev = None;
        self
    }

    /// Returns a copy with a different id.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Checks that the id has the `_design/` prefix and a name after it, that every
    /// mapping has non-empty names, that every view has a map and that every rewrite
    /// has a target.
    pub fn validate(&self) -> DesignResult<()> {
        match self.id.strip_prefix(DESIGN_PREFIX) {
            Some(name) if !name.is_empty() => {}
            _ => {
                return Err(invalid(&format!(
                    "Design document id '{}' must start with '{}' followed by a name",
                    self.id, DESIGN_PREFIX
                )))
            }
        }

        check_names("views", self.views.as_ref())?;
        check_names("indexes", self.indexes.as_ref())?;
        check_names("filters", self.filters.as_ref())?;
        check_names("shows", self.shows.as_ref())?;
        check_names("lists", self.lists.as_ref())?;
        check_names("updates", self.updates.as_ref())?;
        check_names("fulltext", self.fulltext.as_ref())?;

        if let Some(views) = &self.views {
            if let Some((name, _)) = views.iter().find(|(_, view)| view.map().is_empty()) {
                return Err(invalid(&format!("View '{}' has an empty map", name)));
            }
        }

        if let Some(rewrites) = &self.rewrites {
            if let Some(position) = rewrites.iter().position(|rule| rule.to().is_empty()) {
                return Err(invalid(&format!(
                    "Rewrite rule {} has an empty target",
                    position
                )));
            }
        }
        Ok(())
    }

    /// Compares the content of two design documents, ignoring `_rev`.
    ///
    /// A document read back from the server differs from a local one only by its
    /// revision when nothing changed, so an upload can be skipped when this holds.
    pub fn content_eq(&self, other: &DesignDocument) -> bool {
        let mine = DesignDocument {
            rev: None,
            ..self.clone()
        };
        let theirs = DesignDocument {
            rev: None,
            ..other.clone()
        };
        mine == theirs
    }

    pub(crate) fn views_mut(&mut self) -> &mut NamedMap<MapReduce> {
        self.views.get_or_insert_with(NamedMap::new)
    }

    pub(crate) fn indexes_mut(&mut self) -> &mut NamedMap<SearchIndex> {
        self.indexes.get_or_insert_with(NamedMap::new)
    }

    pub(crate) fn filters_mut(&mut self) -> &mut NamedMap<FunctionBody> {
        self.filters.get_or_insert_with(NamedMap::new)
    }

    pub(crate) fn shows_mut(&mut self) -> &mut NamedMap<FunctionBody> {
        self.shows.get_or_insert_with(NamedMap::new)
    }

    pub(crate) fn lists_mut(&mut self) -> &mut NamedMap<FunctionBody> {
        self.lists.get_or_insert_with(NamedMap::new)
    }

    pub(crate) fn updates_mut(&mut self) -> &mut NamedMap<FunctionBody> {
        self.updates.get_or_insert_with(NamedMap::new)
    }

    pub(crate) fn fulltext_mut(&mut self) -> &mut NamedMap<FulltextIndex> {
        self.fulltext.get_or_insert_with(NamedMap::new)
    }

    pub(crate) fn rewrites_mut(&mut self) -> &mut Vec<RewriteRule> {
        self.rewrites.get_or_insert_with(Vec::new)
    }

    pub(crate) fn set_language(&mut self, language: &str) {
        self.language = Some(language.to_string());
    }

    pub(crate) fn set_validate_doc_update(&mut self, body: FunctionBody) {
        self.validate_doc_update = Some(body);
    }
}

impl WireFormat for DesignDocument {}

fn check_names<V>(section: &str, map: Option<&NamedMap<V>>) -> DesignResult<()> {
    match map {
        Some(map) if map.keys().any(|name| name.trim().is_empty()) => {
            Err(invalid(&format!("Empty name in '{}'", section)))
        }
        _ => Ok(()),
    }
}

fn invalid(message: &str) -> DesignError {
    log::error!("{}", message);
    DesignError::new(message, ErrorKind::ValidationError)
}
