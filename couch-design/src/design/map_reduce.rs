use crate::common::{
    FunctionBody, REDUCE_APPROX_COUNT_DISTINCT, REDUCE_COUNT, REDUCE_STATS, REDUCE_SUM,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// The map part of a view.
///
/// Views of language `javascript` carry a function body. Views of language `query`
/// carry a JSON object selecting the indexed fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapFunction {
    Source(FunctionBody),
    Query(Map<String, Value>),
}

impl MapFunction {
    pub fn source(&self) -> Option<&FunctionBody> {
        match self {
            MapFunction::Source(body) => Some(body),
            MapFunction::Query(_) => None,
        }
    }

    pub fn query(&self) -> Option<&Map<String, Value>> {
        match self {
            MapFunction::Query(query) => Some(query),
            MapFunction::Source(_) => None,
        }
    }

    /// `true` for a blank function body or an empty query object.
    pub fn is_empty(&self) -> bool {
        match self {
            MapFunction::Source(body) => body.is_blank(),
            MapFunction::Query(query) => query.is_empty(),
        }
    }
}

impl From<&str> for MapFunction {
    fn from(source: &str) -> Self {
        MapFunction::Source(FunctionBody::from(source))
    }
}

impl From<FunctionBody> for MapFunction {
    fn from(body: FunctionBody) -> Self {
        MapFunction::Source(body)
    }
}

impl From<Map<String, Value>> for MapFunction {
    fn from(query: Map<String, Value>) -> Self {
        MapFunction::Query(query)
    }
}

/// Reducers implemented natively by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinReducer {
    Sum,
    Count,
    Stats,
    ApproxCountDistinct,
}

impl BuiltinReducer {
    pub fn keyword(&self) -> &'static str {
        match self {
            BuiltinReducer::Sum => REDUCE_SUM,
            BuiltinReducer::Count => REDUCE_COUNT,
            BuiltinReducer::Stats => REDUCE_STATS,
            BuiltinReducer::ApproxCountDistinct => REDUCE_APPROX_COUNT_DISTINCT,
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<BuiltinReducer> {
        match keyword {
            REDUCE_SUM => Some(BuiltinReducer::Sum),
            REDUCE_COUNT => Some(BuiltinReducer::Count),
            REDUCE_STATS => Some(BuiltinReducer::Stats),
            REDUCE_APPROX_COUNT_DISTINCT => Some(BuiltinReducer::ApproxCountDistinct),
            _ => None,
        }
    }
}

impl Display for BuiltinReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The reduce part of a view.
///
/// Either a built-in keyword such as `_sum` or a function body. The text is kept exactly
/// as given, including surrounding whitespace (`"_sum\n"` is written back unchanged).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reducer(String);

impl Reducer {
    pub fn new(reduce: &str) -> Self {
        Reducer(reduce.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The built-in reducer named by this reducer, ignoring surrounding whitespace.
    pub fn builtin(&self) -> Option<BuiltinReducer> {
        BuiltinReducer::from_keyword(self.0.trim())
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin().is_some()
    }
}

impl From<&str> for Reducer {
    fn from(reduce: &str) -> Self {
        Reducer::new(reduce)
    }
}

impl From<BuiltinReducer> for Reducer {
    fn from(builtin: BuiltinReducer) -> Self {
        Reducer::new(builtin.keyword())
    }
}

impl Display for Reducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A view: a map function and an optional reduce.
///
/// Members this type does not model are kept in [`MapReduce::extras`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapReduce {
    map: MapFunction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reduce: Option<Reducer>,
    /// Name of a database the view results are copied to. Deprecated by the server but
    /// kept when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dbcopy: Option<String>,
    /// Options of a `query` language view; the server keeps the index `def` here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Map<String, Value>>,
    #[serde(flatten)]
    extras: Map<String, Value>,
}

impl MapReduce {
    pub fn new(map: impl Into<MapFunction>) -> Self {
        MapReduce {
            map: map.into(),
            reduce: None,
            dbcopy: None,
            options: None,
            extras: Map::new(),
        }
    }

    pub fn with_reduce(mut self, reduce: impl Into<Reducer>) -> Self {
        self.reduce = Some(reduce.into());
        self
    }

    pub fn with_dbcopy(mut self, dbcopy: &str) -> Self {
        self.dbcopy = Some(dbcopy.to_string());
        self
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn map(&self) -> &MapFunction {
        &self.map
    }

    pub fn reduce(&self) -> Option<&Reducer> {
        self.reduce.as_ref()
    }

    pub fn dbcopy(&self) -> Option<&str> {
        self.dbcopy.as_deref()
    }

    pub fn options(&self) -> Option<&Map<String, Value>> {
        self.options.as_ref()
    }

    pub fn extras(&self) -> &Map<String, Value> {
        &self.extras
    }
}
