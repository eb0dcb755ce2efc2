// document constants
pub const DOC_ID: &str = "_id";
pub const DOC_REVISION: &str = "_rev";
pub const DESIGN_PREFIX: &str = "_design/";

// language constants
pub const LANGUAGE_JAVASCRIPT: &str = "javascript";
pub const LANGUAGE_QUERY: &str = "query";

// built-in reducer keywords
pub const REDUCE_SUM: &str = "_sum";
pub const REDUCE_COUNT: &str = "_count";
pub const REDUCE_STATS: &str = "_stats";
pub const REDUCE_APPROX_COUNT_DISTINCT: &str = "_approx_count_distinct";

// index type constants
pub const JSON_INDEX: &str = "json";
pub const TEXT_INDEX: &str = "text";
pub const SPECIAL_INDEX: &str = "special";

// selector keys
pub const SELECTOR: &str = "selector";
pub const PARTIAL_FILTER_SELECTOR: &str = "partial_filter_selector";

/// Returns `id` with the `_design/` prefix, adding it when missing.
///
/// ```rust
/// use couch_design::common::ensure_design_prefix;
///
/// assert_eq!(ensure_design_prefix("app"), "_design/app");
/// assert_eq!(ensure_design_prefix("_design/app"), "_design/app");
/// ```
pub fn ensure_design_prefix(id: &str) -> String {
    if id.starts_with(DESIGN_PREFIX) {
        id.to_string()
    } else {
        format!("{}{}", DESIGN_PREFIX, id)
    }
}
