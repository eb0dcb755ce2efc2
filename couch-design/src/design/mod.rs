//! Design documents.
//!
//! A design document is a document with an id starting with `_design/` that bundles the
//! application code of a database: views, search indexes, filters, shows, lists, update
//! handlers, an update validator, rewrite rules and full-text indexes. Function bodies
//! are carried as opaque text.

mod builder;
mod document;
mod map_reduce;
mod rewrite;
mod search;

pub use builder::*;
pub use document::*;
pub use map_reduce::*;
pub use rewrite::*;
pub use search::*;
