//! # couch_design - Design documents and query indexes
//!
//! Typed descriptors for the application code and secondary indexes of a CouchDB
//! compatible document database. The crate reads and writes the exact JSON the server
//! exchanges. It never talks to a server itself.
//!
//! ## Key Features
//!
//! - **Design documents**: views, search indexes, filters, shows, lists, update
//!   handlers, rewrites and full-text indexes with absent and empty sections kept apart
//! - **Query indexes**: `json` and `text` index definitions with type-checked fields
//! - **Selectors**: parsing and fluent construction of query selectors
//! - **Builders**: fluent construction that reports the first mistake from `build()`
//! - **Loader**: design documents read from files and directory trees
//!
//! ## Quick Start
//!
//! ```rust
//! use couch_design::common::WireFormat;
//! use couch_design::design::{BuiltinReducer, DesignDocument};
//! use couch_design::index::IndexDefinition;
//! use couch_design::selector::field;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ddoc = DesignDocument::builder("animals")
//!     .language("javascript")
//!     .view_with_reduce("diet_sum", "function(doc) { emit(doc.diet, 1); }", BuiltinReducer::Sum)
//!     .build()?;
//! let body = ddoc.to_json()?;
//! assert!(body.starts_with(r#"{"_id":"_design/animals""#));
//!
//! let index = IndexDefinition::json_builder()
//!     .name("by_year")
//!     .partial_filter_selector(field("year").gt(2010))
//!     .desc(&["year"])
//!     .build()?;
//! let payload = index.to_create_payload()?;
//! assert_eq!(payload["index"]["fields"][0]["year"], "desc");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Shared types, constants and the [`WireFormat`](common::WireFormat) trait
//! - [`design`] - Design documents and their builder
//! - [`errors`] - Error types and result definitions
//! - [`index`] - Query index definitions, listings and builders
//! - [`loader`] - Loading design documents from disk
//! - [`selector`] - Query selectors

pub mod common;
pub mod design;
pub mod errors;
pub mod index;
pub mod loader;
pub mod selector;
