//! Query index definitions.
//!
//! An [`IndexDefinition`] describes a secondary index used by the query endpoint. Its
//! `type` decides the shape of its `def`:
//!
//! - `json`: ordered fields with a direction, `[{"Person_name": "asc"}]`
//! - `text`: ordered fields with a value type plus analyzer settings,
//!   `[{"Movie_runtime": "number"}]`
//! - `special`: the primary `_id` index, only ever read from a listing
//!
//! Definitions are parsed with [`WireFormat`](crate::common::WireFormat) or assembled
//! with [`JsonIndexBuilder`] and [`TextIndexBuilder`].

mod analyzer;
mod builder;
mod definition;
mod field;
mod listing;

pub use analyzer::*;
pub use builder::*;
pub use definition::*;
pub use field::*;
pub use listing::*;
