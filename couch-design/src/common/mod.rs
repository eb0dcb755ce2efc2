//! Shared building blocks of the descriptor model.
//!
//! - [`FunctionBody`] - opaque embedded script source
//! - [`SortOrder`] - `asc` / `desc` direction of a json index field
//! - [`WireFormat`] - JSON conversion shared by every top-level descriptor
//! - constants such as the `_design/` prefix and built-in reducer keywords

mod constants;
mod function_body;
pub(crate) mod names;
mod sort_order;
mod wire;

pub use constants::*;
pub use names::NamedMap;
pub use function_body::*;
pub use sort_order::*;
pub use wire::*;
