use crate::errors::{DesignError, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Specifies the direction of a field in a json index or a sort clause.
///
/// # Variants
/// - `Ascending`: written as `"asc"`
/// - `Descending`: written as `"desc"`
///
/// # Usage
/// ```rust
/// use couch_design::common::SortOrder;
///
/// let order: SortOrder = "desc".parse().unwrap();
/// assert_eq!(order, SortOrder::Descending);
/// assert_eq!(order.as_str(), "desc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z, oldest to newest)
    #[serde(rename = "asc")]
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A, newest to oldest)
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// Looks up a wire name without logging, for callers that report the failure themselves.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "asc" => Some(SortOrder::Ascending),
            "desc" => Some(SortOrder::Descending),
            _ => None,
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::from_wire(s).ok_or_else(|| {
            log::error!("'{}' is not a sort direction", s);
            DesignError::new(
                &format!("'{}' is not a sort direction, expected 'asc' or 'desc'", s),
                ErrorKind::InvalidFieldShape,
            )
        })
    }
}
