use crate::common::WireFormat;
use crate::index::{IndexDefinition, IndexType};
use serde::{Deserialize, Serialize};

/// The index listing returned by a database: `{"total_rows": n, "indexes": [...]}`.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Indexes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_rows: Option<u64>,
    indexes: Vec<IndexDefinition>,
}

impl Indexes {
    pub fn new(indexes: Vec<IndexDefinition>) -> Self {
        Indexes {
            total_rows: Some(indexes.len() as u64),
            indexes,
        }
    }

    pub fn total_rows(&self) -> Option<u64> {
        self.total_rows
    }

    /// Every listed index, the primary index included.
    pub fn all(&self) -> &[IndexDefinition] {
        &self.indexes
    }

    pub fn json_indexes(&self) -> Vec<&IndexDefinition> {
        self.of_type(IndexType::Json)
    }

    pub fn text_indexes(&self) -> Vec<&IndexDefinition> {
        self.of_type(IndexType::Text)
    }

    /// Looks up an index by name.
    pub fn get(&self, name: &str) -> Option<&IndexDefinition> {
        self.indexes.iter().find(|index| index.name() == Some(name))
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    fn of_type(&self, index_type: IndexType) -> Vec<&IndexDefinition> {
        self.indexes
            .iter()
            .filter(|index| index.index_type() == index_type)
            .collect()
    }
}

impl WireFormat for Indexes {}
