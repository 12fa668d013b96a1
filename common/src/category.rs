//! Catalog category records as seen by the navigation layer.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: u64,
    pub name: String,
    pub is_active: bool,
}

impl CategoryRecord {
    pub fn new(id: u64, name: impl Into<String>, is_active: bool) -> Self {
        CategoryRecord {
            id,
            name: name.into(),
            is_active,
        }
    }
}
