use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};


/// Aggregation result for one facet value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FacetBucket {
    pub count: Option<u64>,
}

impl FacetBucket {
    pub fn with_count(count: u64) -> Self {
        FacetBucket { count: Some(count) }
    }
}

/// Facet buckets keyed by the facet value (a category id for the category facet).
pub type FacetedData = BTreeMap<u64, FacetBucket>;


/// Count shown next to a selectable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetCount {
    /// Number of extra results the option adds to the selection.
    Additional(u64),
    Unknown,
}

impl From<FacetBucket> for FacetCount {
    fn from(bucket: FacetBucket) -> Self {
        match bucket.count {
            Some(count) => FacetCount::Additional(count),
            None => FacetCount::Unknown,
        }
    }
}

impl Display for FacetCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacetCount::Additional(count) => write!(f, "+{count}"),
            FacetCount::Unknown => write!(f, "0"),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetOption {
    pub category_id: u64,
    pub label: String,
    pub count: FacetCount,
    /// Request parameter value that adds this option to the current selection.
    pub select_value: String,
}


/// One active filter in the navigation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterStateItem {
    pub request_var: String,
    pub label: String,
    pub value: u64,
    /// Request parameter value once this filter is removed; empty drops the parameter.
    pub reset_value: String,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_markers() {
        assert_eq!(FacetCount::from(FacetBucket::with_count(3)).to_string(), "+3");
        assert_eq!(FacetCount::from(FacetBucket::default()).to_string(), "0");
    }

    #[test]
    fn option_serializes() {
        let option = FacetOption {
            category_id: 6,
            label: "Hats".to_string(),
            count: FacetCount::Additional(3),
            select_value: "2_4_6".to_string(),
        };
        let json = serde_json::to_string(&option).expect("serialize option");
        let round: FacetOption = serde_json::from_str(&json).expect("deserialize option");
        assert_eq!(round, option);
    }
}
