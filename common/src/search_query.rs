//! Shared filter query models and helpers.

use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::search_const::VALUE_DELIMITER;


/// Category ids selected through one request parameter, in parameter order.
///
/// Duplicates are kept. The set is never edited in place: removing or adding a
/// value produces the parameter string for a new request instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterValueSet(Vec<u64>);

impl FilterValueSet {
    /// Parses a raw `_`-joined parameter value.
    ///
    /// Tokens that are not the canonical decimal form of a non-negative integer
    /// (leading zeros, signs, whitespace, anything non-numeric) are dropped.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        if raw.is_empty() {
            return Self::default();
        }
        let values = raw
            .split(VALUE_DELIMITER)
            .filter_map(|token| {
                let value = token.parse::<u64>().ok()?;
                (value.to_string() == token).then_some(value)
            })
            .collect();
        Self(values)
    }

    pub fn values(&self) -> &[u64] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, value: u64) -> bool {
        self.0.contains(&value)
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    /// Parameter value with the first occurrence of `value` removed.
    ///
    /// A value that is not selected leaves the selection as it is.
    pub fn without_first(&self, value: u64) -> String {
        let mut values = self.0.clone();
        if let Some(index) = values.iter().position(|v| *v == value) {
            values.remove(index);
        }
        join_values(&values)
    }

    /// Parameter value that selects `value` on top of the current selection.
    pub fn with_added(&self, value: u64) -> String {
        let mut values = self.0.clone();
        values.push(value);
        join_values(&values)
    }
}

impl From<Vec<u64>> for FilterValueSet {
    fn from(values: Vec<u64>) -> Self {
        FilterValueSet(values)
    }
}

// Renders the set back into its request parameter form.
impl Display for FilterValueSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", join_values(&self.0))
    }
}

fn join_values(values: &[u64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(VALUE_DELIMITER.to_string().as_str())
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum FieldValue {
    String(String),
    Int(u64),
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

/// Condition attached to one field of a result collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldCondition {
    Eq(FieldValue),
    /// Matches when the field holds any of the listed values.
    In(Vec<FieldValue>),
}

impl FieldCondition {
    pub fn matches(&self, candidates: &[FieldValue]) -> bool {
        match self {
            FieldCondition::Eq(value) => candidates.contains(value),
            FieldCondition::In(values) => values.iter().any(|v| candidates.contains(v)),
        }
    }
}

/// Filters added to a collection, keyed by field. Adding a filter for a field
/// replaces the previous one.
pub type AddedFilters = BTreeMap<String, FieldCondition>;


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_absent_and_empty() {
        assert!(FilterValueSet::parse(None).is_empty());
        assert!(FilterValueSet::parse(Some("")).is_empty());
    }

    #[test]
    fn parse_drops_non_canonical_tokens() {
        let set = FilterValueSet::parse(Some("3_abc_07_-2_+4_ 5_5_0__9"));
        assert_eq!(set.values(), &[3, 5, 0, 9]);
    }

    #[test]
    fn parse_keeps_order_and_duplicates() {
        let set = FilterValueSet::parse(Some("9_3_9"));
        assert_eq!(set.values(), &[9, 3, 9]);
    }

    #[test]
    fn parse_drops_overflowing_values() {
        let set = FilterValueSet::parse(Some("18446744073709551616_4"));
        assert_eq!(set.values(), &[4]);
    }

    #[test]
    fn without_first_removes_one_occurrence() {
        let set = FilterValueSet::parse(Some("3_7_9"));
        assert_eq!(set.without_first(7), "3_9");
        assert_eq!(set.without_first(99), "3_7_9");
        assert_eq!(FilterValueSet::parse(Some("5")).without_first(5), "");
        assert_eq!(FilterValueSet::parse(Some("4_1_4")).without_first(4), "1_4");
    }

    #[test]
    fn with_added_appends() {
        assert_eq!(FilterValueSet::parse(Some("2_4")).with_added(6), "2_4_6");
        assert_eq!(FilterValueSet::default().with_added(6), "6");
    }

    #[test]
    fn condition_matching() {
        let doc = vec![FieldValue::Int(1), FieldValue::Int(5)];
        assert!(FieldCondition::Eq(5u64.into()).matches(&doc));
        assert!(FieldCondition::In(vec![3u64.into(), 1u64.into()]).matches(&doc));
        assert!(!FieldCondition::In(vec![3u64.into(), 7u64.into()]).matches(&doc));
        assert!(!FieldCondition::In(vec![]).matches(&doc));
    }

    fn token() -> impl Strategy<Value = String> {
        prop_oneof![
            any::<u32>().prop_map(|v| v.to_string()),
            "[0-9]{1,4}",
            "[-+ a-z]{0,2}[0-9]{0,3}",
        ]
    }

    proptest! {
        #[test]
        fn parse_keeps_exactly_canonical_tokens(tokens in prop::collection::vec(token(), 0..8)) {
            let raw = tokens.join("_");
            let expected = tokens
                .iter()
                .filter_map(|t| t.parse::<u64>().ok().filter(|v| v.to_string() == *t))
                .collect::<Vec<_>>();
            let set = FilterValueSet::parse(Some(raw.as_str()));
            prop_assert_eq!(set.values(), expected.as_slice());
        }

        #[test]
        fn display_round_trips_canonical_sets(values in prop::collection::vec(0u64..100_000, 0..8)) {
            let set = FilterValueSet::from(values.clone());
            let reparsed = FilterValueSet::parse(Some(set.to_string().as_str()));
            prop_assert_eq!(reparsed.values(), values.as_slice());
        }
    }
}
