//! In-memory catalog and result collections.
//!
//! These hold the whole product index and category tree in process memory.
//! Filtering follows the search engine semantics the layer relies on: filters
//! on different fields are combined with AND, the values of one `In` condition
//! with OR.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use common::category::CategoryRecord;
use common::search_const::{CATEGORY_FACET_FIELD, CATEGORY_IDS_FIELD};
use common::search_query::{AddedFilters, FieldCondition, FieldValue};
use common::search_result::{FacetBucket, FacetedData};

use crate::db_utils::catalog::CategoryCatalog;
use crate::db_utils::collection::{CollectionProvider, SearchResultProvider};


#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexedDocument {
    pub id: u64,
    pub category_ids: Vec<u64>,
    pub fields: BTreeMap<String, Vec<FieldValue>>,
}

impl IndexedDocument {
    pub fn new(id: u64, category_ids: &[u64]) -> Self {
        IndexedDocument {
            id,
            category_ids: category_ids.to_vec(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.entry(field.to_string()).or_default().push(value.into());
        self
    }

    fn field_values(&self, field: &str) -> Vec<FieldValue> {
        if field == CATEGORY_IDS_FIELD || field == CATEGORY_FACET_FIELD {
            return self.category_ids.iter().copied().map(FieldValue::Int).collect();
        }
        self.fields.get(field).cloned().unwrap_or_default()
    }
}


#[derive(Debug, Clone, Default)]
pub struct InMemoryIndex {
    documents: Vec<IndexedDocument>,
}

impl InMemoryIndex {
    pub fn new(documents: Vec<IndexedDocument>) -> Self {
        InMemoryIndex { documents }
    }

    pub fn documents(&self) -> &[IndexedDocument] {
        &self.documents
    }
}


#[derive(Debug, Clone)]
pub struct InMemoryCollection {
    index: Arc<InMemoryIndex>,
    filters: AddedFilters,
}

impl InMemoryCollection {
    pub fn new(index: Arc<InMemoryIndex>) -> Self {
        InMemoryCollection {
            index,
            filters: AddedFilters::new(),
        }
    }

    fn matching(&self) -> impl Iterator<Item = &IndexedDocument> + '_ {
        self.index.documents().iter().filter(|doc| {
            self.filters
                .iter()
                .all(|(field, condition)| condition.matches(&doc.field_values(field)))
        })
    }

    pub fn matching_ids(&self) -> Vec<u64> {
        self.matching().map(|doc| doc.id).collect()
    }

    pub fn size(&self) -> usize {
        self.matching().count()
    }
}

impl SearchResultProvider for InMemoryCollection {
    fn add_field_to_filter(&mut self, field: &str, condition: FieldCondition) {
        self.filters.insert(field.to_string(), condition);
    }

    fn added_filters(&self) -> &AddedFilters {
        &self.filters
    }

    fn faceted_data(&self, field: &str) -> anyhow::Result<FacetedData> {
        let mut counts: BTreeMap<u64, u64> = BTreeMap::new();
        for doc in self.matching() {
            let values = doc
                .field_values(field)
                .into_iter()
                .filter_map(|value| match value {
                    FieldValue::Int(i) => Some(i),
                    FieldValue::String(_) => None,
                })
                .collect::<BTreeSet<_>>();
            for value in values {
                *counts.entry(value).or_default() += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|(value, count)| (value, FacetBucket::with_count(count)))
            .collect())
    }
}


/// Collections scoped to one navigation category, the way a category page
/// starts out before any layered filter is applied.
#[derive(Debug, Clone)]
pub struct InMemoryCollectionProvider {
    index: Arc<InMemoryIndex>,
}

impl InMemoryCollectionProvider {
    pub fn new(index: Arc<InMemoryIndex>) -> Self {
        InMemoryCollectionProvider { index }
    }
}

impl CollectionProvider for InMemoryCollectionProvider {
    type Collection = InMemoryCollection;

    fn collection_for_category(&self, category_id: u64) -> anyhow::Result<InMemoryCollection> {
        let mut collection = InMemoryCollection::new(self.index.clone());
        collection.add_field_to_filter(CATEGORY_IDS_FIELD, FieldCondition::Eq(FieldValue::Int(category_id)));
        Ok(collection)
    }
}


#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    categories: BTreeMap<u64, CategoryRecord>,
    children: BTreeMap<u64, Vec<u64>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record` after any children already registered under `parent_id`.
    pub fn insert(&mut self, parent_id: Option<u64>, record: CategoryRecord) {
        if let Some(parent_id) = parent_id {
            self.children.entry(parent_id).or_default().push(record.id);
        }
        self.categories.insert(record.id, record);
    }

    pub fn with_category(mut self, parent_id: Option<u64>, record: CategoryRecord) -> Self {
        self.insert(parent_id, record);
        self
    }

    pub fn get(&self, id: u64) -> Option<&CategoryRecord> {
        self.categories.get(&id)
    }

    /// Drops a category, leaving stale references to it in place.
    pub fn remove(&mut self, id: u64) -> Option<CategoryRecord> {
        self.categories.remove(&id)
    }
}

impl CategoryCatalog for InMemoryCatalog {
    fn find_by_ids(&self, ids: &[u64]) -> anyhow::Result<BTreeMap<u64, String>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.categories.get(id))
            .map(|category| (category.id, category.name.clone()))
            .collect())
    }

    fn children(&self, parent_id: u64) -> anyhow::Result<Vec<CategoryRecord>> {
        let Some(child_ids) = self.children.get(&parent_id) else {
            return Ok(Vec::new());
        };
        Ok(child_ids
            .iter()
            .filter_map(|id| self.categories.get(id))
            .cloned()
            .collect())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> Arc<InMemoryIndex> {
        Arc::new(InMemoryIndex::new(vec![
            IndexedDocument::new(10, &[1, 3]).with_field("brand", "acme"),
            IndexedDocument::new(11, &[5]).with_field("brand", "acme"),
            IndexedDocument::new(12, &[7, 3]).with_field("brand", "globex"),
            IndexedDocument::new(13, &[1]),
        ]))
    }

    #[test]
    fn categories_filter_is_or_across_values() {
        let mut collection = InMemoryCollection::new(index());
        collection.add_categories_filter(&[3, 7]);
        assert_eq!(collection.matching_ids(), vec![10, 12]);
    }

    #[test]
    fn fields_are_and_combined_and_replaced_per_field() {
        let mut collection = InMemoryCollection::new(index());
        collection.add_field_to_filter("brand", FieldCondition::Eq("acme".into()));
        collection.add_categories_filter(&[1]);
        assert_eq!(collection.matching_ids(), vec![10]);

        collection.add_categories_filter(&[5]);
        assert_eq!(collection.matching_ids(), vec![11]);
        assert_eq!(collection.added_filters().len(), 2);
    }

    #[test]
    fn facet_counts_documents_once_per_value() {
        let mut collection = InMemoryCollection::new(index());
        collection.add_field_to_filter("brand", FieldCondition::Eq("acme".into()));
        let facets = collection.faceted_data(CATEGORY_FACET_FIELD).expect("facet");
        assert_eq!(facets.get(&1), Some(&FacetBucket::with_count(1)));
        assert_eq!(facets.get(&3), Some(&FacetBucket::with_count(1)));
        assert_eq!(facets.get(&5), Some(&FacetBucket::with_count(1)));
        assert!(!facets.contains_key(&7));
    }

    #[test]
    fn catalog_keeps_child_order_and_skips_unknown_ids() {
        let catalog = InMemoryCatalog::new()
            .with_category(None, CategoryRecord::new(1, "Root", true))
            .with_category(Some(1), CategoryRecord::new(9, "Zeta", true))
            .with_category(Some(1), CategoryRecord::new(2, "Alpha", false));
        let children = catalog.children(1).expect("children");
        assert_eq!(children.iter().map(|c| c.id).collect::<Vec<_>>(), vec![9, 2]);
        assert!(catalog.children(9).expect("children").is_empty());

        let names = catalog.find_by_ids(&[2, 404]).expect("names");
        assert_eq!(names.len(), 1);
        assert_eq!(names.get(&2).map(String::as_str), Some("Alpha"));
    }
}
