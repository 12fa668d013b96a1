//! Result collections the navigation layer filters and aggregates.

use common::search_query::{AddedFilters, FieldCondition, FieldValue};
use common::search_result::FacetedData;
use common::search_const::CATEGORY_IDS_FIELD;

pub trait SearchResultProvider {
    fn add_field_to_filter(&mut self, field: &str, condition: FieldCondition);

    fn added_filters(&self) -> &AddedFilters;

    fn faceted_data(&self, field: &str) -> anyhow::Result<FacetedData>;

    /// Restricts the collection to documents in any of `category_ids`.
    fn add_categories_filter(&mut self, category_ids: &[u64]) {
        let values = category_ids.iter().copied().map(FieldValue::Int).collect();
        self.add_field_to_filter(CATEGORY_IDS_FIELD, FieldCondition::In(values));
    }
}

/// Hands out fresh facet-capable collections for a navigation category.
pub trait CollectionProvider {
    type Collection: SearchResultProvider;

    fn collection_for_category(&self, category_id: u64) -> anyhow::Result<Self::Collection>;
}
