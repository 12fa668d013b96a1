//! Category facet options and the collection they are counted against.

use common::search_const::CATEGORY_IDS_FIELD;
use common::search_query::{FieldCondition, FieldValue, FilterValueSet};
use common::search_result::{FacetCount, FacetOption};

use crate::api::search::category_filter::NavigationLayer;
use crate::db_utils::catalog::CategoryCatalog;
use crate::db_utils::collection::{CollectionProvider, SearchResultProvider};


/// Rebuilds the product collection's filters on a fresh collection for the
/// current category. The category filter is pinned to the current category
/// instead of the selection, so the facet being counted does not constrain
/// itself.
pub fn unselected_category_collection<P: CollectionProvider>(
    collections: &P,
    layer: &NavigationLayer<P::Collection>,
) -> anyhow::Result<P::Collection> {
    let current_category_id = layer.current_category.id;
    let mut collection = collections.collection_for_category(current_category_id)?;
    for (field, condition) in layer.product_collection.added_filters() {
        if field == CATEGORY_IDS_FIELD {
            collection.add_field_to_filter(field, FieldCondition::Eq(FieldValue::Int(current_category_id)));
            continue;
        }
        collection.add_field_to_filter(field, condition.clone());
    }
    Ok(collection)
}

pub fn category_facet_options<P, K>(
    collections: &P,
    catalog: &K,
    layer: &NavigationLayer<P::Collection>,
    facet_field: &str,
    used_options: &FilterValueSet,
) -> anyhow::Result<Vec<FacetOption>>
where
    P: CollectionProvider,
    K: CategoryCatalog,
{
    let collection = unselected_category_collection(collections, layer)?;
    let options_faceted_data = collection.faceted_data(facet_field)?;
    let category = &layer.current_category;
    let children = catalog.children(category.id)?;

    if !category.is_active {
        tracing::debug!(category_id = category.id, "Current category inactive, no facet options");
        return Ok(Vec::new());
    }

    let mut result = Vec::new();
    for child in children {
        if !child.is_active || used_options.contains(child.id) {
            continue;
        }
        let Some(bucket) = options_faceted_data.get(&child.id) else {
            continue;
        };
        result.push(FacetOption {
            category_id: child.id,
            label: child.name,
            count: FacetCount::from(*bucket),
            select_value: used_options.with_added(child.id),
        });
    }
    tracing::trace!(category_id = category.id, options = result.len(), "Computed category facet options");
    Ok(result)
}
