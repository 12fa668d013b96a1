//! Multi-select category filter for layered navigation.

use common::category::CategoryRecord;
use common::search_query::FilterValueSet;
use common::search_result::{FacetOption, FilterStateItem};

use crate::api::search::search_facets::category_facet_options;
use crate::config::FilterSettings;
use crate::db_utils::catalog::CategoryCatalog;
use crate::db_utils::collection::{CollectionProvider, SearchResultProvider};
use crate::db_utils::request::RequestParameters;
use crate::navigation_state::NavigationState;


/// Request-scoped state the filters of one page share.
#[derive(Debug, Clone)]
pub struct NavigationLayer<C> {
    pub product_collection: C,
    pub current_category: CategoryRecord,
    pub state: NavigationState,
}

impl<C: SearchResultProvider> NavigationLayer<C> {
    pub fn new(product_collection: C, current_category: CategoryRecord) -> Self {
        NavigationLayer {
            product_collection,
            current_category,
            state: NavigationState::new(),
        }
    }
}


/// A layered navigation filter bound to one request variable.
pub trait LayerFilter {
    type Collection: SearchResultProvider;

    fn request_var(&self) -> &str;

    /// Reads the selection from `request`, restricts the layer's product
    /// collection and registers the selection in the navigation state.
    fn apply(
        &mut self,
        request: &dyn RequestParameters,
        layer: &mut NavigationLayer<Self::Collection>,
    ) -> anyhow::Result<()>;

    /// Selection parsed by the last `apply`.
    fn value_as_array(&self) -> &FilterValueSet;

    fn available_options(&self, layer: &NavigationLayer<Self::Collection>) -> anyhow::Result<Vec<FacetOption>>;

    /// Request parameter value once `value` is removed from the selection.
    fn reset_option_value(&self, value: u64) -> String;
}


pub struct CategoryFilter<K, P> {
    settings: FilterSettings,
    catalog: K,
    collections: P,
    values: FilterValueSet,
}

impl<K, P> CategoryFilter<K, P>
where
    K: CategoryCatalog,
    P: CollectionProvider,
{
    pub fn new(settings: FilterSettings, catalog: K, collections: P) -> Self {
        CategoryFilter {
            settings,
            catalog,
            collections,
            values: FilterValueSet::default(),
        }
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &K {
        &self.catalog
    }

    /// Restricts `collection` to products in any selected category. An empty
    /// selection leaves the collection untouched.
    pub fn apply_to_collection(&self, collection: &mut P::Collection) {
        if self.values.is_empty() {
            return;
        }
        collection.add_categories_filter(self.values.values());
    }

    fn register_selection(&self, state: &mut NavigationState) -> anyhow::Result<()> {
        let names = self.catalog.find_by_ids(self.values.values())?;
        for value in self.values.iter() {
            let Some(label) = names.get(&value) else {
                tracing::debug!(
                    request_var = %self.settings.request_var,
                    value,
                    "Selected category not found, skipping label"
                );
                continue;
            };
            state.add_filter(FilterStateItem {
                request_var: self.settings.request_var.clone(),
                label: label.clone(),
                value,
                reset_value: self.reset_option_value(value),
            });
        }
        Ok(())
    }
}

impl<K, P> LayerFilter for CategoryFilter<K, P>
where
    K: CategoryCatalog,
    P: CollectionProvider,
{
    type Collection = P::Collection;

    fn request_var(&self) -> &str {
        &self.settings.request_var
    }

    fn apply(
        &mut self,
        request: &dyn RequestParameters,
        layer: &mut NavigationLayer<P::Collection>,
    ) -> anyhow::Result<()> {
        let raw = request.get_param(&self.settings.request_var);
        self.values = FilterValueSet::parse(raw);
        if raw.is_none_or(str::is_empty) {
            return Ok(());
        }
        tracing::debug!(
            request_var = %self.settings.request_var,
            raw = raw.unwrap_or_default(),
            selected = self.values.len(),
            "Applying category filter"
        );

        self.apply_to_collection(&mut layer.product_collection);
        self.register_selection(&mut layer.state)
    }

    fn value_as_array(&self) -> &FilterValueSet {
        &self.values
    }

    fn available_options(&self, layer: &NavigationLayer<P::Collection>) -> anyhow::Result<Vec<FacetOption>> {
        category_facet_options(
            &self.collections,
            &self.catalog,
            layer,
            &self.settings.facet_field,
            &self.values,
        )
    }

    fn reset_option_value(&self, value: u64) -> String {
        self.values.without_first(value)
    }
}
