//! Category facet filter and its query helpers.

mod category_filter;
pub use category_filter::{CategoryFilter, LayerFilter, NavigationLayer};

mod search_facets;
pub use search_facets::{category_facet_options, unselected_category_collection};

pub mod search_sql;
