//! Multi-select category facet for catalog layered navigation.
//!
//! The filter reads a `_`-joined list of category ids from one request
//! variable, restricts the product collection to any of them, records the
//! selection in the request's navigation state and lists the child categories
//! that can still be added.

pub mod api;
pub mod config;
pub mod db_utils;
pub mod navigation_state;

pub use api::search::{CategoryFilter, LayerFilter, NavigationLayer};
pub use config::FilterSettings;
pub use navigation_state::NavigationState;
