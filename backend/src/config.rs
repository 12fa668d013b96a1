//! Filter settings and their environment fallbacks.

use common::search_const::{CATEGORY_FACET_FIELD, DEFAULT_REQUEST_VAR, FACET_BUCKET_LIMIT};
use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Request variable holding the `_`-joined selection.
    pub request_var: String,
    /// Facet field aggregated for option counts.
    pub facet_field: String,
    pub manticore_url: String,
    pub manticore_table: String,
    pub facet_limit: u64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        FilterSettings {
            request_var: DEFAULT_REQUEST_VAR.to_string(),
            facet_field: CATEGORY_FACET_FIELD.to_string(),
            manticore_url: "http://127.0.0.1:9308".to_string(),
            manticore_table: "catalog_products".to_string(),
            facet_limit: FACET_BUCKET_LIMIT,
        }
    }
}

impl FilterSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        FilterSettings {
            request_var: std::env::var("LAYERED_NAV_REQUEST_VAR").unwrap_or(defaults.request_var),
            manticore_url: std::env::var("MANTICORE_URL").unwrap_or(defaults.manticore_url),
            manticore_table: std::env::var("MANTICORE_TABLE").unwrap_or(defaults.manticore_table),
            ..defaults
        }
    }

    pub fn with_request_var(mut self, request_var: impl Into<String>) -> Self {
        self.request_var = request_var.into();
        self
    }
}
