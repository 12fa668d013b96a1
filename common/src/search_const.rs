//! Field names and encoding constants shared by the category facet.

/// Separator between category ids inside one request parameter value.
pub const VALUE_DELIMITER: char = '_';

/// Request variable the category facet reads when nothing else is configured.
pub const DEFAULT_REQUEST_VAR: &str = "cat";

/// Facet field used to aggregate category counts.
pub const CATEGORY_FACET_FIELD: &str = "category";

/// Field that carries category membership in added collection filters.
pub const CATEGORY_IDS_FIELD: &str = "category_ids";

/// Upper bound on facet buckets requested from the search engine.
pub const FACET_BUCKET_LIMIT: u64 = 1000;
