//! Category lookups used to label selections and list facet options.

use std::collections::BTreeMap;

use common::category::CategoryRecord;

pub trait CategoryCatalog {
    /// Names of the categories in `ids` that exist. Unknown ids are left out of
    /// the map rather than reported.
    fn find_by_ids(&self, ids: &[u64]) -> anyhow::Result<BTreeMap<u64, String>>;

    /// Direct children of `parent_id`, in catalog order.
    fn children(&self, parent_id: u64) -> anyhow::Result<Vec<CategoryRecord>>;
}
