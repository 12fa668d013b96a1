//! Request-scoped record of the filters applied to the current page.

use common::search_result::FilterStateItem;


#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    items: Vec<FilterStateItem>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(&mut self, item: FilterStateItem) {
        tracing::trace!(request_var = %item.request_var, value = item.value, "Registering active filter");
        self.items.push(item);
    }

    pub fn items(&self) -> &[FilterStateItem] {
        &self.items
    }

    pub fn items_for<'a>(&'a self, request_var: &'a str) -> impl Iterator<Item = &'a FilterStateItem> + 'a {
        self.items.iter().filter(move |item| item.request_var == request_var)
    }

    /// Removes the first entry registered for `value` under `request_var`.
    pub fn remove_filter(&mut self, request_var: &str, value: u64) -> Option<FilterStateItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.request_var == request_var && item.value == value)?;
        Some(self.items.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
