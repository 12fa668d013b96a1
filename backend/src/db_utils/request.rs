use std::collections::{BTreeMap, HashMap};

/// Flat key/value view of the incoming request parameters.
pub trait RequestParameters {
    fn get_param(&self, name: &str) -> Option<&str>;
}

impl RequestParameters for HashMap<String, String> {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl RequestParameters for BTreeMap<String, String> {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<T: RequestParameters + ?Sized> RequestParameters for &T {
    fn get_param(&self, name: &str) -> Option<&str> {
        (**self).get_param(name)
    }
}
