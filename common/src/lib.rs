//! Common library exports shared between the filter backend and its callers.

extern crate serde;


pub mod search_query;
pub mod search_result;
pub mod search_const;
pub mod category;
