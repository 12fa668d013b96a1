//! Layered navigation filters.

pub mod search;
