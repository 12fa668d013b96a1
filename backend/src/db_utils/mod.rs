//! Collaborator contracts and their implementations.

pub mod catalog;
pub mod collection;
pub mod manticore_utils;
pub mod memory;
pub mod request;
