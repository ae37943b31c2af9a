//! Test fixtures and utilities

pub mod feeds;

#[allow(unused_imports)]
pub use feeds::*;
