//! HTTP presentation boundary

pub mod handlers;
