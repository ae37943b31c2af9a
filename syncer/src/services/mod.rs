//! Syncer service implementations

pub mod feed_client;

#[cfg(test)]
pub mod tests;

pub use feed_client::*;
