//! Analysis modules.
//!
//! Aggregation of catalog rows into the facet summary.

pub mod aggregator;

pub use aggregator::*;
