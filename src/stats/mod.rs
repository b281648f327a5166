//! Stats module - grouping and aggregation

mod aggregator;

pub use aggregator::{aggregate, worst_by_dei, GroupAggregate, GroupBy};
