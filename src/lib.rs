//! Nexus Equity - District Digital Equity Metrics & Risk Analysis
//!
//! Loads a pre-computed CSV of district-level equity metrics into an
//! immutable in-memory dataset and answers state, zone, and district
//! queries: score rollups, risk classification, and recommendations.
//! [`EquityDataset`] is the entry point presentation code calls.

pub mod data;
pub mod query;
pub mod risk;
pub mod stats;

pub use data::{
    load_dataset, DataFormatError, DistrictRecord, LoadOutcome, Metric, Zone, REQUIRED_COLUMNS,
};
pub use query::{DistrictProfile, EquityDataset, NotFoundError, RiskCounts, StateOverview};
pub use risk::{action_plan, band, classify, recommend, Band, ClassificationConfig, RiskCategory};
pub use stats::{aggregate, worst_by_dei, GroupAggregate, GroupBy};
