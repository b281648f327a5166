//! Data module - district records and CSV loading

mod loader;
mod record;

pub use loader::{load_dataset, DataFormatError, LoadOutcome, REQUIRED_COLUMNS};
pub use record::{DistrictRecord, Metric, ParseZoneError, Zone, SCORE_MAX, SCORE_MIN};
