//! Query Facade Module
//! The immutable dataset handle and the crate's public query surface.

use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::data::{load_dataset, DataFormatError, DistrictRecord, LoadOutcome};
use crate::risk::{classify, recommend, ClassificationConfig, RiskCategory};
use crate::stats::{aggregate, worst_by_dei, GroupAggregate, GroupBy};

/// Recoverable query-time error: the requested key is not in the dataset.
#[derive(Error, Debug)]
pub enum NotFoundError {
    #[error("unknown state: {0}")]
    State(String),
    #[error("unknown district: {district} ({state})")]
    District { state: String, district: String },
}

/// Everything a detail view needs for one district.
#[derive(Debug, Serialize)]
pub struct DistrictProfile<'a> {
    pub record: &'a DistrictRecord,
    pub category: RiskCategory,
    pub recommendation: String,
}

/// Number of districts per risk category within one state.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RiskCounts {
    pub healthy: usize,
    pub access_stress: usize,
    pub update_burden: usize,
    pub stability_risk: usize,
}

impl RiskCounts {
    fn bump(&mut self, category: RiskCategory) {
        match category {
            RiskCategory::Healthy => self.healthy += 1,
            RiskCategory::AccessStress => self.access_stress += 1,
            RiskCategory::UpdateBurden => self.update_burden += 1,
            RiskCategory::StabilityRisk => self.stability_risk += 1,
        }
    }
}

/// State-level rollup with risk composition, extremes, and insight notes.
#[derive(Debug, Serialize)]
pub struct StateOverview {
    pub state: String,
    pub aggregate: GroupAggregate,
    pub risk_counts: RiskCounts,
    pub below_dei_floor: usize,
    pub best_district: String,
    pub best_dei: f64,
    pub worst_district: String,
    pub worst_dei: f64,
    pub notes: Vec<String>,
}

/// The full dataset, loaded once and read-only afterwards. Queries borrow
/// from it; nothing mutates after construction, so shared references are
/// safe across threads.
pub struct EquityDataset {
    records: Vec<DistrictRecord>,
    index: HashMap<(String, String), usize>,
    config: ClassificationConfig,
    dropped_rows: usize,
}

fn key_of(state: &str, district: &str) -> (String, String) {
    (
        state.trim().to_ascii_lowercase(),
        district.trim().to_ascii_lowercase(),
    )
}

impl EquityDataset {
    /// Load from CSV with default classification thresholds.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataFormatError> {
        Self::load_with_config(path, ClassificationConfig::default())
    }

    /// Load from CSV with injected thresholds.
    pub fn load_with_config(
        path: impl AsRef<Path>,
        config: ClassificationConfig,
    ) -> Result<Self, DataFormatError> {
        let LoadOutcome {
            records,
            dropped_rows,
        } = load_dataset(path.as_ref())?;
        let mut dataset = Self::from_records(records, config)?;
        dataset.dropped_rows = dropped_rows;
        Ok(dataset)
    }

    /// Build from records already in memory, enforcing the same
    /// `(state, district)` uniqueness the loader does.
    pub fn from_records(
        records: Vec<DistrictRecord>,
        config: ClassificationConfig,
    ) -> Result<Self, DataFormatError> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index
                .insert(key_of(&record.state, &record.district), i)
                .is_some()
            {
                return Err(DataFormatError::DuplicateDistrict {
                    state: record.state.clone(),
                    district: record.district.clone(),
                });
            }
        }
        Ok(Self {
            records,
            index,
            config,
            dropped_rows: 0,
        })
    }

    pub fn records(&self) -> &[DistrictRecord] {
        &self.records
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    /// Rows the loader discarded for missing values; callers should warn
    /// when this is non-zero.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// All state names, sorted and deduplicated.
    pub fn states(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.iter().map(|r| r.state.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    fn state_members(&self, state: &str) -> Vec<&DistrictRecord> {
        let wanted = state.trim();
        self.records
            .iter()
            .filter(|r| r.state.eq_ignore_ascii_case(wanted))
            .collect()
    }

    /// Record, risk category, and recommendation for one district.
    pub fn district_profile(
        &self,
        state: &str,
        district: &str,
    ) -> Result<DistrictProfile<'_>, NotFoundError> {
        let record = self
            .index
            .get(&key_of(state, district))
            .map(|&i| &self.records[i])
            .ok_or_else(|| {
                if self.state_members(state).is_empty() {
                    NotFoundError::State(state.to_string())
                } else {
                    NotFoundError::District {
                        state: state.to_string(),
                        district: district.to_string(),
                    }
                }
            })?;
        let category = classify(record, &self.config);
        let recommendation = recommend(record, category);
        Ok(DistrictProfile {
            record,
            category,
            recommendation,
        })
    }

    /// Mean scores across a state's districts.
    pub fn state_summary(&self, state: &str) -> Result<GroupAggregate, NotFoundError> {
        let members = self.state_members(state);
        GroupAggregate::from_members(&members)
            .ok_or_else(|| NotFoundError::State(state.to_string()))
    }

    /// Districts of a state sorted by name, stable across calls.
    pub fn list_districts(&self, state: &str) -> Result<Vec<&DistrictRecord>, NotFoundError> {
        let mut members = self.state_members(state);
        if members.is_empty() {
            return Err(NotFoundError::State(state.to_string()));
        }
        members.sort_by(|a, b| a.district.cmp(&b.district));
        Ok(members)
    }

    /// State aggregate plus risk composition, extremes, and insight notes.
    pub fn state_overview(&self, state: &str) -> Result<StateOverview, NotFoundError> {
        let members = self.state_members(state);
        let aggregate = GroupAggregate::from_members(&members)
            .ok_or_else(|| NotFoundError::State(state.to_string()))?;

        let mut risk_counts = RiskCounts::default();
        let mut below_dei_floor = 0usize;
        let mut best = members[0];
        let mut worst = members[0];
        for &record in &members {
            risk_counts.bump(classify(record, &self.config));
            if record.dei < self.config.dei_floor {
                below_dei_floor += 1;
            }
            if record.dei > best.dei || (record.dei == best.dei && record.district < best.district)
            {
                best = record;
            }
            if record.dei < worst.dei
                || (record.dei == worst.dei && record.district < worst.district)
            {
                worst = record;
            }
        }

        let notes = overview_notes(&aggregate, &risk_counts, below_dei_floor, best, worst);
        Ok(StateOverview {
            state: members[0].state.clone(),
            aggregate,
            risk_counts,
            below_dei_floor,
            best_district: best.district.clone(),
            best_dei: best.dei,
            worst_district: worst.district.clone(),
            worst_dei: worst.dei,
            notes,
        })
    }

    /// Mean scores per zone across the whole dataset.
    pub fn zone_summaries(&self) -> HashMap<String, GroupAggregate> {
        aggregate(&self.records, GroupBy::Zone)
    }

    /// Mean scores per state across the whole dataset.
    pub fn state_summaries(&self) -> HashMap<String, GroupAggregate> {
        aggregate(&self.records, GroupBy::State)
    }

    /// The `limit` lowest-DEI districts nationally.
    pub fn worst_districts(&self, limit: usize) -> Vec<&DistrictRecord> {
        worst_by_dei(&self.records, limit)
    }
}

fn overview_notes(
    aggregate: &GroupAggregate,
    risk_counts: &RiskCounts,
    below_dei_floor: usize,
    best: &DistrictRecord,
    worst: &DistrictRecord,
) -> Vec<String> {
    let mut notes = Vec::new();
    if below_dei_floor > 0 {
        notes.push(format!(
            "{below_dei_floor} district(s) score below the DEI floor and need immediate attention"
        ));
    }
    if risk_counts.access_stress > 0 {
        notes.push(format!(
            "{} district(s) face access stress; expand enrollment infrastructure",
            risk_counts.access_stress
        ));
    }
    if risk_counts.update_burden > 0 {
        notes.push(format!(
            "{} district(s) carry heavy update burden; deploy dedicated update camps",
            risk_counts.update_burden
        ));
    }
    if risk_counts.stability_risk > 0 {
        notes.push(format!(
            "{} district(s) show stability risk; audit system uptime and connectivity",
            risk_counts.stability_risk
        ));
    }
    notes.push(if aggregate.mean_dei >= 70.0 {
        "Overall state performance is excellent; focus on maintaining standards".to_string()
    } else if aggregate.mean_dei >= 50.0 {
        "Overall state performance is moderate; targeted improvements can yield significant gains"
            .to_string()
    } else {
        "State-wide performance is below par; a comprehensive intervention strategy is needed"
            .to_string()
    });
    notes.push(format!(
        "Best performer: {} (DEI {:.1})",
        best.district, best.dei
    ));
    notes.push(format!(
        "Needs most attention: {} (DEI {:.1})",
        worst.district, worst.dei
    ));
    notes
}
