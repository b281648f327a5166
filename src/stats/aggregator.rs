//! Score Aggregator Module
//! Computes state- and zone-level rollups from district records.

use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::data::DistrictRecord;

/// Grouping dimension for rollups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    State,
    Zone,
}

/// Mean of each score across a group of districts, plus the member count.
/// Only ever constructed from a non-empty group, so the means are finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate {
    pub count: usize,
    pub mean_dei: f64,
    pub mean_access_health: f64,
    pub mean_update_load: f64,
    pub mean_stability: f64,
}

impl GroupAggregate {
    /// Mean scores over `members`. Returns `None` for an empty slice so an
    /// empty group can never surface as a NaN aggregate.
    pub fn from_members(members: &[&DistrictRecord]) -> Option<Self> {
        if members.is_empty() {
            return None;
        }
        let n = members.len() as f64;
        let mut dei = 0.0;
        let mut access_health = 0.0;
        let mut update_load = 0.0;
        let mut stability = 0.0;
        for record in members {
            dei += record.dei;
            access_health += record.access_health;
            update_load += record.update_load;
            stability += record.stability;
        }
        Some(Self {
            count: members.len(),
            mean_dei: dei / n,
            mean_access_health: access_health / n,
            mean_update_load: update_load / n,
            mean_stability: stability / n,
        })
    }
}

/// Roll records up by state or zone. Groups with zero members are simply
/// absent from the result.
pub fn aggregate(records: &[DistrictRecord], group_by: GroupBy) -> HashMap<String, GroupAggregate> {
    let mut groups: HashMap<String, Vec<&DistrictRecord>> = HashMap::new();
    for record in records {
        let key = match group_by {
            GroupBy::State => record.state.clone(),
            GroupBy::Zone => record.zone.to_string(),
        };
        groups.entry(key).or_default().push(record);
    }

    groups
        .into_par_iter()
        .filter_map(|(key, members)| {
            GroupAggregate::from_members(&members).map(|aggregate| (key, aggregate))
        })
        .collect()
}

/// Districts ranked ascending by DEI, ties broken by district name so the
/// ordering is reproducible, truncated to `limit`.
pub fn worst_by_dei(records: &[DistrictRecord], limit: usize) -> Vec<&DistrictRecord> {
    let mut ranked: Vec<&DistrictRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        a.dei
            .partial_cmp(&b.dei)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.district.cmp(&b.district))
    });
    ranked.truncate(limit);
    ranked
}
