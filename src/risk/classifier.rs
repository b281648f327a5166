//! Risk Classifier Module
//! Assigns risk categories and score bands from district scores.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::{DistrictRecord, Metric};

/// Thresholds driving [`classify`]. Injected rather than hard-coded so
/// boundary behaviour can be probed without touching production defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub dei_floor: f64,
    pub access_health_floor: f64,
    pub update_load_ceiling: f64,
    pub stability_ceiling: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            dei_floor: 50.0,
            access_health_floor: 50.0,
            update_load_ceiling: 70.0,
            stability_ceiling: 60.0,
        }
    }
}

/// Primary risk facing a district, derived purely from its score tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Healthy,
    AccessStress,
    UpdateBurden,
    StabilityRisk,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Healthy,
        RiskCategory::AccessStress,
        RiskCategory::UpdateBurden,
        RiskCategory::StabilityRisk,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Healthy => "Healthy",
            RiskCategory::AccessStress => "Access Stress",
            RiskCategory::UpdateBurden => "Update Burden",
            RiskCategory::StabilityRisk => "Stability Risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a district. First matching condition wins:
///
/// 1. `dei >= dei_floor` is healthy outright (inclusive at the floor);
/// 2. `access_health < access_health_floor` is access stress;
/// 3. `update_load > update_load_ceiling` is update burden;
/// 4. `stability > stability_ceiling` is stability risk;
/// 5. otherwise healthy.
///
/// The burden checks are strict, so a score sitting exactly on a threshold
/// never triggers that risk.
pub fn classify(record: &DistrictRecord, config: &ClassificationConfig) -> RiskCategory {
    if record.dei >= config.dei_floor {
        return RiskCategory::Healthy;
    }
    if record.access_health < config.access_health_floor {
        return RiskCategory::AccessStress;
    }
    if record.update_load > config.update_load_ceiling {
        return RiskCategory::UpdateBurden;
    }
    if record.stability > config.stability_ceiling {
        return RiskCategory::StabilityRisk;
    }
    RiskCategory::Healthy
}

/// Qualitative band for a single score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Excellent,
    Good,
    NeedsAttention,
    Critical,
}

impl Band {
    pub fn label(self) -> &'static str {
        match self {
            Band::Excellent => "Excellent",
            Band::Good => "Good",
            Band::NeedsAttention => "Needs Attention",
            Band::Critical => "Critical",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Band a score according to the metric's orientation. Burden-style metrics
/// read the scale in reverse.
pub fn band(metric: Metric, score: f64) -> Band {
    if metric.higher_is_better() {
        if score >= 75.0 {
            Band::Excellent
        } else if score >= 50.0 {
            Band::Good
        } else if score >= 30.0 {
            Band::NeedsAttention
        } else {
            Band::Critical
        }
    } else if score <= 25.0 {
        Band::Excellent
    } else if score <= 50.0 {
        Band::Good
    } else if score <= 70.0 {
        Band::NeedsAttention
    } else {
        Band::Critical
    }
}
