//! Recommendation Engine Module
//! Maps a district's risk category to canned intervention text.

use crate::data::DistrictRecord;

use super::classifier::RiskCategory;

/// One-line recommendation for a district, deterministic given the inputs.
/// The template carries the district name and the magnitude of the score
/// that tripped the category.
pub fn recommend(record: &DistrictRecord, category: RiskCategory) -> String {
    match category {
        RiskCategory::AccessStress => format!(
            "{}: access health at {:.1} signals enrollment strain; open additional enrollment centers and deploy mobile enrollment vans.",
            record.district, record.access_health
        ),
        RiskCategory::UpdateBurden => format!(
            "{}: update load at {:.1} is straining capacity; set up dedicated biometric update camps and extend operating hours.",
            record.district, record.update_load
        ),
        RiskCategory::StabilityRisk => format!(
            "{}: stability score at {:.1} shows inconsistent delivery; audit center uptime, power backup, and connectivity.",
            record.district, record.stability
        ),
        RiskCategory::Healthy => format!(
            "{} is performing within acceptable ranges; maintain current operations and continue monitoring.",
            record.district
        ),
    }
}

/// Detailed intervention checklist for a category, suitable for a district
/// report.
pub fn action_plan(category: RiskCategory) -> &'static str {
    match category {
        RiskCategory::AccessStress => {
            "1. Increase the number of active enrollment centers, particularly in rural areas\n\
             2. Deploy mobile enrollment vans to reach underserved populations\n\
             3. Partner with local government offices for additional enrollment points\n\
             4. Review appointment scheduling to reduce wait times"
        }
        RiskCategory::UpdateBurden => {
            "1. Set up dedicated biometric update camps in high-demand areas\n\
             2. Offer online appointment booking to manage walk-in crowds\n\
             3. Extend operating hours during peak update periods\n\
             4. Staff and equip centers to handle update volumes efficiently"
        }
        RiskCategory::StabilityRisk => {
            "1. Audit system uptime and address recurring technical failures\n\
             2. Secure reliable power backup and internet connectivity at all centers\n\
             3. Train staff on troubleshooting common issues to minimize downtime\n\
             4. Keep regular maintenance schedules for all enrollment devices"
        }
        RiskCategory::Healthy => {
            "1. Continue regular monitoring of all key metrics\n\
             2. Document best practices for knowledge sharing with other districts\n\
             3. Consider pilot programs for new service innovations\n\
             4. Maintain staff training and equipment maintenance schedules"
        }
    }
}
