//! Bulk diagnostic simulation over the risk scorer.
//!
//! Counts how often each band comes out and flags suspicious outputs: a
//! patient under 18 with at least one chronic condition scored LOW. The flag
//! is a review heuristic, not an invariant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use triage_contracts::{assessment::RiskBand, profile::PatientProfile};
use triage_core::traits::RiskScorer;

use crate::generator::ProfileSource;

/// A flagged simulation case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationAnomaly {
    pub age: Option<u8>,
    pub pain_level: Option<u8>,
    pub conditions: Vec<String>,
    pub band: RiskBand,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub runs: usize,
    /// Every band is present, zero if never produced.
    pub band_counts: BTreeMap<RiskBand, usize>,
    pub anomalies: Vec<SimulationAnomaly>,
}

impl SimulationSummary {
    fn empty() -> Self {
        Self {
            runs: 0,
            band_counts: RiskBand::ALL.iter().map(|b| (*b, 0)).collect(),
            anomalies: Vec::new(),
        }
    }

    pub fn count(&self, band: RiskBand) -> usize {
        self.band_counts.get(&band).copied().unwrap_or(0)
    }
}

fn is_anomalous(profile: &PatientProfile, band: RiskBand) -> bool {
    profile.age.is_some_and(|a| a < 18) && !profile.medical_conditions.is_empty() && band == RiskBand::Low
}

/// Score `n` profiles drawn from `source`.
pub fn run_diagnostic_simulation(
    n: usize,
    source: &mut dyn ProfileSource,
    scorer: &dyn RiskScorer,
) -> SimulationSummary {
    let mut summary = SimulationSummary::empty();

    for _ in 0..n {
        let profile = source.next_profile();
        let risk = scorer.assess(&profile);
        *summary.band_counts.entry(risk.band).or_insert(0) += 1;
        summary.runs += 1;

        if is_anomalous(&profile, risk.band) {
            debug!(
                age = ?profile.age,
                conditions = profile.medical_conditions.len(),
                "simulation anomaly"
            );
            summary.anomalies.push(SimulationAnomaly {
                age: profile.age,
                pain_level: profile.pain_level,
                conditions: profile.medical_conditions.clone(),
                band: risk.band,
                factors: risk.factors.into_iter().map(|f| f.rationale).collect(),
            });
        }
    }

    info!(
        runs = summary.runs,
        high = summary.count(RiskBand::High),
        medium = summary.count(RiskBand::Medium),
        low_medium = summary.count(RiskBand::LowMedium),
        low = summary.count(RiskBand::Low),
        anomalies = summary.anomalies.len(),
        "simulation complete"
    );
    summary
}
