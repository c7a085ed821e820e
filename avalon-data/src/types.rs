//! Core types for the Avalon dataset library
//!
//! This module defines the observation row type deserialized from the CSV
//! file, the panic-mode rule, and the library's error type. The library only
//! reads and summarizes the table - it never writes data back.

use serde::Deserialize;

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;

/// One monitored facility/time-period observation from the CSV file
///
/// Fields are matched to CSV columns by header name. Columns not listed here
/// are ignored; a missing required column fails the load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    /// Facility's country
    pub country: String,
    /// Observation year
    pub year: i32,
    /// Ground-truth risk classification (expected domain 0-3)
    pub true_risk_level: u8,
    /// 1 if the system recommended evacuation
    pub avalon_evac_recommendation: u8,
    /// 1 if the system recommended a shutdown
    pub avalon_shutdown_recommendation: u8,
    /// 1 if an incident actually happened
    pub incident_occurred: u8,
    /// External pressure signal: public anxiety
    pub public_anxiety_index: f64,
    /// External pressure signal: social-media rumour intensity
    pub social_media_rumour_index: f64,
    /// External pressure signal: regulatory scrutiny
    pub regulator_scrutiny_score: f64,
    /// Reactor type identifier
    pub reactor_type_code: String,
    /// Derived flag, not present in the CSV (see [`panic_flag`])
    #[serde(skip)]
    pub panic_mode: u8,
}

/// The panic-mode rule as a pure function of its three inputs
///
/// Returns 1 iff an evacuation or shutdown was recommended while the
/// ground-truth risk level was at most 2, otherwise 0.
pub fn panic_flag(evac: u8, shutdown: u8, risk_level: u8) -> u8 {
    u8::from((evac == 1 || shutdown == 1) && risk_level <= 2)
}

/// Errors that can occur while loading the dataset
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset contains no observations")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_flag_truth_table() {
        // Exhaustive over evac x shutdown x risk level
        for evac in 0..=1u8 {
            for shutdown in 0..=1u8 {
                for risk in 0..=3u8 {
                    let expected = u8::from((evac == 1 || shutdown == 1) && risk <= 2);
                    assert_eq!(
                        panic_flag(evac, shutdown, risk),
                        expected,
                        "evac={} shutdown={} risk={}",
                        evac,
                        shutdown,
                        risk
                    );
                }
            }
        }
    }

    #[test]
    fn test_panic_flag_high_risk_never_flags() {
        assert_eq!(panic_flag(1, 1, 3), 0);
        assert_eq!(panic_flag(1, 0, 3), 0);
        assert_eq!(panic_flag(0, 1, 3), 0);
    }

    #[test]
    fn test_panic_flag_no_recommendation_never_flags() {
        for risk in 0..=3u8 {
            assert_eq!(panic_flag(0, 0, risk), 0);
        }
    }
}
