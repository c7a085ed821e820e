//! The observation table and its aggregate queries
//!
//! The `Dataset` owns the loaded rows and answers the read-only questions a
//! report asks of them. Every query is a single pass over the rows; nothing
//! here caches or mutates except the one-time panic-mode derivation.

use crate::types::{panic_flag, Observation};
use std::collections::{BTreeMap, BTreeSet};

/// The in-memory observation table
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All loaded observations, in file order
    rows: Vec<Observation>,
    /// Number of columns in the source CSV header
    source_columns: usize,
}

impl Dataset {
    /// Create a dataset from already-deserialized rows
    pub fn new(rows: Vec<Observation>, source_columns: usize) -> Self {
        Self {
            rows,
            source_columns,
        }
    }

    /// All observations, in file order
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no observations
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of features: the source CSV columns plus the derived flag
    pub fn feature_count(&self) -> usize {
        self.source_columns + 1
    }

    /// Set `panic_mode` on every row from the recommendation and risk columns
    ///
    /// In place and idempotent; the flag is a pure function of columns that
    /// never change after loading.
    pub fn derive_panic_mode(&mut self) {
        for row in &mut self.rows {
            row.panic_mode = panic_flag(
                row.avalon_evac_recommendation,
                row.avalon_shutdown_recommendation,
                row.true_risk_level,
            );
        }
        log::debug!(
            "Derived panic_mode: {} of {} rows flagged",
            self.panic_count(),
            self.rows.len()
        );
    }

    /// Rows currently flagged as panic mode
    pub fn panic_count(&self) -> usize {
        self.rows.iter().filter(|r| r.panic_mode == 1).count()
    }

    /// Number of distinct countries
    pub fn country_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.country.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Number of distinct reactor type codes
    pub fn reactor_type_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.reactor_type_code.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Earliest and latest observation year, or `None` for an empty table
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.rows.first()?.year;
        let span = self.rows.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.year), hi.max(r.year))
        });
        Some(span)
    }

    /// Row count per true risk level, ordered by level ascending
    pub fn risk_level_counts(&self) -> BTreeMap<u8, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.true_risk_level).or_insert(0) += 1;
        }
        counts
    }

    /// (rows without an incident, rows with an incident)
    pub fn incident_counts(&self) -> (usize, usize) {
        let incidents = self.rows.iter().filter(|r| r.incident_occurred == 1).count();
        (self.rows.len() - incidents, incidents)
    }

    /// Row count per observation year, ordered by year ascending
    pub fn year_counts(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.year).or_insert(0) += 1;
        }
        counts
    }

    /// The `limit` countries with the most observations, sorted by count
    /// descending
    ///
    /// Counts are accumulated per country name and stably sorted, so ties
    /// keep their alphabetical order across runs.
    pub fn top_countries(&self, limit: usize) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.country.as_str()).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(country, count)| (country.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    /// All `public_anxiety_index` values, in file order
    pub fn anxiety_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.public_anxiety_index).collect()
    }

    /// All `social_media_rumour_index` values, in file order
    pub fn rumour_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.social_media_rumour_index).collect()
    }

    /// All `regulator_scrutiny_score` values, in file order
    pub fn scrutiny_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.regulator_scrutiny_score).collect()
    }
}
