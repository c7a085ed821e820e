//! Avalon Dataset Library
//!
//! A stateless, reusable library for loading and summarizing observation data
//! from the Avalon nuclear-safety monitoring system.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on the data:
//! - Loads the observation table from a CSV file
//! - Derives the `panic_mode` flag from the recommendation and risk columns
//! - Answers the aggregate queries (counts, spans, top-N) a report needs
//!
//! The library does NOT:
//! - Render charts or images
//! - Format or print report text
//! - Decide file names or output locations
//!
//! All presentation is in the application layer (avalon-report-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use avalon_data::load_csv;
//! use std::path::Path;
//!
//! // Load the observation table and derive the panic-mode flag
//! let mut dataset = load_csv(Path::new("avalon_nuclear.csv")).unwrap();
//! dataset.derive_panic_mode();
//!
//! println!(
//!     "{} observations, {} flagged as panic mode",
//!     dataset.len(),
//!     dataset.panic_count()
//! );
//! ```

// Public modules
pub mod dataset;
pub mod loader;
pub mod types;

// Re-export main types for convenience
pub use dataset::Dataset;
pub use loader::load_csv;
pub use types::{panic_flag, DatasetError, Observation, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: ensure we can build an empty dataset
        let dataset = Dataset::new(Vec::new(), 10);
        assert_eq!(dataset.len(), 0);
        assert!(dataset.is_empty());
    }
}
