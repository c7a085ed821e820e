//! Dataset loading
//!
//! Reads the observation table from a CSV file into memory. Loading is
//! strict: a missing file, a malformed record, or a missing required column
//! aborts with an error; there is no recovery path.

use crate::dataset::Dataset;
use crate::types::{DatasetError, Observation, Result};
use std::fs::File;
use std::path::Path;

/// Load the observation table from a CSV file
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Returns
/// * `Result<Dataset>` - the loaded table, or the first load/parse error
///
/// The header row determines the source column count reported by
/// [`Dataset::feature_count`]. Extra columns are ignored. A file with a
/// header but no data rows is rejected as [`DatasetError::Empty`].
pub fn load_csv(path: &Path) -> Result<Dataset> {
    log::info!("Loading dataset: {:?}", path);

    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let source_columns = reader.headers()?.len();

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let observation: Observation = record?;
        rows.push(observation);
    }

    if rows.is_empty() {
        return Err(DatasetError::Empty);
    }

    log::info!(
        "Dataset loaded: {} observations, {} source columns",
        rows.len(),
        source_columns
    );

    Ok(Dataset::new(rows, source_columns))
}
