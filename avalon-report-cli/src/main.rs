//! Avalon Report CLI Application
//!
//! Generates the dataset-overview dashboard for the Avalon nuclear-safety
//! monitoring dataset. It uses the avalon-data library and adds:
//! - The eight-panel overview image (PNG)
//! - The printed summary-statistics block
//!
//! The run is a fixed sequence: load the CSV, derive the panic-mode flag,
//! render the image, print the statistics. Input and output paths are fixed;
//! the tool takes no arguments.

use anyhow::{Context, Result};
use std::path::Path;

mod render;
mod summary;

/// Fixed input path, relative to the working directory
const INPUT_PATH: &str = "avalon_nuclear.csv";

/// Fixed output path, overwritten unconditionally on every run
const OUTPUT_PATH: &str = "slide3_data_overview.png";

fn main() -> Result<()> {
    init_logging();

    log::info!("Avalon Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using dataset library v{}", avalon_data::VERSION);

    let mut dataset = avalon_data::load_csv(Path::new(INPUT_PATH))
        .with_context(|| format!("failed to load dataset from '{}'", INPUT_PATH))?;

    dataset.derive_panic_mode();
    log::info!(
        "Panic mode derived: {} of {} observations flagged",
        dataset.panic_count(),
        dataset.len()
    );

    render::render_report(&dataset, Path::new(OUTPUT_PATH))
        .with_context(|| format!("failed to render report to '{}'", OUTPUT_PATH))?;

    summary::print_summary(&dataset, OUTPUT_PATH);

    Ok(())
}

/// Initialize logging (RUST_LOG overrides the default Info level)
fn init_logging() {
    use env_logger::{Builder, Env};
    use std::io::Write;

    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
