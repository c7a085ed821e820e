//! Printed dataset statistics
//!
//! The fixed stdout block emitted after the report image is written: one
//! confirmation line, then the statistics. Kept separate from rendering so
//! the exact line formats can be tested without drawing anything.

use avalon_data::Dataset;

/// Format a count with thousands separators (1234567 -> "1,234,567")
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Share of `part` in `total` as a percentage
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// The confirmation line plus the statistics block, one entry per printed line
pub fn summary_lines(dataset: &Dataset, output_path: &str) -> Vec<String> {
    let total = dataset.len();
    let panic = dataset.panic_count();
    let normal = total - panic;

    vec![
        format!("✓ Visualization saved as '{}'", output_path),
        String::new(),
        "Dataset Statistics:".to_string(),
        format!("  Total records: {}", format_count(total)),
        format!(
            "  Panic mode cases: {} ({:.2}%)",
            panic,
            percentage(panic, total)
        ),
        format!(
            "  Normal cases: {} ({:.2}%)",
            normal,
            percentage(normal, total)
        ),
        format!("  Unique countries: {}", dataset.country_count()),
        format!("  Reactor types: {}", dataset.reactor_type_count()),
    ]
}

/// Print the summary block to stdout
pub fn print_summary(dataset: &Dataset, output_path: &str) {
    for line in summary_lines(dataset, output_path) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avalon_data::Observation;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(180, 1000), 18.0);
        assert_eq!(percentage(0, 1000), 0.0);
        assert_eq!(percentage(0, 0), 0.0);
    }

    fn observation(i: usize, risk: u8, evac: u8) -> Observation {
        let reactor_types = ["PWR", "BWR", "PHWR", "SMR"];
        Observation {
            country: format!("Country{:02}", i % 12),
            year: 2015 + (i % 10) as i32,
            true_risk_level: risk,
            avalon_evac_recommendation: evac,
            avalon_shutdown_recommendation: 0,
            incident_occurred: 0,
            public_anxiety_index: 50.0,
            social_media_rumour_index: 30.0,
            regulator_scrutiny_score: 70.0,
            reactor_type_code: reactor_types[i % reactor_types.len()].to_string(),
            panic_mode: 0,
        }
    }

    #[test]
    fn test_printed_statistics_for_reference_scenario() {
        // 1,000 observations, 180 of which satisfy the panic-mode rule
        let rows: Vec<Observation> = (0..1000)
            .map(|i| {
                if i < 180 {
                    observation(i, 1, 1)
                } else {
                    observation(i, 3, 0)
                }
            })
            .collect();
        let mut dataset = Dataset::new(rows, 10);
        dataset.derive_panic_mode();

        let lines = summary_lines(&dataset, "slide3_data_overview.png");
        assert_eq!(
            lines[0],
            "✓ Visualization saved as 'slide3_data_overview.png'"
        );
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Dataset Statistics:");
        assert_eq!(lines[3], "  Total records: 1,000");
        assert_eq!(lines[4], "  Panic mode cases: 180 (18.00%)");
        assert_eq!(lines[5], "  Normal cases: 820 (82.00%)");
        assert_eq!(lines[6], "  Unique countries: 12");
        assert_eq!(lines[7], "  Reactor types: 4");
    }

    #[test]
    fn test_statistics_are_stable_across_calls() {
        let rows: Vec<Observation> = (0..50).map(|i| observation(i, 1, 1)).collect();
        let mut dataset = Dataset::new(rows, 10);
        dataset.derive_panic_mode();

        let first = summary_lines(&dataset, "out.png");
        let second = summary_lines(&dataset, "out.png");
        assert_eq!(first, second);
    }
}
