//! Eight-panel dashboard rendering
//!
//! Draws the fixed dataset-overview figure: a bold title, a 3x4 grid of
//! panels (summary box, panic-mode pie, risk-level bars, incident bars, a
//! full-width row of pressure boxplots, the temporal line, the top-countries
//! bars) and a footer note, written as one PNG. Layout, colors, and labels
//! are all hardcoded; rendering aborts on the first backend error.

use anyhow::Result;
use avalon_data::Dataset;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

use crate::summary::format_count;

/// Output image size in pixels
const WIDTH: u32 = 1600;
const HEIGHT: u32 = 1000;

/// Height of the footer strip at the bottom of the figure
const FOOTER_HEIGHT: i32 = 44;

// Chart palette (flat-ui hex values)
const EMERALD: RGBColor = RGBColor(0x2e, 0xcc, 0x71);
const ALIZARIN: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
const PETER_RIVER: RGBColor = RGBColor(0x34, 0x98, 0xdb);
const ORANGE: RGBColor = RGBColor(0xf3, 0x9c, 0x12);
const AMETHYST: RGBColor = RGBColor(0x9b, 0x59, 0xb6);
const CARROT: RGBColor = RGBColor(0xe6, 0x7e, 0x22);
const WHEAT: RGBColor = RGBColor(0xf5, 0xde, 0xb3);
const LIGHT_YELLOW: RGBColor = RGBColor(0xff, 0xff, 0xe0);

type ReportArea<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Render the complete overview figure to `path`
///
/// The panel sequence is fixed and every panel is always drawn; any backend
/// error aborts the whole render with no partial-output guarantee.
pub fn render_report(dataset: &Dataset, path: &Path) -> Result<()> {
    log::info!("Rendering report: {:?}", path);

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let titled = root.titled(
        "Dataset Overview: Avalon Nuclear Safety Monitoring System",
        ("sans-serif", 34).into_font().style(FontStyle::Bold),
    )?;

    let (_, body_height) = titled.dim_in_pixel();
    let (body, footer) = titled.split_vertically(body_height as i32 - FOOTER_HEIGHT);

    let rows = body.split_evenly((3, 1));
    let top_cells = rows[0].split_evenly((1, 4));
    let bottom_cells = rows[2].split_evenly((1, 2));

    draw_summary_box(&top_cells[0], dataset)?;
    draw_panic_pie(&top_cells[1], dataset)?;
    draw_risk_bars(&top_cells[2], dataset)?;
    draw_incident_bars(&top_cells[3], dataset)?;
    draw_pressure_boxplots(&rows[1], dataset)?;
    draw_temporal_line(&bottom_cells[0], dataset)?;
    draw_top_countries(&bottom_cells[1], dataset)?;
    draw_footer(&footer)?;

    root.present()?;
    log::info!("Report written: {:?}", path);
    Ok(())
}

/// Panel 1: monospace dataset summary on a wheat box
fn draw_summary_box(area: &ReportArea<'_>, dataset: &Dataset) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    area.draw(&Rectangle::new(
        [(14, 18), (w as i32 - 14, h as i32 - 14)],
        WHEAT.mix(0.5).filled(),
    ))?;

    let (year_min, year_max) = dataset.year_span().unwrap_or((0, 0));
    let lines = [
        "DATASET SUMMARY".to_string(),
        "━━━━━━━━━━━━━━━━━".to_string(),
        format!("Records: {}", format_count(dataset.len())),
        format!("Features: {}", dataset.feature_count()),
        format!("Countries: {}", dataset.country_count()),
        format!("Time Span: {}–{}", year_min, year_max),
        // Typed loading rejects missing values, so this is always zero.
        "Missing Values: 0".to_string(),
    ];

    let style = ("monospace", 16).into_font().color(&BLACK);
    for (i, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.as_str(),
            (30, 42 + 28 * i as i32),
            style.clone(),
        ))?;
    }
    Ok(())
}

/// Panel 2: panic-mode share as a two-slice pie
fn draw_panic_pie(area: &ReportArea<'_>, dataset: &Dataset) -> Result<()> {
    let (w, h) = area.dim_in_pixel();

    let title_style = ("sans-serif", 15)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    area.draw(&Text::new(
        "Panic Mode Distribution",
        (w as i32 / 2, 6),
        title_style,
    ))?;
    let subtitle_style = ("sans-serif", 12)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    area.draw(&Text::new(
        "(n=180 panic cases)",
        (w as i32 / 2, 26),
        subtitle_style,
    ))?;

    let panic = dataset.panic_count();
    let normal = dataset.len() - panic;

    let center = (w as i32 / 2, h as i32 / 2 + 16);
    let radius = f64::from(w.min(h)) * 0.30;
    let sizes = [normal as f64, panic as f64];
    let colors = [EMERALD, ALIZARIN];
    let labels = ["Normal", "Panic Mode"];

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style(("sans-serif", 12).into_font().style(FontStyle::Bold));
    pie.percentages(("sans-serif", 11).into_font().color(&BLACK));
    area.draw(&pie)?;
    Ok(())
}

/// Panel 3: observation count per true risk level
fn draw_risk_bars(area: &ReportArea<'_>, dataset: &Dataset) -> Result<()> {
    let counts = dataset.risk_level_counts();
    let y_max = counts.values().copied().max().unwrap_or(1) as f64 * 1.2;

    let mut chart = ChartBuilder::on(area)
        .caption(
            "True Risk Level Distribution",
            ("sans-serif", 15).into_font().style(FontStyle::Bold),
        )
        .margin(8)
        .x_label_area_size(32)
        .y_label_area_size(44)
        .build_cartesian_2d(-0.5f64..3.5f64, 0.0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(4)
        .x_label_formatter(&|v| format!("{}", v.round() as i32))
        .x_desc("True Risk Level")
        .y_desc("Count")
        .axis_desc_style(("sans-serif", 12).into_font().style(FontStyle::Bold))
        .draw()?;

    let bar_colors = [PETER_RIVER, ORANGE, ALIZARIN];
    chart.draw_series(counts.iter().enumerate().map(|(i, (level, count))| {
        let x = f64::from(*level);
        Rectangle::new(
            [(x - 0.35, 0.0), (x + 0.35, *count as f64)],
            bar_colors[i % bar_colors.len()].filled(),
        )
    }))?;

    let annotation = ("sans-serif", 11)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(counts.iter().map(|(level, count)| {
        Text::new(
            count.to_string(),
            (f64::from(*level), *count as f64 + y_max * 0.02),
            annotation.clone(),
        )
    }))?;
    Ok(())
}

/// Panel 4: incident vs. no-incident counts with percentage annotations
fn draw_incident_bars(area: &ReportArea<'_>, dataset: &Dataset) -> Result<()> {
    let total = dataset.len();
    let (no_incident, incident) = dataset.incident_counts();
    let y_max = no_incident.max(incident).max(1) as f64 * 1.25;

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Actual Incidents Occurred",
            ("sans-serif", 15).into_font().style(FontStyle::Bold),
        )
        .margin(8)
        .x_label_area_size(32)
        .y_label_area_size(44)
        .build_cartesian_2d(-0.5f64..1.5f64, 0.0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(2)
        .x_label_formatter(&|v| {
            if *v < 0.5 {
                "No Incident".to_string()
            } else {
                "Incident".to_string()
            }
        })
        .y_desc("Count")
        .axis_desc_style(("sans-serif", 12).into_font().style(FontStyle::Bold))
        .draw()?;

    let bars = [
        (0.0f64, no_incident, EMERALD),
        (1.0f64, incident, ALIZARIN),
    ];
    chart.draw_series(bars.iter().map(|(x, count, color)| {
        Rectangle::new([(x - 0.35, 0.0), (x + 0.35, *count as f64)], color.filled())
    }))?;

    let annotation = ("sans-serif", 11)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    for (x, count, _) in bars {
        let share = percentage_of(count, total);
        chart.draw_series([
            Text::new(
                count.to_string(),
                (x, count as f64 + y_max * 0.09),
                annotation.clone(),
            ),
            Text::new(
                format!("({:.1}%)", share),
                (x, count as f64 + y_max * 0.02),
                annotation.clone(),
            ),
        ])?;
    }
    Ok(())
}

/// Panel 5: the three external-pressure variables as boxplots with means
fn draw_pressure_boxplots(area: &ReportArea<'_>, dataset: &Dataset) -> Result<()> {
    static CATEGORIES: [&str; 3] = ["Public Anxiety", "Social Media Rumors", "Regulatory Scrutiny"];
    let series = [
        (dataset.anxiety_values(), PETER_RIVER),
        (dataset.rumour_values(), AMETHYST),
        (dataset.scrutiny_values(), CARROT),
    ];

    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for (values, _) in &series {
        for v in values {
            let v = *v as f32;
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        lo = 0.0;
        hi = 1.0;
    }
    let pad = (hi - lo).abs().max(1.0) * 0.1;
    let (y_lo, y_hi) = (lo - pad, hi + pad);

    let mut chart = ChartBuilder::on(area)
        .caption(
            "External Pressure Variables Distribution (Key Tipping Point Signals)",
            ("sans-serif", 17).into_font().style(FontStyle::Bold),
        )
        .margin(10)
        .x_label_area_size(34)
        .y_label_area_size(50)
        .build_cartesian_2d(CATEGORIES[..].into_segmented(), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Score")
        .axis_desc_style(("sans-serif", 13).into_font().style(FontStyle::Bold))
        .label_style(("sans-serif", 12))
        .draw()?;

    for (i, (values, color)) in series.iter().enumerate() {
        let quartiles = Quartiles::new(values);
        chart.draw_series([Boxplot::new_vertical(
            SegmentValue::CenterOf(&CATEGORIES[i]),
            &quartiles,
        )
        .width(60)
        .whisker_width(0.5)
        .style(*color)])?;

        // Mean marker, matching the boxes' quartile-only statistics
        let mean = values.iter().sum::<f64>() / values.len().max(1) as f64;
        chart.draw_series([TriangleMarker::new(
            (SegmentValue::CenterOf(&CATEGORIES[i]), mean as f32),
            6,
            EMERALD.filled(),
        )])?;
    }
    Ok(())
}

/// Panel 6: records per year as a filled line with point markers
fn draw_temporal_line(area: &ReportArea<'_>, dataset: &Dataset) -> Result<()> {
    let counts = dataset.year_counts();
    let points: Vec<(i32, f64)> = counts.iter().map(|(y, c)| (*y, *c as f64)).collect();

    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => (0, 1),
    };
    // A single-year table still needs a non-degenerate axis
    let (x_lo, x_hi) = if first == last {
        (first - 1, last + 1)
    } else {
        (first, last)
    };
    let y_max = points
        .iter()
        .map(|(_, c)| *c)
        .fold(1.0f64, f64::max)
        * 1.15;

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Temporal Distribution of Observations",
            ("sans-serif", 15).into_font().style(FontStyle::Bold),
        )
        .margin(8)
        .x_label_area_size(32)
        .y_label_area_size(48)
        .build_cartesian_2d(x_lo..x_hi, 0.0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Number of Records")
        .axis_desc_style(("sans-serif", 12).into_font().style(FontStyle::Bold))
        .draw()?;

    chart.draw_series(AreaSeries::new(
        points.iter().copied(),
        0.0,
        PETER_RIVER.mix(0.3),
    ))?;
    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        PETER_RIVER.stroke_width(2),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|(x, y)| Circle::new((*x, *y), 4, PETER_RIVER.filled())),
    )?;
    Ok(())
}

/// Panel 7: the ten most-observed countries, highest at the top
fn draw_top_countries(area: &ReportArea<'_>, dataset: &Dataset) -> Result<()> {
    let top = dataset.top_countries(10);
    let n = top.len();
    let names: Vec<String> = top.iter().map(|(country, _)| country.clone()).collect();
    let x_max = top.iter().map(|(_, count)| *count).max().unwrap_or(1) as f64 * 1.15;

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Top 10 Countries by Observation Count",
            ("sans-serif", 15).into_font().style(FontStyle::Bold),
        )
        .margin(8)
        .x_label_area_size(32)
        .y_label_area_size(110)
        .build_cartesian_2d(0.0f64..x_max, -0.6f64..(n as f64 - 0.4))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Number of Records")
        .axis_desc_style(("sans-serif", 12).into_font().style(FontStyle::Bold))
        .y_labels(n)
        .y_label_formatter(&|v| {
            // Integer slots carry the country names, highest count on top
            let slot = v.round();
            if (*v - slot).abs() > 0.05 || slot < 0.0 || slot >= n as f64 {
                return String::new();
            }
            names[n - 1 - slot as usize].clone()
        })
        .label_style(("sans-serif", 11))
        .draw()?;

    chart.draw_series(top.iter().enumerate().map(|(rank, (_, count))| {
        let y = (n - 1 - rank) as f64;
        Rectangle::new(
            [(0.0, y - 0.35), (*count as f64, y + 0.35)],
            PETER_RIVER.filled(),
        )
    }))?;

    let annotation = ("sans-serif", 10)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    chart.draw_series(top.iter().enumerate().map(|(rank, (_, count))| {
        let y = (n - 1 - rank) as f64;
        Text::new(
            count.to_string(),
            (*count as f64 + x_max * 0.01, y),
            annotation.clone(),
        )
    }))?;
    Ok(())
}

/// Footer: the panic-mode rule spelled out on a light-yellow band
fn draw_footer(area: &ReportArea<'_>) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);

    area.draw(&Rectangle::new(
        [(center.0 - 390, 4), (center.0 + 390, h as i32 - 4)],
        LIGHT_YELLOW.filled(),
    ))?;

    let style = ("sans-serif", 14)
        .into_font()
        .style(FontStyle::Italic)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        "panic_mode = 1 when Avalon recommends evacuation/shutdown despite true_risk_level ≤ 2",
        center,
        style,
    ))?;
    Ok(())
}

fn percentage_of(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use avalon_data::Observation;

    fn observation(country: &str, year: i32, risk: u8, evac: u8, incident: u8) -> Observation {
        Observation {
            country: country.to_string(),
            year,
            true_risk_level: risk,
            avalon_evac_recommendation: evac,
            avalon_shutdown_recommendation: 0,
            incident_occurred: incident,
            public_anxiety_index: 55.0,
            social_media_rumour_index: 35.0,
            regulator_scrutiny_score: 72.0,
            reactor_type_code: "PWR".to_string(),
            panic_mode: 0,
        }
    }

    #[test]
    fn test_render_writes_a_png() {
        let mut dataset = Dataset::new(
            vec![
                observation("France", 2019, 1, 1, 0),
                observation("France", 2020, 3, 1, 1),
                observation("Japan", 2020, 0, 0, 0),
                observation("Japan", 2021, 2, 1, 0),
                observation("Canada", 2021, 3, 0, 1),
            ],
            10,
        );
        dataset.derive_panic_mode();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overview.png");
        render_report(&dataset, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0, "rendered image is empty");
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(1, 4), 25.0);
        assert_eq!(percentage_of(0, 0), 0.0);
    }
}
