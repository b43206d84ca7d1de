//! Plain-text rendering of dashboard views.

use std::io::{self, Write};
use survey_core::views::table::HEADERS;
use survey_core::views::{format_number, BarChart, ChartSet, LineChart, MapMarker, TableRow};
use survey_core::StaticOverlay;

pub fn table(out: &mut dyn Write, rows: &[TableRow]) -> io::Result<()> {
    let mut header: Vec<String> = HEADERS.iter().map(|h| (*h).to_string()).collect();
    header.push("Id".to_string());

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = row.cells().to_vec();
            cells.push(row.id.to_string());
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    write_row(out, &rule, &widths)?;
    for cells in &body {
        write_row(out, cells, &widths)?;
    }
    Ok(())
}

fn write_row(out: &mut dyn Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

pub fn markers(out: &mut dyn Write, markers: &[MapMarker]) -> io::Result<()> {
    for (idx, marker) in markers.iter().enumerate() {
        writeln!(
            out,
            "{}. {} @ ({}, {}) temp={} band={:?} fill={} ndvi_delta={}",
            idx + 1,
            marker.selection.area,
            format_number(marker.lat),
            format_number(marker.lon),
            marker.selection.temp,
            marker.band,
            marker.fill_color,
            marker.selection.ndvi_delta,
        )?;
    }
    Ok(())
}

pub fn charts(out: &mut dyn Write, charts: &ChartSet) -> io::Result<()> {
    bar_chart(out, &charts.temperature)?;
    writeln!(out)?;
    line_chart(out, &charts.aqi)?;
    writeln!(out)?;
    bar_chart(out, &charts.greenery)
}

fn bar_chart(out: &mut dyn Write, chart: &BarChart) -> io::Result<()> {
    writeln!(out, "{}", chart.label)?;
    let width = label_width(&chart.labels);
    for ((label, value), color) in chart.labels.iter().zip(&chart.values).zip(&chart.colors) {
        writeln!(
            out,
            "  {label:<width$}  {:>8}  {color}",
            format_number(*value)
        )?;
    }
    Ok(())
}

fn line_chart(out: &mut dyn Write, chart: &LineChart) -> io::Result<()> {
    writeln!(out, "{} (line, {})", chart.label, chart.border_color)?;
    let width = label_width(&chart.labels);
    for (label, value) in chart.labels.iter().zip(&chart.values) {
        writeln!(out, "  {label:<width$}  {:>8}", format_number(*value))?;
    }
    Ok(())
}

fn label_width(labels: &[String]) -> usize {
    labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0)
}

pub fn zones(out: &mut dyn Write, overlay: &StaticOverlay) -> io::Result<()> {
    writeln!(out, "mode: {}", overlay.mode())?;
    let names: Vec<String> = overlay.zones().iter().map(|zone| zone.name.clone()).collect();
    let width = label_width(&names);
    for (zone, style) in overlay.zones().iter().zip(overlay.styles()) {
        let summary = overlay.zone_summary(&zone.name);
        let (temp, delta) = summary
            .map(|summary| (summary.temp, summary.ndvi_delta))
            .unwrap_or_default();
        writeln!(
            out,
            "  {:<width$}  fill={}  temp={}  ndvi_delta={}",
            zone.name, style.fill_color, temp, delta
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{table, zones};
    use survey_core::views::table::rows;
    use survey_core::{default_observations, OverlayMode, StaticOverlay};

    #[test]
    fn table_has_header_rule_and_one_line_per_row() {
        let mut out = Vec::new();
        table(&mut out, &rows(&default_observations())).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("#  Area"));
        assert!(lines[1].starts_with("-  ----"));
        assert!(lines[2].starts_with("1  St. Francis School (Mangalagiri)"));
    }

    #[test]
    fn zones_print_active_mode_colors() {
        let mut overlay = StaticOverlay::default();
        overlay.set_mode(OverlayMode::Temperature);
        let mut out = Vec::new();
        zones(&mut out, &overlay).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("mode: temperature\n"));
        assert!(text.contains(&format!("{:<19}  fill=#ffdba8", "Park Zone")));
    }
}
