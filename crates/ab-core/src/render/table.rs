//! Plain-text tables and bar charts for terminal output.

use crate::experiment::SummaryRow;
use crate::inference::ProbabilityTable;
use crate::model::AnalyticMethod;

/// Header used for the probability column everywhere it is displayed.
pub const PROBABILITY_HEADER: &str = "probability to be best (%)";

/// Render the joined experiment table with left-aligned columns.
pub fn render_summary_table(rows: &[SummaryRow], method: AnalyticMethod) -> String {
    let mut header = vec!["variant", "sample_size", "conversions"];
    if method.is_numeric() {
        header.push("sum_numeric");
    }
    header.push("conversion rate");
    if method.is_numeric() {
        header.push("avg numeric metric");
    }
    header.push(PROBABILITY_HEADER);

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let mut cells = vec![
                r.variant.to_string(),
                r.sample_size.to_string(),
                r.conversions.to_string(),
            ];
            if method.is_numeric() {
                cells.push(r.sum_numeric.map(|v| v.to_string()).unwrap_or_default());
            }
            cells.push(format!("{:.2}%", r.conversion_rate * 100.0));
            if method.is_numeric() {
                cells.push(
                    r.avg_numeric_metric
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            cells.push(format!("{:.2}", r.probability_to_be_best));
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, header.iter().map(|h| h.to_string()), &widths);
    push_line(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
    for row in body {
        push_line(&mut out, row.into_iter(), &widths);
    }
    out
}

fn push_line<I: Iterator<Item = String>>(out: &mut String, cells: I, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}", w = *w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Horizontal bar chart of probabilities, one line per row in table order.
pub fn render_probability_bars(table: &ProbabilityTable, width: usize) -> String {
    let label_width = table
        .rows()
        .iter()
        .map(|r| r.variant.as_str().chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in table.rows() {
        let filled = ((row.probability_to_be_best / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        out.push_str(&format!(
            "{:<lw$} |{}{} {:>6.2}\n",
            row.variant.as_str(),
            "#".repeat(filled),
            " ".repeat(width - filled),
            row.probability_to_be_best,
            lw = label_width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::SimulationMatrix;
    use crate::inference::estimate_best;

    fn row(name: &str, prob: f64) -> SummaryRow {
        SummaryRow {
            variant: name.into(),
            sample_size: 1000,
            conversions: 100,
            sum_numeric: Some(250.0),
            conversion_rate: 0.1,
            avg_numeric_metric: Some(2.5),
            probability_to_be_best: prob,
        }
    }

    #[test]
    fn conversion_table_omits_numeric_columns() {
        let text = render_summary_table(&[row("A", 12.5)], AnalyticMethod::Conversion);
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("variant"));
        assert!(header.contains(PROBABILITY_HEADER));
        assert!(!header.contains("sum_numeric"));
        assert!(text.contains("10.00%"));
        assert!(text.contains("12.50"));
    }

    #[test]
    fn numeric_table_has_metric_columns() {
        let text = render_summary_table(&[row("A", 50.0), row("B", 50.0)], AnalyticMethod::NumericDiscrete);
        assert!(text.contains("avg numeric metric"));
        assert!(text.contains("2.5"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn bars_scale_with_probability() {
        let mut m = SimulationMatrix::with_rows(4);
        m.push_column("A".into(), vec![1.0, 0.0, 0.0, 0.0]).unwrap();
        m.push_column("B".into(), vec![0.0, 1.0, 1.0, 1.0]).unwrap();
        let text = render_probability_bars(&estimate_best(&m), 20);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("B |"));
        assert_eq!(lines[0].matches('#').count(), 15);
        assert_eq!(lines[1].matches('#').count(), 5);
        assert!(lines[0].ends_with("75.00"));
    }
}
