use std::fmt::Write as _;

use crate::reconcile::RecordOutcome;

pub const AUDIT_HEADERS: [&str; 4] = ["name", "cca3", "match", "population"];

pub fn audit_rows(outcomes: &[RecordOutcome]) -> Vec<Vec<String>> {
    outcomes
        .iter()
        .map(|outcome| {
            vec![
                outcome.name.clone(),
                outcome.cca3.clone().unwrap_or_else(|| "-".to_string()),
                outcome.resolution.label().to_string(),
                outcome
                    .resolution
                    .population()
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect()
}

/// Left-aligned columns separated by two spaces, with a dashed rule under the header.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths = headers
        .iter()
        .map(|header| display_width(header))
        .collect::<Vec<_>>();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers.iter().copied(), &widths));
    let rule = widths.iter().map(|w| "-".repeat((*w).max(3))).collect::<Vec<_>>();
    let rule_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<_>>();
    let _ = writeln!(
        output,
        "{}",
        format_row(rule.iter().map(String::as_str), &rule_widths)
    );
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row.iter().map(String::as_str), &widths));
    }
    output
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = cells
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(display_width(cell));
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}
