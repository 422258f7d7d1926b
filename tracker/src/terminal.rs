use std::fmt::Write as _;

use colored::Colorize as _;
use rule_redline::{FoldedRow, LeftStatus, RedlineRow, RightStatus};

use crate::{
    app_state::database::models::VersionMetadata,
    change_detection::Outcome,
    comparison::{DocumentSummary, VersionComparison},
    errors::TrackerError,
    registry::{Registry, TrackedDocument},
};

const IDENTICAL_NOTICE: &str = "These versions are identical.";
const LINE_NUMBER_WIDTH: usize = 5;

/// Renders a comparison as two columns: the older version on the left, the
/// newer on the right.
pub fn format_comparison(comparison: &VersionComparison, column_width: usize) -> String {
    if let Some(error) = &comparison.error {
        return format!("{} {}\n", "Cannot compare versions:".red().bold(), error.message);
    }
    if comparison.identical {
        return format!("{}\n", IDENTICAL_NOTICE.green());
    }

    let mut output = String::new();
    if let (Some(from), Some(to)) = (&comparison.from, &comparison.to) {
        let _ = writeln!(
            output,
            "{}",
            format!(
                "{:LINE_NUMBER_WIDTH$} {} {:LINE_NUMBER_WIDTH$} {}",
                "",
                fit(&version_heading(from), column_width),
                "",
                version_heading(to),
            )
            .bold()
        );
    }

    for row in &comparison.rows {
        let line = match row {
            FoldedRow::Row(row) => format_row(row, column_width),
            FoldedRow::Skipped { count, .. } => {
                let noun = if *count == 1 { "line" } else { "lines" };
                format!("  ... {count} unchanged {noun} ...").dimmed().to_string()
            }
        };
        output.push_str(&line);
        output.push('\n');
    }

    let stats = comparison.stats;
    let _ = writeln!(
        output,
        "{} {} {}",
        format!("+{}", stats.added).green(),
        format!("-{}", stats.deleted).red(),
        format!("={}", stats.unchanged).dimmed(),
    );

    output
}

fn version_heading(version: &VersionMetadata) -> String {
    format!(
        "#{} {} ({})",
        version.id,
        version.captured_at.format("%Y-%m-%d %H:%M"),
        version.label
    )
}

fn format_row(row: &RedlineRow, column_width: usize) -> String {
    let left_number = line_number(row.left.line_number);
    let left_text = fit(row.left.text.as_deref().unwrap_or_default(), column_width);
    let left = match row.left.status {
        LeftStatus::Unchanged => format!("{left_number}  {left_text}").normal(),
        LeftStatus::Deleted => format!("{left_number} -{left_text}").red(),
        LeftStatus::Absent => format!("{left_number}  {left_text}").dimmed(),
    };

    let right_number = line_number(row.right.line_number);
    let right_text = row.right.text.as_deref().unwrap_or_default();
    let right = match row.right.status {
        RightStatus::Unchanged => format!("{right_number}  {right_text}").normal(),
        RightStatus::Added => format!("{right_number} +{right_text}").green(),
        RightStatus::Absent => format!("{right_number}  {right_text}").dimmed(),
    };

    format!("{left} │ {right}").trim_end().to_owned()
}

fn line_number(number: Option<usize>) -> String {
    number.map_or_else(
        || " ".repeat(LINE_NUMBER_WIDTH),
        |number| format!("{number:>LINE_NUMBER_WIDTH$}"),
    )
}

/// Pads or truncates to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return format!("{text:width$}");
    }

    let mut truncated = text.chars().take(width.saturating_sub(1)).collect::<String>();
    truncated.push('…');
    truncated
}

pub fn format_rules(registry: &Registry) -> String {
    if registry.is_empty() {
        return "No rules are tracked.\n".to_owned();
    }

    registry.iter().fold(String::new(), |mut output, document| {
        let _ = writeln!(
            output,
            "{:<10} {} {}",
            document.id.bold(),
            document.name,
            document.locator.dimmed()
        );
        output
    })
}

/// One line per audited rule, errors included in place. The first error is
/// handed back so that the caller can still fail after everything is shown.
pub fn format_audit<'a, I>(results: I) -> (String, Option<TrackerError>)
where
    I: IntoIterator<Item = (&'a TrackedDocument, Result<Outcome, TrackerError>)>,
{
    let mut output = String::new();
    let mut first_error = None;

    for (document, result) in results {
        let status = match result {
            Ok(outcome) => {
                let label = outcome.to_string();
                match outcome {
                    Outcome::NoChange => label.green(),
                    Outcome::BaselineEstablished { .. } => label.cyan(),
                    Outcome::ChangeLogged { .. } => label.yellow(),
                    Outcome::Rejected { .. } => label.red(),
                }
            }
            Err(error) => {
                let status = format!("Error: {error}").red().bold();
                first_error.get_or_insert(error);
                status
            }
        };

        let _ = writeln!(output, "{:<10} {status}", document.id);
    }

    (output, first_error)
}

pub fn format_history(history: &[VersionMetadata], summary: &DocumentSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{}",
        format!("{:>6}  {:<20} {:>10}  {}", "ID", "CAPTURED AT", "LENGTH", "LABEL").bold()
    );

    for version in history {
        let _ = writeln!(
            output,
            "{:>6}  {:<20} {:>10}  {}",
            version.id,
            version.captured_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            version.text_length,
            version.label
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Versions archived: {}", summary.version_count);
    if let (Some(captured_at), Some(length)) =
        (summary.latest_captured_at, summary.latest_text_length)
    {
        let _ = writeln!(output, "Latest check: {}", captured_at.format("%Y-%m-%d"));
        let _ = writeln!(output, "Text length: {length} chars");
    }

    output
}
