//! Rendering of analyses for the terminal shell.

use std::fmt::{self, Write};

use serde_json::json;

use crate::base::messages;
use crate::prelude::*;

use super::analysis::Analysis;

/// Width, in cells, of a bar for a score of `1.0`.
const BAR_WIDTH: usize = 40;

const ERROR_MARKER: &str = "❌";
const WARNING_MARKER: &str = "⚠️";

/// How a rendered submission is formatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render the result of one submission.
pub fn render(result: &Result<Analysis, SubmissionError>, format: OutputFormat) -> Res<String> {
    match (result, format) {
        (Ok(analysis), OutputFormat::Text) => render_text(analysis),
        (Ok(analysis), OutputFormat::Json) => Ok(format!("{}\n", serde_json::to_string_pretty(analysis)?)),
        (Err(rejection), OutputFormat::Text) => Ok(format!("{WARNING_MARKER} {rejection}\n")),
        (Err(rejection), OutputFormat::Json) => Ok(format!("{}\n", json!({ "rejected": rejection.to_string() }))),
    }
}

/// Render an analysis as a human readable report.
pub fn render_text(analysis: &Analysis) -> Res<String> {
    let mut out = String::new();
    write_report(&mut out, analysis)?;

    Ok(out)
}

fn write_report(out: &mut String, analysis: &Analysis) -> fmt::Result {
    // Keyword section; always present.

    writeln!(out, "{}", messages::CLASSIFICATION_HEADING)?;
    writeln!(out, "{} {}", messages::DETECTED_ISSUE_PREFIX, analysis.triage.label())?;

    let resources = analysis.triage.resources();
    if !resources.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", messages::RESOURCES_HEADING)?;

        for resource in resources {
            writeln!(out, "  📞 {}", resource.contact)?;
            writeln!(out, "     🔗 {}: {}", messages::HELP_LINK_LABEL, resource.url)?;
        }
    }

    // Emotion section; replaced by an error or a warning when degraded.

    writeln!(out)?;
    match &analysis.emotions {
        EmotionOutcome::Success(result) => {
            writeln!(out, "{}", messages::EMOTION_HEADING)?;

            for line in render_bars(result) {
                writeln!(out, "  {line}")?;
            }
        }
        EmotionOutcome::Degraded(reason) => writeln!(out, "{} {reason}", failure_marker(reason))?,
    }

    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out, "{}", messages::DISCLAIMER)?;

    Ok(())
}

/// Errors (the classifier could not run) and warnings (it ran but had nothing to say) look different.
fn failure_marker(reason: &ClassifierFailure) -> &'static str {
    match reason {
        ClassifierFailure::Unavailable(_) | ClassifierFailure::Failed(_) => ERROR_MARKER,
        ClassifierFailure::EmptyResult => WARNING_MARKER,
    }
}

/// One bar per label, in descending score order.
fn render_bars(result: &ClassificationResult) -> Vec<String> {
    let label_width = result.scores().iter().map(|s| s.label.chars().count()).max().unwrap_or(0);

    result
        .scores()
        .iter()
        .map(|s| {
            let cells = (s.score * BAR_WIDTH as f64).round() as usize;
            format!("{:<label_width$} {:<BAR_WIDTH$} {:.3}", s.label, "█".repeat(cells.min(BAR_WIDTH)), s.score)
        })
        .collect()
}
