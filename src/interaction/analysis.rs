use serde::Serialize;

use crate::prelude::*;
use crate::service::classifier::ClassifierHandle;

/// The merged result of one submission: keyword triage plus emotion analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub triage: TriageOutcome,
    pub emotions: EmotionOutcome,
}

/// Handle a single submission end to end.
///
/// The text goes unchanged to both the triage engine and the classifier; the
/// two results are independent, so a degraded classifier never affects the
/// triage half. Submissions with no text at all are rejected before either
/// runs; whitespace-only text is analyzed like any other.
#[instrument(skip_all, fields(len = text.len()))]
pub async fn handle_submission(text: &str, engine: &TriageEngine, classifier: &ClassifierHandle) -> Result<Analysis, SubmissionError> {
    if text.is_empty() {
        warn!("Rejected empty submission.");
        return Err(SubmissionError::EmptyInput);
    }

    let triage = engine.triage(text);

    info!("Triage result: {}", triage.label());

    let emotions = classifier.classify(text).await;

    match &emotions {
        EmotionOutcome::Success(result) => {
            if let Some(top) = result.top() {
                info!("Top emotion: {} ({:.3})", top.label, top.score);
            }
        }
        EmotionOutcome::Degraded(reason) => warn!("Emotion analysis unavailable: {reason}"),
    }

    Ok(Analysis { triage, emotions })
}
