use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::base::messages;

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// A single emotion label with the score the classifier assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f64,
}

impl EmotionScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self { label: label.into(), score }
    }
}

/// The label → score distribution produced by the emotion classifier.
///
/// Labels are unique and the scores are kept sorted by descending score (ties
/// broken by label), which is the order they are presented in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClassificationResult {
    scores: Vec<EmotionScore>,
}

impl ClassificationResult {
    /// Build a result from raw scores.
    ///
    /// When a label appears more than once, the last score wins.
    pub fn from_scores(scores: impl IntoIterator<Item = EmotionScore>) -> Self {
        let mut deduped: Vec<EmotionScore> = Vec::new();

        for score in scores {
            match deduped.iter_mut().find(|existing| existing.label == score.label) {
                Some(existing) => existing.score = score.score,
                None => deduped.push(score),
            }
        }

        deduped.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.label.cmp(&b.label)));

        Self { scores: deduped }
    }

    pub fn scores(&self) -> &[EmotionScore] {
        &self.scores
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.scores.iter().find(|s| s.label == label).map(|s| s.score)
    }

    /// The highest scoring emotion, if any.
    pub fn top(&self) -> Option<&EmotionScore> {
        self.scores.first()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Why emotion analysis could not be shown for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ClassifierFailure {
    /// The classifier could not be initialized.
    #[error("Could not load the emotion classification model: {0}")]
    Unavailable(String),
    /// The inference call itself failed.
    #[error("Error analyzing text: {0}")]
    Failed(String),
    /// The classifier answered, but with no usable label/score pairs.
    #[error("The emotion classifier returned no usable results.")]
    EmptyResult,
}

/// Result of the emotion half of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum EmotionOutcome {
    Success(ClassificationResult),
    Degraded(ClassifierFailure),
}

impl EmotionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn scores(&self) -> Option<&ClassificationResult> {
        match self {
            Self::Success(result) => Some(result),
            Self::Degraded(_) => None,
        }
    }
}

/// A submission rejected before any analysis took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("{}", messages::EMPTY_INPUT_PROMPT)]
    EmptyInput,
}
