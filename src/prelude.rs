pub use crate::base::{
    config::Config,
    taxonomy::{Category, Resource},
    types::{ClassificationResult, ClassifierFailure, EmotionOutcome, Err, Res, SubmissionError, Void},
};
pub use crate::triage::{MatchMode, TriageEngine, TriageOutcome};
pub use anyhow::anyhow;
pub use tracing::{debug, error, info, instrument, warn};
