pub mod huggingface;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, instrument, warn};

use crate::base::types::{ClassificationResult, ClassifierFailure, EmotionOutcome, EmotionScore, Res};

// Traits.

/// Generic emotion classifier trait that clients must implement.
///
/// Implementations run a single inference call and hand back the raw payload.
/// Shape validation happens in [`parse_classification`], not in the client, so
/// every provider goes through the same checks.
#[async_trait]
pub trait GenericEmotionClassifier: Send + Sync + 'static {
    /// Classify `text`, returning the provider's raw label/score payload.
    async fn classify(&self, text: &str) -> Res<Value>;
}

// Structs.

/// Emotion classifier client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ClassifierClient {
    inner: Arc<dyn GenericEmotionClassifier>,
}

impl Deref for ClassifierClient {
    type Target = dyn GenericEmotionClassifier;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ClassifierClient {
    pub fn new(inner: Arc<dyn GenericEmotionClassifier>) -> Self {
        Self { inner }
    }
}

type ClassifierLoader = Arc<dyn Fn() -> Res<ClassifierClient> + Send + Sync>;

/// Lazily initialized, process-lifetime handle to the emotion classifier.
///
/// The loader runs at most once successfully: concurrent first calls wait on the
/// same initialization, and once a client exists it is reused for every
/// request. A failed load is not cached, so the next request tries again.
#[derive(Clone)]
pub struct ClassifierHandle {
    loader: ClassifierLoader,
    cell: Arc<OnceCell<ClassifierClient>>,
}

impl ClassifierHandle {
    /// Create a handle that calls `loader` on first use.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Res<ClassifierClient> + Send + Sync + 'static,
    {
        Self {
            loader: Arc::new(loader),
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Create a handle around an already constructed client.
    pub fn ready(client: ClassifierClient) -> Self {
        let fallback = client.clone();

        Self {
            loader: Arc::new(move || Ok(fallback.clone())),
            cell: Arc::new(OnceCell::new_with(Some(client))),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    /// Get the client, initializing it if this is the first successful call.
    pub async fn get(&self) -> Result<&ClassifierClient, ClassifierFailure> {
        self.cell
            .get_or_try_init(|| async {
                info!("Loading emotion classifier ...");
                (self.loader)()
            })
            .await
            .map_err(|err| {
                error!("Failed to load emotion classifier: {err:#}");
                ClassifierFailure::Unavailable(format!("{err:#}"))
            })
    }

    /// Run the classifier over `text`, degrading instead of failing.
    #[instrument(name = "ClassifierHandle::classify", skip_all)]
    pub async fn classify(&self, text: &str) -> EmotionOutcome {
        let client = match self.get().await {
            Ok(client) => client,
            Err(failure) => return EmotionOutcome::Degraded(failure),
        };

        let payload = match client.classify(text).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Emotion classification failed: {err:#}");
                return EmotionOutcome::Degraded(ClassifierFailure::Failed(format!("{err:#}")));
            }
        };

        let result = parse_classification(&payload);

        if result.is_empty() {
            warn!("Emotion classifier returned no usable scores.");
            return EmotionOutcome::Degraded(ClassifierFailure::EmptyResult);
        }

        debug!("Emotion classifier returned {} scores.", result.len());

        EmotionOutcome::Success(result)
    }
}

// Helpers.

/// Validate a raw classifier payload into a [`ClassificationResult`].
///
/// Accepts a list of `{ "label": string, "score": number }` objects, or a list
/// of such lists (the shape returned for a single batched input), which is
/// flattened. Entries with a missing or empty label, or a score that is not a
/// finite number in `[0, 1]`, are skipped. Anything else yields an empty result.
pub fn parse_classification(payload: &Value) -> ClassificationResult {
    let Value::Array(items) = payload else {
        warn!("Classifier payload is not a list; ignoring it.");
        return ClassificationResult::default();
    };

    let entries = items.iter().flat_map(|item| match item {
        Value::Array(inner) => inner.iter().collect::<Vec<_>>(),
        other => vec![other],
    });

    ClassificationResult::from_scores(entries.filter_map(parse_entry))
}

fn parse_entry(entry: &Value) -> Option<EmotionScore> {
    let label = entry.get("label").and_then(Value::as_str).filter(|label| !label.is_empty());
    let score = entry.get("score").and_then(Value::as_f64).filter(|score| score.is_finite() && (0.0..=1.0).contains(score));

    match (label, score) {
        (Some(label), Some(score)) => Some(EmotionScore::new(label, score)),
        _ => {
            debug!("Skipping malformed classifier entry: {entry}");
            None
        }
    }
}
