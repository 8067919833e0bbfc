//! Runtime services and shared state for mind-triage.

use std::{borrow::Cow, sync::Arc};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::{
    base::messages,
    interaction::{
        analysis::{Analysis, handle_submission},
        report::{self, OutputFormat},
    },
    prelude::*,
    service::classifier::{ClassifierClient, ClassifierHandle},
};

/// Where submissions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A single submission given up front.
    Text(String),
    /// All of stdin is one submission.
    Stdin,
    /// Each line of stdin is a submission, handled one after another.
    Interactive,
}

/// One run of the shell.
#[derive(Debug, Clone)]
pub struct Session {
    pub input: Input,
    pub format: OutputFormat,
}

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration, the triage engine, and the lazily
/// loaded classifier handle. It is designed to be trivially cloneable, allowing
/// it to be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The keyword triage engine.
    pub engine: Arc<TriageEngine>,
    /// The emotion classifier handle; loaded on first use.
    pub classifier: ClassifierHandle,
}

impl Runtime {
    /// Create a new runtime instance backed by the configured inference endpoint.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        let loader_config = config.clone();
        let classifier = ClassifierHandle::new(move || ClassifierClient::huggingface(&loader_config));

        Self::with_classifier(config, classifier)
    }

    /// Create a runtime around an existing classifier handle.
    pub fn with_classifier(config: Config, classifier: ClassifierHandle) -> Res<Self> {
        let engine = Arc::new(TriageEngine::new(config.match_mode)?);

        Ok(Self { config, engine, classifier })
    }

    /// Analyze one submission.
    pub async fn analyze(&self, text: &str) -> Result<Analysis, SubmissionError> {
        handle_submission(text, &self.engine, &self.classifier).await
    }

    /// Analyze one submission and write the rendered result to `out`.
    pub async fn submit<W>(&self, text: &str, format: OutputFormat, out: &mut W) -> Void
    where
        W: AsyncWrite + Unpin,
    {
        let result = self.analyze(text).await;
        let rendered = report::render(&result, format)?;

        out.write_all(rendered.as_bytes()).await?;
        out.flush().await?;

        Ok(())
    }

    /// Run a session to completion against stdin and stdout.
    pub async fn start(&self, session: Session) -> Void {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();

        self.run(session, stdin, &mut stdout).await
    }

    /// Run a session, reading submissions from `reader` and writing reports to `out`.
    ///
    /// Input that is not valid UTF-8 is decoded lossily, so one bad line never
    /// ends an interactive session.
    pub async fn run<R, W>(&self, session: Session, mut reader: R, out: &mut W) -> Void
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match session.input {
            Input::Text(text) => self.submit(&text, session.format, out).await?,
            Input::Stdin => {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes).await?;

                self.submit(&decode_submission(&bytes), session.format, out).await?;
            }
            Input::Interactive => {
                if session.format == OutputFormat::Text {
                    out.write_all(format!("{}\n{}\n\n", messages::TITLE, messages::INTRO).as_bytes()).await?;
                }

                let mut line = Vec::new();

                loop {
                    if session.format == OutputFormat::Text {
                        out.write_all(format!("{}\n> ", messages::INPUT_PROMPT).as_bytes()).await?;
                        out.flush().await?;
                    }

                    line.clear();
                    if reader.read_until(b'\n', &mut line).await? == 0 {
                        break;
                    }

                    let text = decode_submission(strip_line_ending(&line));

                    self.submit(&text, session.format, out).await?;
                    out.write_all(b"\n").await?;
                }
            }
        }

        out.flush().await?;

        Ok(())
    }
}

// Helpers.

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn decode_submission(bytes: &[u8]) -> Cow<'_, str> {
    let text = String::from_utf8_lossy(bytes);

    if let Cow::Owned(_) = text {
        warn!("Submission was not valid UTF-8; invalid bytes were replaced.");
    }

    text
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::service::classifier::GenericEmotionClassifier;

    struct FixedClassifier(serde_json::Value);

    #[async_trait::async_trait]
    impl GenericEmotionClassifier for FixedClassifier {
        async fn classify(&self, _text: &str) -> Res<serde_json::Value> {
            Ok(self.0.clone())
        }
    }

    fn runtime(payload: serde_json::Value) -> Runtime {
        let client = ClassifierClient::new(Arc::new(FixedClassifier(payload)));
        Runtime::with_classifier(Config::default(), ClassifierHandle::ready(client)).unwrap()
    }

    #[tokio::test]
    async fn test_submit_writes_text_report() {
        let runtime = runtime(json!([{ "label": "sadness", "score": 0.9 }]));
        let mut out = Vec::new();

        runtime.submit("I feel hopeless", OutputFormat::Text, &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Depression"));
        assert!(out.contains("sadness"));
        assert!(out.contains(messages::DISCLAIMER));
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_text() {
        let runtime = runtime(json!([]));
        let mut out = Vec::new();

        runtime.submit("", OutputFormat::Text, &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(messages::EMPTY_INPUT_PROMPT));
        assert!(!out.contains(messages::DISCLAIMER));
    }

    #[tokio::test]
    async fn test_submit_analyzes_whitespace_text() {
        let runtime = runtime(json!([{ "label": "neutral", "score": 0.9 }]));
        let mut out = Vec::new();

        runtime.submit(" \n\t", OutputFormat::Text, &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(messages::NO_ISSUE_LABEL));
        assert!(!out.contains(messages::EMPTY_INPUT_PROMPT));
    }

    #[tokio::test]
    async fn test_run_interactive_survives_invalid_utf8() {
        let runtime = runtime(json!([{ "label": "fear", "score": 0.5 }]));
        let session = Session { input: Input::Interactive, format: OutputFormat::Text };
        let mut out = Vec::new();

        runtime.run(session, &b"hopeless\n\xff\xfe\nnervous\n"[..], &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        let depression = out.find("Depression").unwrap();
        let anxiety = out.find("Anxiety").unwrap();
        assert!(depression < anxiety);
        assert_eq!(out.matches(messages::DISCLAIMER).count(), 3);
    }

    #[tokio::test]
    async fn test_run_stdin_is_one_submission() {
        let runtime = runtime(json!([{ "label": "fear", "score": 0.5 }]));
        let session = Session { input: Input::Stdin, format: OutputFormat::Text };
        let mut out = Vec::new();

        runtime.run(session, &b"I feel hopeless\r\nand so nervous\n"[..], &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Depression, Anxiety"));
        assert_eq!(out.matches(messages::DISCLAIMER).count(), 1);
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending(b"hello\r\n"), b"hello");
        assert_eq!(strip_line_ending(b"hello\n"), b"hello");
        assert_eq!(strip_line_ending(b"hello"), b"hello");
        assert_eq!(strip_line_ending(b"\n"), b"");
    }

    #[test]
    fn test_new_does_not_load_classifier() {
        let runtime = Runtime::new(Config::default()).unwrap();

        assert!(!runtime.classifier.is_initialized());
        assert_eq!(runtime.engine.mode(), MatchMode::Substring);
    }
}
