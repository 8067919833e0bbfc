//! Keyword triage: maps free text to the concern categories whose keywords it
//! contains.
//!
//! Matching is case-insensitive and, by default, pure substring containment:
//! "down" matches inside "download". [`MatchMode::WordBoundary`] is available
//! for callers that want keywords to match whole words only.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::base::{
    messages,
    taxonomy::{Category, Resource},
    types::Res,
};

/// How a keyword is tested against the normalized text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The keyword may appear anywhere, including inside a longer word.
    #[default]
    Substring,
    /// The keyword must not be flanked by word characters.
    WordBoundary,
}

/// The result of one triage pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TriageOutcome {
    /// No category matched.
    NoIssueDetected,
    /// At least one category matched.
    ///
    /// Categories are in taxonomy order; `resources` holds one entry per
    /// matched category that has a resource, in the same order.
    Detected { categories: Vec<Category>, resources: Vec<Resource> },
}

impl TriageOutcome {
    fn from_categories(categories: Vec<Category>) -> Self {
        if categories.is_empty() {
            return Self::NoIssueDetected;
        }

        let resources = categories.iter().filter_map(|category| category.resource()).collect();

        Self::Detected { categories, resources }
    }

    pub fn categories(&self) -> &[Category] {
        match self {
            Self::NoIssueDetected => &[],
            Self::Detected { categories, .. } => categories,
        }
    }

    pub fn resources(&self) -> &[Resource] {
        match self {
            Self::NoIssueDetected => &[],
            Self::Detected { resources, .. } => resources,
        }
    }

    pub fn is_no_issue(&self) -> bool {
        matches!(self, Self::NoIssueDetected)
    }

    /// Human readable summary: the matched names joined by `, `, or the
    /// no-issue sentinel.
    pub fn label(&self) -> String {
        match self {
            Self::NoIssueDetected => messages::NO_ISSUE_LABEL.to_string(),
            Self::Detected { categories, .. } => categories.iter().map(|c| c.name()).collect::<Vec<_>>().join(", "),
        }
    }
}

/// Matches text against the static taxonomy.
///
/// Construction compiles the word-boundary patterns up front, so a single
/// engine should be built once and reused for every submission.
#[derive(Debug, Clone)]
pub struct TriageEngine {
    mode: MatchMode,
    /// Per category (indexed like [`Category::ALL`]), one pattern per keyword.
    /// Empty in substring mode.
    word_patterns: Vec<Vec<Regex>>,
}

impl TriageEngine {
    /// Create an engine for the given matching mode.
    ///
    /// Only fails if a taxonomy keyword cannot be turned into a pattern.
    pub fn new(mode: MatchMode) -> Res<Self> {
        let word_patterns = match mode {
            MatchMode::Substring => Vec::new(),
            MatchMode::WordBoundary => Category::ALL
                .iter()
                .map(|category| {
                    category
                        .keywords()
                        .iter()
                        .map(|keyword| -> Res<Regex> { Ok(Regex::new(&format!(r"\b{}\b", regex::escape(keyword)))?) })
                        .collect::<Res<Vec<_>>>()
                })
                .collect::<Res<Vec<_>>>()?,
        };

        Ok(Self { mode, word_patterns })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Triage `text` against every category, in taxonomy order.
    #[instrument(name = "TriageEngine::triage", skip_all, fields(mode = ?self.mode, len = text.len()))]
    pub fn triage(&self, text: &str) -> TriageOutcome {
        let normalized = text.to_lowercase();

        let categories = Category::ALL
            .into_iter()
            .filter(|category| {
                let keywords = self.matching_keywords(&normalized, *category).collect::<Vec<_>>();

                if keywords.is_empty() {
                    return false;
                }

                debug!("Matched category {category} on {keywords:?}.");
                true
            })
            .collect::<Vec<_>>();

        TriageOutcome::from_categories(categories)
    }

    /// The keywords of `category` that fire for `text`, in declaration order.
    pub fn matched_keywords(&self, text: &str, category: Category) -> Vec<&'static str> {
        let normalized = text.to_lowercase();

        self.matching_keywords(&normalized, category).collect()
    }

    fn matching_keywords<'a>(&'a self, normalized: &'a str, category: Category) -> impl Iterator<Item = &'static str> + 'a {
        category
            .keywords()
            .iter()
            .enumerate()
            .filter(move |(i, keyword)| match self.mode {
                MatchMode::Substring => normalized.contains(**keyword),
                MatchMode::WordBoundary => self.word_patterns[category.index()][*i].is_match(normalized),
            })
            .map(|(_, keyword)| *keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn substring() -> TriageEngine {
        TriageEngine::new(MatchMode::Substring).unwrap()
    }

    fn word_boundary() -> TriageEngine {
        TriageEngine::new(MatchMode::WordBoundary).unwrap()
    }

    #[test]
    fn test_single_keyword_matches_category() {
        let outcome = substring().triage("I feel so hopeless today");

        assert_eq!(outcome.categories(), &[Category::Depression]);
        assert_eq!(outcome.label(), "Depression");
    }

    #[test]
    fn test_categories_follow_taxonomy_order() {
        // Anxiety keyword appears before the Depression one in the text.
        let outcome = substring().triage("So nervous, and honestly hopeless");

        assert_eq!(outcome.categories(), &[Category::Depression, Category::Anxiety]);
        assert_eq!(outcome.label(), "Depression, Anxiety");
    }

    #[test]
    fn test_no_match_is_sentinel() {
        let outcome = substring().triage("The weather is nice today");

        assert_eq!(outcome, TriageOutcome::NoIssueDetected);
        assert!(outcome.resources().is_empty());
        assert_eq!(outcome.label(), messages::NO_ISSUE_LABEL);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(substring().triage("").is_no_issue());
        assert!(substring().triage("   \n\t ").is_no_issue());
        assert!(word_boundary().triage("").is_no_issue());
    }

    #[test]
    fn test_triage_agrees_with_matched_keywords() {
        for engine in [substring(), word_boundary()] {
            for text in ["I am exhausted and feel like a BURDEN", "download done", "Nothing special", "isolated, tense, furious"] {
                let expected = Category::ALL.into_iter().filter(|c| !engine.matched_keywords(text, *c).is_empty()).collect::<Vec<_>>();

                assert_eq!(engine.triage(text).categories(), expected.as_slice(), "mismatch for `{text}`");
            }
        }

        assert_eq!(substring().matched_keywords("I am exhausted, drained and numb", Category::Burnout), vec!["drained", "exhausted", "numb"]);
    }

    #[test]
    fn test_case_insensitive() {
        let engine = substring();

        assert_eq!(engine.triage("HOPELESS"), engine.triage("hopeless"));
        assert_eq!(engine.triage("HoPeLeSs").categories(), &[Category::Depression]);
    }

    #[test]
    fn test_substring_matches_inside_words() {
        let outcome = substring().triage("I will download the file");

        assert_eq!(outcome.categories(), &[Category::Sadness]);
        assert_eq!(substring().matched_keywords("I will download the file", Category::Sadness), vec!["down"]);
    }

    #[test]
    fn test_word_boundary_skips_inside_words() {
        let engine = word_boundary();

        assert!(engine.triage("I will download the file").is_no_issue());
        assert_eq!(engine.triage("I feel down").categories(), &[Category::Sadness]);
        assert_eq!(engine.triage("I just can't anymore.").categories(), &[Category::Burnout]);
    }

    #[test]
    fn test_shared_keyword_matches_every_category() {
        let outcome = substring().triage("I am exhausted");

        assert_eq!(outcome.categories(), &[Category::Depression, Category::Stress, Category::Burnout]);
        assert_eq!(outcome.resources().len(), 3);
    }

    #[test]
    fn test_resources_follow_categories() {
        let outcome = substring().triage("furious and worthless");

        let expected: Vec<_> = outcome.categories().iter().filter_map(|c| c.resource()).collect();
        assert_eq!(outcome.resources(), expected.as_slice());
        assert_eq!(outcome.resources()[0].contact, Category::Depression.resource().unwrap().contact);
    }

    #[test]
    fn test_non_latin_input() {
        let engine = substring();

        assert!(engine.triage("मुझे बहुत अच्छा लग रहा है").is_no_issue());
        assert_eq!(engine.triage("मैं बहुत lonely हूँ").categories(), &[Category::Sadness]);
    }

    #[test]
    fn test_outcome_serializes_status() {
        let value = serde_json::to_value(substring().triage("hopeless")).unwrap();

        assert_eq!(value["status"], "detected");
        assert_eq!(value["categories"][0], "Depression");

        let value = serde_json::to_value(TriageOutcome::NoIssueDetected).unwrap();
        assert_eq!(value["status"], "no_issue_detected");
    }
}
