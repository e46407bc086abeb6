//! Probe Error Classifier
//!
//! Pure domain logic deciding what a failed probe says about connectivity.
//! Works on plain text, so it has no dependency on any backend SDK.

use crate::domain::value_objects::ProbeVerdict;
use serde::{Deserialize, Serialize};

/// A single text pattern. Matching is a case-sensitive substring search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pattern {
    /// Matches when the text contains the string
    Contains(String),
    /// Matches when the text contains every string, anywhere
    AllOf(Vec<String>),
}

impl Pattern {
    pub fn contains(s: &str) -> Self {
        Self::Contains(s.to_string())
    }

    pub fn all_of(parts: &[&str]) -> Self {
        Self::AllOf(parts.iter().map(|s| s.to_string()).collect())
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Contains(needle) => text.contains(needle.as_str()),
            Self::AllOf(needles) => {
                !needles.is_empty() && needles.iter().all(|n| text.contains(n.as_str()))
            }
        }
    }
}

/// Pattern table driving classification.
///
/// `responded` patterns prove the server parsed the request and answered
/// with an application-level error. `transport` patterns identify a
/// failure to reach the server at all. `responded` is checked first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTable {
    pub responded: Vec<Pattern>,
    pub transport: Vec<Pattern>,
}

impl Default for PatternTable {
    fn default() -> Self {
        Self {
            responded: vec![
                // PostgREST error code prefix
                Pattern::contains("PGRST"),
                Pattern::contains("Could not find the table"),
                Pattern::all_of(&["relation", "does not exist"]),
                // Postgres undefined_table
                Pattern::contains("42P01"),
            ],
            transport: vec![
                Pattern::contains("hostname"),
                Pattern::contains("URL"),
                Pattern::contains("NSURLErrorDomain"),
                Pattern::contains("could not be found"),
                Pattern::contains("dns error"),
                Pattern::contains("failed to lookup address"),
                Pattern::contains("builder error"),
            ],
        }
    }
}

/// Classifier for probe error text.
///
/// Stateless apart from its pattern table: the same text always yields
/// the same verdict.
#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier {
    patterns: PatternTable,
}

impl ErrorClassifier {
    pub fn new(patterns: PatternTable) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Classify the combined error text of a failed probe.
    ///
    /// Never returns `UnexpectedSuccess`; that verdict only comes from a
    /// query that did not fail.
    pub fn classify(&self, text: &str) -> ProbeVerdict {
        if self.patterns.responded.iter().any(|p| p.matches(text)) {
            ProbeVerdict::ServerResponded
        } else if self.patterns.transport.iter().any(|p| p.matches(text)) {
            ProbeVerdict::TransportFailure
        } else {
            ProbeVerdict::Unclassified
        }
    }
}
