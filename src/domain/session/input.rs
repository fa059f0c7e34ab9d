//! Qualifying answer validation.
//!
//! Normalizes a raw turn against the configured accepted-answer set.
//! Rejection carries no partial state; the caller re-prompts without
//! touching the session stage.

/// Validates raw input against a fixed accepted-token set.
///
/// Matching is case-insensitive and requires a single token: the input is
/// trimmed, must contain no interior whitespace, and is uppercased before
/// comparison.
#[derive(Debug, Clone)]
pub struct AnswerValidator {
    accepted: Vec<String>,
}

impl AnswerValidator {
    /// Creates a validator for the given accepted tokens.
    ///
    /// Tokens are normalized to uppercase at construction.
    pub fn new<I, S>(accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            accepted: accepted
                .into_iter()
                .map(|s| s.as_ref().trim().to_uppercase())
                .collect(),
        }
    }

    /// Returns the normalized token if `raw` matches an accepted answer.
    ///
    /// `None` means rejection; no side effects either way.
    pub fn validate(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.split_whitespace().count() != 1 {
            return None;
        }
        let normalized = trimmed.to_uppercase();
        self.accepted
            .iter()
            .any(|token| token == &normalized)
            .then_some(normalized)
    }

    /// Returns the accepted tokens in normalized form.
    pub fn accepted_tokens(&self) -> &[String] {
        &self.accepted
    }
}
