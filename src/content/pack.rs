//! Content pack definition and loading.
//!
//! All natural-language copy, the entity registry, the answer set, and the
//! report templates are opaque payloads supplied by the content provider.
//! A pack can be loaded from YAML or taken from the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::classification::{EntityExtractor, RegistryEntry, Tier, TierClassifier};
use crate::domain::report::ReportCopy;
use crate::domain::session::{AnswerValidator, DialogueCopy};

/// Errors that occur while loading or validating a content pack.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read content pack: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse content pack: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid content pack: {0}")]
    Invalid(String),
}

/// Static prompt and report copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptCopy {
    /// The qualifying diagnostic question.
    pub diagnostic: String,
    /// Re-prompt for rejected qualifying answers.
    pub corrective: String,
    /// Feedback for the correct option.
    pub correct_feedback: String,
    /// Shared feedback for the remaining options.
    pub other_feedback: String,
    /// Request for the free-text investment brief.
    pub brief: String,
    /// Classification header, with `{city}`, `{tier}`, `{template}`
    /// placeholders.
    pub report_header: String,
    /// Terminal acknowledgment.
    pub completion_ack: String,
    /// Display label for the unknown entity sentinel.
    pub unknown_entity_label: String,
}

/// The fixed qualifying answer set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSet {
    /// Accepted options (reference: three).
    pub options: Vec<String>,
    /// The option that earns the correct-branch feedback.
    pub correct: String,
}

/// Seed for one report template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSeed {
    /// Template key (reference keys: `tier1`, `general`).
    pub key: String,
    /// Display label substituted into the report header.
    pub label: String,
    /// Tier routed to this template, if any.
    #[serde(default)]
    pub tier: Option<Tier>,
    /// Ordered block-groups, each an ordered list of block texts.
    pub groups: Vec<Vec<String>>,
}

/// Everything the core consumes from its content provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPack {
    pub prompts: PromptCopy,
    pub answers: AnswerSet,
    /// Entity registry, matched in order.
    pub registry: Vec<RegistryEntry>,
    /// Names classified as top tier.
    pub top_tier: Vec<String>,
    /// Report templates, at least one per reference tier.
    pub templates: Vec<TemplateSeed>,
    /// Key used when no template is routed for a tier.
    pub fallback_template: String,
}

impl ContentPack {
    /// Parses a pack from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ContentError> {
        let pack: Self = serde_yaml::from_str(yaml)?;
        pack.validate()?;
        Ok(pack)
    }

    /// Loads and parses a pack from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Checks pack-level consistency.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.answers.options.is_empty() {
            return Err(ContentError::Invalid("answer set is empty".to_string()));
        }
        let correct = self.answers.correct.trim().to_uppercase();
        if !self
            .answers
            .options
            .iter()
            .any(|o| o.trim().to_uppercase() == correct)
        {
            return Err(ContentError::Invalid(format!(
                "correct answer '{}' is not among the options",
                self.answers.correct
            )));
        }
        if self.templates.is_empty() {
            return Err(ContentError::Invalid("no templates defined".to_string()));
        }
        for seed in &self.templates {
            if seed.groups.is_empty() || seed.groups.iter().any(|g| g.is_empty()) {
                return Err(ContentError::Invalid(format!(
                    "template '{}' has an empty block-group",
                    seed.key
                )));
            }
        }
        if !self.templates.iter().any(|t| t.key == self.fallback_template) {
            return Err(ContentError::Invalid(format!(
                "fallback template '{}' is not defined",
                self.fallback_template
            )));
        }
        Ok(())
    }

    /// Builds the pre-report dialogue copy.
    pub fn dialogue_copy(&self) -> DialogueCopy {
        DialogueCopy {
            diagnostic_prompt: self.prompts.diagnostic.clone(),
            corrective_prompt: self.prompts.corrective.clone(),
            correct_feedback: self.prompts.correct_feedback.clone(),
            other_feedback: self.prompts.other_feedback.clone(),
            brief_prompt: self.prompts.brief.clone(),
        }
    }

    /// Builds the report copy.
    pub fn report_copy(&self) -> ReportCopy {
        ReportCopy {
            header: self.prompts.report_header.clone(),
            unknown_entity_label: self.prompts.unknown_entity_label.clone(),
            completion_ack: self.prompts.completion_ack.clone(),
        }
    }

    /// Builds the qualifying answer validator.
    pub fn validator(&self) -> AnswerValidator {
        AnswerValidator::new(self.answers.options.iter())
    }

    /// Builds the entity extractor over this pack's registry.
    pub fn extractor(&self) -> EntityExtractor {
        EntityExtractor::new(self.registry.clone())
    }

    /// Builds the tier classifier over this pack's membership set.
    pub fn classifier(&self) -> TierClassifier {
        TierClassifier::new(self.top_tier.iter().cloned())
    }
}
