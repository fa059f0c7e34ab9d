//! Session state machine step logic.
//!
//! Drives one turn of an advisory session: validates input for the current
//! stage, performs at most one stage transition, and produces the assistant
//! content for that turn. Classification and template resolution are
//! delegated to the pure components this machine composes.

use tracing::{debug, info, warn};

use crate::domain::classification::{EntityExtractor, TierClassifier};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::report::StageContentGenerator;

use super::aggregate::Session;
use super::input::AnswerValidator;
use super::stage::Stage;

/// Opaque dialogue copy for the pre-report stages, supplied by the content
/// provider.
#[derive(Debug, Clone)]
pub struct DialogueCopy {
    /// The qualifying diagnostic question, options included.
    pub diagnostic_prompt: String,
    /// Re-prompt returned when the qualifying answer is rejected.
    pub corrective_prompt: String,
    /// Feedback for the configured correct option.
    pub correct_feedback: String,
    /// Shared feedback for every other accepted option.
    pub other_feedback: String,
    /// Prompt requesting the free-text investment brief.
    pub brief_prompt: String,
}

/// Result of one state machine step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Assistant content produced by this turn.
    pub content: String,
    /// Stage after the step.
    pub stage: Stage,
    /// False for stage-preserving turns: qualifying rejection, empty brief
    /// re-prompt, and terminal acknowledgments.
    pub transitioned: bool,
}

/// The per-turn session state machine.
pub struct SessionStateMachine {
    validator: AnswerValidator,
    correct_answer: String,
    copy: DialogueCopy,
    extractor: EntityExtractor,
    classifier: TierClassifier,
    generator: StageContentGenerator,
}

impl SessionStateMachine {
    /// Creates a state machine from its collaborating components.
    ///
    /// `correct_answer` is normalized the same way answers are, so it can
    /// be compared against validator output directly.
    pub fn new(
        validator: AnswerValidator,
        correct_answer: impl AsRef<str>,
        copy: DialogueCopy,
        extractor: EntityExtractor,
        classifier: TierClassifier,
        generator: StageContentGenerator,
    ) -> Self {
        Self {
            validator,
            correct_answer: correct_answer.as_ref().trim().to_uppercase(),
            copy,
            extractor,
            classifier,
            generator,
        }
    }

    /// Processes one turn against the session.
    ///
    /// `input` is `None` exactly once per session: the system-initiated
    /// open. Performs at most one stage transition and returns the
    /// assistant content for this turn; the caller appends turns and
    /// delivers the content.
    ///
    /// # Errors
    ///
    /// Every error from this method is a sequencing defect in the caller
    /// (open called twice, user text before open, report stage without a
    /// resolved template), never a user-facing condition.
    pub fn step(&self, session: &mut Session, input: Option<&str>) -> Result<StepOutcome, DomainError> {
        match (session.stage(), input) {
            (Stage::Intake, None) => self.open(session),
            (Stage::Intake, Some(_)) => Err(DomainError::new(
                ErrorCode::SessionNotOpened,
                "User input delivered before the session was opened",
            )),
            (_, None) => Err(DomainError::new(
                ErrorCode::SessionAlreadyOpened,
                "Open called on a session that is already past intake",
            )),
            (Stage::Qualifying, Some(raw)) => self.answer_diagnostic(session, raw),
            (Stage::BriefCollection, Some(raw)) => self.collect_brief(session, raw),
            (Stage::ReportStage(n), Some(_)) => self.continue_report(session, n),
            (Stage::ReportComplete, Some(_)) => Ok(StepOutcome {
                content: self.generator.completion_ack().to_string(),
                stage: Stage::ReportComplete,
                transitioned: false,
            }),
        }
    }

    fn open(&self, session: &mut Session) -> Result<StepOutcome, DomainError> {
        session.transition(Stage::Qualifying)?;
        info!(session_id = %session.id(), "session opened, diagnostic prompt issued");
        Ok(StepOutcome {
            content: self.copy.diagnostic_prompt.clone(),
            stage: session.stage(),
            transitioned: true,
        })
    }

    fn answer_diagnostic(&self, session: &mut Session, raw: &str) -> Result<StepOutcome, DomainError> {
        let Some(answer) = self.validator.validate(raw) else {
            warn!(session_id = %session.id(), "qualifying answer rejected");
            return Ok(StepOutcome {
                content: self.copy.corrective_prompt.clone(),
                stage: session.stage(),
                transitioned: false,
            });
        };

        let feedback = if answer == self.correct_answer {
            &self.copy.correct_feedback
        } else {
            &self.copy.other_feedback
        };

        session.transition(Stage::BriefCollection)?;
        info!(session_id = %session.id(), %answer, "qualifying answer accepted");
        Ok(StepOutcome {
            content: format!("{}\n\n{}", feedback, self.copy.brief_prompt),
            stage: session.stage(),
            transitioned: true,
        })
    }

    fn collect_brief(&self, session: &mut Session, raw: &str) -> Result<StepOutcome, DomainError> {
        if raw.trim().is_empty() {
            // The brief transition requires non-empty input; re-prompt
            // without touching the stage.
            return Ok(StepOutcome {
                content: self.copy.brief_prompt.clone(),
                stage: session.stage(),
                transitioned: false,
            });
        }

        let entity = self.extractor.extract(raw);
        let tier = self.classifier.classify(&entity);
        debug!(session_id = %session.id(), entity = ?entity, %tier, "brief classified");

        let begun = self.generator.begin_report(&entity, tier)?;

        // Key and stage change together so a report stage can never be
        // observed without a resolved template.
        session.select_template(begun.key.clone())?;
        let target = if begun.is_final {
            Stage::ReportComplete
        } else {
            Stage::ReportStage(0)
        };
        session.transition(target)?;
        session.record_emitted_group(begun.new_cursor)?;

        info!(session_id = %session.id(), template = %begun.key, "report emission started");
        Ok(StepOutcome {
            content: begun.content,
            stage: session.stage(),
            transitioned: true,
        })
    }

    fn continue_report(&self, session: &mut Session, index: usize) -> Result<StepOutcome, DomainError> {
        let key = session
            .selected_template_key()
            .cloned()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::TemplateUnresolved,
                    "Report stage reached without a selected template",
                )
                .with_detail("session_id", session.id().to_string())
            })?;

        let cont = self.generator.continue_report(&key, session.stage_cursor())?;
        let target = if cont.is_final {
            Stage::ReportComplete
        } else {
            Stage::ReportStage(index + 1)
        };
        session.transition(target)?;
        session.record_emitted_group(cont.new_cursor)?;

        Ok(StepOutcome {
            content: cont.content,
            stage: session.stage(),
            transitioned: true,
        })
    }
}
