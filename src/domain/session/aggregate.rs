//! Session aggregate.
//!
//! Owns the per-session stage, report cursor, selected template key, and the
//! append-only turn history. All mutation goes through methods that enforce
//! the aggregate invariants.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, StateMachine, Timestamp};
use crate::domain::report::TemplateKey;

use super::stage::Stage;
use super::turn::{Role, Turn};

/// One advisory conversation.
///
/// # Invariants
///
/// - `stage` only moves forward through the [`Stage`] ordering
/// - `selected_template_key` is write-once
/// - turn sequence numbers are strictly increasing; roles alternate,
///   starting with the assistant (the system opens the conversation)
/// - `stage_cursor` is advanced only by the state machine, never past the
///   selected template's group count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    stage: Stage,
    stage_cursor: usize,
    selected_template_key: Option<TemplateKey>,
    turns: Vec<Turn>,
    created_at: Timestamp,
}

impl Session {
    /// Creates a fresh session in the `Intake` stage.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            stage: Stage::Intake,
            stage_cursor: 0,
            selected_template_key: None,
            turns: Vec::new(),
            created_at: Timestamp::now(),
        }
    }

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the report cursor (block-groups emitted so far).
    pub fn stage_cursor(&self) -> usize {
        self.stage_cursor
    }

    /// Returns the selected template key, if the brief has been classified.
    pub fn selected_template_key(&self) -> Option<&TemplateKey> {
        self.selected_template_key.as_ref()
    }

    /// Returns the full turn history in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the turn history for host rendering.
    ///
    /// All recorded roles are user-visible in this domain; the accessor
    /// exists so hosts do not depend on the raw turn vector.
    pub fn visible_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Moves the session to `target`, validating the transition.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the stage ordering forbids the move
    pub fn transition(&mut self, target: Stage) -> Result<(), DomainError> {
        self.stage = self.stage.transition_to(target).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
                .with_detail("session_id", self.id.to_string())
        })?;
        Ok(())
    }

    /// Selects the report template. Write-once.
    ///
    /// # Errors
    ///
    /// - `TemplateKeyAlreadySet` if a key was already selected
    pub fn select_template(&mut self, key: TemplateKey) -> Result<(), DomainError> {
        if let Some(existing) = &self.selected_template_key {
            return Err(DomainError::new(
                ErrorCode::TemplateKeyAlreadySet,
                format!("Template key '{}' is already selected", existing),
            ));
        }
        self.selected_template_key = Some(key);
        Ok(())
    }

    /// Records that block-groups up to `new_cursor` have been emitted.
    ///
    /// # Errors
    ///
    /// - `CursorOutOfRange` if the cursor would move backward
    pub fn record_emitted_group(&mut self, new_cursor: usize) -> Result<(), DomainError> {
        if new_cursor <= self.stage_cursor {
            return Err(DomainError::new(
                ErrorCode::CursorOutOfRange,
                format!(
                    "Cursor must advance: {} -> {}",
                    self.stage_cursor, new_cursor
                ),
            ));
        }
        self.stage_cursor = new_cursor;
        Ok(())
    }

    /// Appends a user turn.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if it is not the user's turn (the
    ///   assistant opens the conversation and turns alternate)
    pub fn record_user_turn(&mut self, content: impl Into<String>) -> Result<&Turn, DomainError> {
        match self.turns.last() {
            Some(last) if last.is_assistant() => {}
            Some(_) => {
                return Err(self.alternation_error("two consecutive user turns"));
            }
            None => {
                return Err(self.alternation_error("user turn before the opening assistant turn"));
            }
        }
        Ok(self.push_turn(Role::User, content))
    }

    /// Appends an assistant turn.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the previous turn was also from the
    ///   assistant
    pub fn record_assistant_turn(
        &mut self,
        content: impl Into<String>,
    ) -> Result<&Turn, DomainError> {
        if let Some(last) = self.turns.last() {
            if last.is_assistant() {
                return Err(self.alternation_error("two consecutive assistant turns"));
            }
        }
        Ok(self.push_turn(Role::Assistant, content))
    }

    fn push_turn(&mut self, role: Role, content: impl Into<String>) -> &Turn {
        let index = self.turns.len();
        self.turns.push(Turn::new(role, content, index as u64));
        &self.turns[index]
    }

    fn alternation_error(&self, reason: &str) -> DomainError {
        DomainError::new(
            ErrorCode::InvalidStateTransition,
            format!("Turn alternation violated: {}", reason),
        )
        .with_detail("session_id", self.id.to_string())
    }
}
