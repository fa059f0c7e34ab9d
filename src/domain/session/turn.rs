//! Turn records for session history.
//!
//! Turns are immutable records of the user/assistant exchange. They are
//! appended, never mutated or removed.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, TurnId};

/// Role of a turn's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// User input.
    User,
    /// Advisor response.
    Assistant,
}

/// An immutable turn within a session.
///
/// # Invariants
///
/// - `sequence_number` is assigned by the owning [`Session`](super::Session)
///   and is strictly increasing
/// - content is opaque; report-stage continuation signals may be empty, so
///   no emptiness validation happens here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    id: TurnId,
    role: Role,
    content: String,
    sequence_number: u64,
    created_at: Timestamp,
}

impl Turn {
    /// Creates a new turn with the given role, content, and sequence number.
    pub fn new(role: Role, content: impl Into<String>, sequence_number: u64) -> Self {
        Self {
            id: TurnId::new(),
            role,
            content: content.into(),
            sequence_number,
            created_at: Timestamp::now(),
        }
    }

    /// Returns the turn ID.
    pub fn id(&self) -> &TurnId {
        &self.id
    }

    /// Returns the role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the sequence number.
    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    /// Returns when the turn was recorded.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns true if this turn is from the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns true if this turn is from the assistant.
    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}
