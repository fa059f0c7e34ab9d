//! Session orchestration over the dialogue state machine.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::application::stream::StreamHandle;
use crate::content::ContentPack;
use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::report::StageContentGenerator;
use crate::domain::session::{Session, SessionStateMachine};
use crate::ports::TemplateStore;

/// Default bound on the fragment channel of each turn's stream.
pub const DEFAULT_STREAM_BUFFER: usize = 16;

/// Errors surfaced by the orchestrator.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Holds live sessions and drives them one turn at a time.
///
/// Each turn's outcome is committed to the session before its stream is
/// handed to the caller, so an abandoned stream never leaves a session
/// half-advanced.
pub struct SessionOrchestrator {
    machine: SessionStateMachine,
    sessions: Mutex<HashMap<SessionId, Session>>,
    stream_buffer: usize,
}

impl SessionOrchestrator {
    pub fn new(machine: SessionStateMachine, stream_buffer: usize) -> Self {
        Self {
            machine,
            sessions: Mutex::new(HashMap::new()),
            stream_buffer,
        }
    }

    /// Wires an orchestrator from a content pack and a template store.
    pub fn from_pack(
        pack: &ContentPack,
        store: Arc<dyn TemplateStore>,
        stream_buffer: usize,
    ) -> Self {
        let generator = StageContentGenerator::new(store, pack.report_copy());
        let machine = SessionStateMachine::new(
            pack.validator(),
            &pack.answers.correct,
            pack.dialogue_copy(),
            pack.extractor(),
            pack.classifier(),
            generator,
        );
        Self::new(machine, stream_buffer)
    }

    /// Opens a fresh session and streams its opening prompt.
    ///
    /// Convenience over [`handle_turn`](Self::handle_turn) with a newly
    /// generated id and no input.
    pub async fn open_session(&self) -> Result<(SessionId, StreamHandle), OrchestratorError> {
        let session_id = SessionId::new();
        let stream = self.handle_turn(session_id, None).await?;
        Ok((session_id, stream))
    }

    /// Processes one turn and streams the assistant's response.
    ///
    /// `input` is `None` exactly once per session: the system-initiated
    /// open, which creates the session under `session_id`. Every other
    /// call delivers one user turn. The session's stage, cursor, and
    /// transcript are all updated before this returns; the stream is
    /// presentation only.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if `input` is `Some` and the id does not name
    ///   a live session
    /// - Domain errors from the state machine (caller sequencing defects)
    pub async fn handle_turn(
        &self,
        session_id: SessionId,
        input: Option<&str>,
    ) -> Result<StreamHandle, OrchestratorError> {
        let mut sessions = self.sessions.lock().await;
        let session = match input {
            None => sessions
                .entry(session_id)
                .or_insert_with(|| Session::new(session_id)),
            Some(_) => sessions
                .get_mut(&session_id)
                .ok_or(OrchestratorError::SessionNotFound(session_id))?,
        };
        if let Some(text) = input {
            session.record_user_turn(text)?;
        }
        let outcome = self.machine.step(session, input)?;
        session.record_assistant_turn(&outcome.content)?;
        info!(
            session_id = %session_id,
            stage = %outcome.stage.label(),
            transitioned = outcome.transitioned,
            "Turn processed"
        );
        Ok(StreamHandle::spawn(outcome.content, self.stream_buffer))
    }

    /// Removes a session, returning it if it existed.
    pub async fn end_session(&self, session_id: &SessionId) -> Option<Session> {
        self.sessions.lock().await.remove(session_id)
    }

    /// Returns a point-in-time copy of a session.
    pub async fn snapshot(&self, session_id: &SessionId) -> Option<Session> {
        self.sessions.lock().await.get(session_id).cloned()
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
