//! Application services: session orchestration and fragment streaming.

pub mod orchestrator;
pub mod stream;

pub use orchestrator::{OrchestratorError, SessionOrchestrator, DEFAULT_STREAM_BUFFER};
pub use stream::{fragments, PrefixFragments, StreamHandle};
