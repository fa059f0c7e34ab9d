//! Session domain module.
//!
//! The session aggregate, its stage state machine, turn history, and the
//! per-turn step logic.

mod aggregate;
mod input;
mod machine;
mod stage;
mod turn;

pub use aggregate::Session;
pub use input::AnswerValidator;
pub use machine::{DialogueCopy, SessionStateMachine, StepOutcome};
pub use stage::Stage;
pub use turn::{Role, Turn};
