//! Session stage state machine.
//!
//! Defines the fixed forward-only progression of an advisory session and
//! valid transitions between stages.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The stage of an advisory session.
///
/// Sessions move forward through these stages, never backward:
/// - `Intake`: no turns exchanged yet, awaiting the system-initiated open
/// - `Qualifying`: diagnostic question outstanding
/// - `BriefCollection`: awaiting the free-text investment brief
/// - `ReportStage(n)`: report block-group `n` was the last one emitted
/// - `ReportComplete`: all block-groups of the selected template emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Session created, nothing exchanged yet.
    #[default]
    Intake,

    /// Diagnostic question sent, awaiting one of the accepted answers.
    Qualifying,

    /// Qualification feedback delivered, awaiting the investment brief.
    BriefCollection,

    /// Report in progress; the index is the block-group just emitted.
    ReportStage(usize),

    /// Terminal; the selected template is exhausted.
    ReportComplete,
}

impl Stage {
    /// Returns true if user input is processed in this stage.
    ///
    /// `Intake` is excluded: the only valid call there is the
    /// system-initiated open, which carries no user text.
    pub fn accepts_user_input(&self) -> bool {
        !matches!(self, Self::Intake)
    }

    /// Returns true if this stage is part of report emission.
    pub fn is_report(&self) -> bool {
        matches!(self, Self::ReportStage(_))
    }

    /// Returns the block-group index for a report stage.
    pub fn report_index(&self) -> Option<usize> {
        match self {
            Self::ReportStage(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a short label, suitable for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Qualifying => "qualifying",
            Self::BriefCollection => "brief_collection",
            Self::ReportStage(_) => "report_stage",
            Self::ReportComplete => "report_complete",
        }
    }
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Stage::*;
        match (self, target) {
            // System-initiated open produces the diagnostic prompt
            (Intake, Qualifying) => true,
            // Accepted answer moves to brief collection; rejection stays put
            // (a self-loop is stage-unchanged, not a transition)
            (Qualifying, BriefCollection) => true,
            // Brief resolves a template and emits the first block-group
            (BriefCollection, ReportStage(0)) => true,
            // A single-group template completes on the first emission
            (BriefCollection, ReportComplete) => true,
            // Continuation emits the next block-group
            (ReportStage(n), ReportStage(m)) => *m == n + 1,
            // The block-group just emitted was the template's last
            (ReportStage(_), ReportComplete) => true,
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Stage::*;
        match self {
            Intake => vec![Qualifying],
            Qualifying => vec![BriefCollection],
            BriefCollection => vec![ReportStage(0), ReportComplete],
            ReportStage(n) => vec![ReportStage(n + 1), ReportComplete],
            ReportComplete => vec![],
        }
    }
}
