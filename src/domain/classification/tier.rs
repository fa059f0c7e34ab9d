//! Tier classification.
//!
//! Maps an entity to one value of a fixed closed taxonomy via a static
//! membership table. Total and deterministic; the unknown sentinel is a
//! valid input, not an error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A coarse classification bucket driving template selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Top-tier entities (reference: first-tier cities).
    Tier1,
    /// Everything else, including unrecognized entities.
    General,
}

impl Tier {
    /// Returns the display label used in report headers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tier1 => "Tier1",
            Self::General => "General",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classifies entities by membership in a fixed top-tier set.
#[derive(Debug, Clone, Default)]
pub struct TierClassifier {
    top_tier: HashSet<String>,
}

impl TierClassifier {
    /// Creates a classifier over the given top-tier membership set.
    pub fn new<I, S>(top_tier: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            top_tier: top_tier.into_iter().map(Into::into).collect(),
        }
    }

    /// Classifies an entity.
    ///
    /// Membership in the top-tier set yields [`Tier::Tier1`]; everything
    /// else, including [`Entity::Unknown`], yields [`Tier::General`].
    pub fn classify(&self, entity: &Entity) -> Tier {
        match entity.name() {
            Some(name) if self.top_tier.contains(name) => Tier::Tier1,
            _ => Tier::General,
        }
    }
}
