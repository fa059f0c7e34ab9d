//! Entity extraction from free text.
//!
//! The reference policy is a substring membership test against a finite
//! registry of known names; first match in registry order wins. A richer
//! extractor can replace this without changing the state machine contract.

use serde::{Deserialize, Serialize};

/// A classification input resolved from text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    /// A recognized name from the registry.
    Known(String),
    /// Nothing in the registry matched.
    Unknown,
}

impl Entity {
    /// Returns the recognized name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Known(name) => Some(name),
            Self::Unknown => None,
        }
    }

    /// Returns true if this is the unknown sentinel.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// One registry row: a name to match and the name it resolves to.
///
/// `canonical` lets a row alias another name (the reference registry
/// resolves 北京 to 上海); when unset the matched name resolves to itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Name matched as a substring of the input text.
    pub name: String,
    /// Optional canonical name the match resolves to.
    #[serde(default)]
    pub canonical: Option<String>,
}

impl RegistryEntry {
    /// Creates a row that resolves to its own name.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            canonical: None,
        }
    }

    /// Creates a row that resolves to a different canonical name.
    pub fn alias(name: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            canonical: Some(canonical.into()),
        }
    }

    fn resolved(&self) -> &str {
        self.canonical.as_deref().unwrap_or(&self.name)
    }
}

/// Resolves an entity from raw text by registry lookup.
///
/// Total and side-effect-free: every input yields either a recognized
/// entity or [`Entity::Unknown`], never an error.
#[derive(Debug, Clone, Default)]
pub struct EntityExtractor {
    registry: Vec<RegistryEntry>,
}

impl EntityExtractor {
    /// Creates an extractor over the given registry, in iteration order.
    pub fn new(registry: Vec<RegistryEntry>) -> Self {
        Self { registry }
    }

    /// Resolves the first registry name found in `text`.
    pub fn extract(&self, text: &str) -> Entity {
        self.registry
            .iter()
            .find(|entry| text.contains(entry.name.as_str()))
            .map(|entry| Entity::Known(entry.resolved().to_string()))
            .unwrap_or(Entity::Unknown)
    }

    /// Returns the registry rows.
    pub fn registry(&self) -> &[RegistryEntry] {
        &self.registry
    }
}
