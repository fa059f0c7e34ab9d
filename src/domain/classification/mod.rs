//! Classification domain module.
//!
//! Resolves structured facts from free-text briefs: entity extraction
//! against a finite registry and tier classification against a static
//! membership table. Both components are total, pure, and swappable for
//! higher-fidelity implementations.

mod entity;
mod tier;

pub use entity::{Entity, EntityExtractor, RegistryEntry};
pub use tier::{Tier, TierClassifier};
