//! Template store port.

use crate::domain::classification::Tier;
use crate::domain::report::{ReportTemplate, TemplateKey};

/// Read-only repository of report templates, supplied by the host.
///
/// Both lookups are pure: `resolve` is a total tier-to-key mapping and
/// `template` returns immutable content. A seeded store must cover at least
/// the two reference keys, `tier1` and `general`.
pub trait TemplateStore: Send + Sync {
    /// Resolves the template key for a tier. Total; never fails.
    fn resolve(&self, tier: Tier) -> TemplateKey;

    /// Returns the template registered under `key`, if any.
    fn template(&self, key: &TemplateKey) -> Option<&ReportTemplate>;
}
