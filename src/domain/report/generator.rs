//! Stage content generation.
//!
//! Assembles the assistant content for report stages: resolves the template
//! for a classified brief, renders the classification header, and emits
//! block-groups at the session's cursor.

use std::sync::Arc;

use crate::domain::classification::{Entity, Tier};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::TemplateStore;

use super::template::{EmittedGroup, TemplateKey};

/// Opaque copy used around report emission, supplied by the content
/// provider.
#[derive(Debug, Clone)]
pub struct ReportCopy {
    /// Header prefixed to the first block-group. Placeholders `{city}`,
    /// `{tier}`, and `{template}` are substituted at generation time.
    pub header: String,
    /// Display label used for the unknown entity sentinel.
    pub unknown_entity_label: String,
    /// Fixed acknowledgment returned once the template is exhausted.
    pub completion_ack: String,
}

/// Content emitted when a brief is classified and the report begins.
#[derive(Debug, Clone)]
pub struct BeginReport {
    /// The resolved template key, to be pinned on the session.
    pub key: TemplateKey,
    /// Classification header plus the first block-group.
    pub content: String,
    /// Cursor value after the first emission.
    pub new_cursor: usize,
    /// True if the template has only one group.
    pub is_final: bool,
}

/// Content emitted on a report continuation.
#[derive(Debug, Clone)]
pub struct ContinueReport {
    /// The block-group at the session's cursor.
    pub content: String,
    /// Cursor value after this emission.
    pub new_cursor: usize,
    /// True if this group was the template's last.
    pub is_final: bool,
}

/// Produces report-stage content from the template store.
pub struct StageContentGenerator {
    store: Arc<dyn TemplateStore>,
    copy: ReportCopy,
}

impl StageContentGenerator {
    /// Creates a generator over a seeded template store.
    pub fn new(store: Arc<dyn TemplateStore>, copy: ReportCopy) -> Self {
        Self { store, copy }
    }

    /// Resolves the template key for a tier.
    pub fn resolve_template(&self, tier: Tier) -> TemplateKey {
        self.store.resolve(tier)
    }

    /// Starts report emission for a classified brief.
    ///
    /// Emits the classification header followed by the template's first
    /// block-group.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if the store resolves a key it cannot serve
    pub fn begin_report(&self, entity: &Entity, tier: Tier) -> Result<BeginReport, DomainError> {
        let key = self.store.resolve(tier);
        let template = self.lookup(&key)?;
        let emitted = template.next_block_group(0)?;

        let city = entity.name().unwrap_or(&self.copy.unknown_entity_label);
        let header = self
            .copy
            .header
            .replace("{city}", city)
            .replace("{tier}", tier.label())
            .replace("{template}", template.label());

        tracing::debug!(
            template = %key,
            tier = %tier,
            final_group = emitted.is_final,
            "report started"
        );

        Ok(BeginReport {
            key,
            content: format!("{}\n\n{}", header, emitted.text()),
            new_cursor: emitted.new_cursor,
            is_final: emitted.is_final,
        })
    }

    /// Emits the block-group at `cursor` for an already-selected template.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if the key is no longer registered
    /// - `CursorOutOfRange` if `cursor` is at or beyond the template's end
    pub fn continue_report(
        &self,
        key: &TemplateKey,
        cursor: usize,
    ) -> Result<ContinueReport, DomainError> {
        let template = self.lookup(key)?;
        let emitted: EmittedGroup = template.next_block_group(cursor)?;

        tracing::debug!(
            template = %key,
            cursor,
            final_group = emitted.is_final,
            "report block-group emitted"
        );

        Ok(ContinueReport {
            content: emitted.text(),
            new_cursor: emitted.new_cursor,
            is_final: emitted.is_final,
        })
    }

    /// Returns the fixed terminal acknowledgment.
    pub fn completion_ack(&self) -> &str {
        &self.copy.completion_ack
    }

    fn lookup(&self, key: &TemplateKey) -> Result<&super::template::ReportTemplate, DomainError> {
        self.store.template(key).ok_or_else(|| {
            DomainError::new(
                ErrorCode::TemplateNotFound,
                format!("No template registered under key '{}'", key),
            )
        })
    }
}
