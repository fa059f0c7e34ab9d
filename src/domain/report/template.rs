//! Report templates and block-group emission.
//!
//! A template is an ordered sequence of block-groups; each session stage
//! advance emits exactly one group. Block content is opaque payload supplied
//! by the content provider.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Key identifying a report template.
///
/// The reference scope defines two keys, `tier1` and `general`; hosts may
/// register additional templates under their own keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateKey(String);

impl TemplateKey {
    /// Creates a template key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The reference key for top-tier entities.
    pub fn tier1() -> Self {
        Self::new("tier1")
    }

    /// The reference key for everything else.
    pub fn general() -> Self {
        Self::new("general")
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One opaque unit of report content, tagged with its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Position of this block within the template, across all groups.
    pub index: usize,
    /// Opaque text payload.
    pub text: String,
}

/// An ordered set of blocks emitted together on one stage advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockGroup {
    blocks: Vec<ContentBlock>,
}

impl BlockGroup {
    /// Creates a block-group from ordered blocks.
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    /// Returns the blocks in emission order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Renders the group as a single text payload.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// The blocks emitted by one [`ReportTemplate::next_block_group`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedGroup {
    /// The blocks emitted by this call.
    pub blocks: Vec<ContentBlock>,
    /// Cursor value after this emission.
    pub new_cursor: usize,
    /// True if this was the template's last group.
    pub is_final: bool,
}

impl EmittedGroup {
    /// Renders the emitted blocks as a single text payload.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// An immutable report template: a key, a display label, and ordered
/// block-groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTemplate {
    key: TemplateKey,
    label: String,
    groups: Vec<BlockGroup>,
}

impl ReportTemplate {
    /// Creates a template from ordered groups.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `groups` is empty
    pub fn new(
        key: TemplateKey,
        label: impl Into<String>,
        groups: Vec<BlockGroup>,
    ) -> Result<Self, DomainError> {
        if groups.is_empty() {
            return Err(DomainError::validation(
                "groups",
                "A report template must define at least one block-group",
            ));
        }
        Ok(Self {
            key,
            label: label.into(),
            groups,
        })
    }

    /// Returns the template key.
    pub fn key(&self) -> &TemplateKey {
        &self.key
    }

    /// Returns the display label (e.g. the model name shown to the user).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the number of block-groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Emits the block-group at `cursor` and reports whether it was the last.
    ///
    /// The cursor strictly increases on each call; once `is_final` has been
    /// reported, no further calls are valid.
    ///
    /// # Errors
    ///
    /// - `CursorOutOfRange` if `cursor` is at or beyond the end. This is a
    ///   sequencing defect in the caller, not a user-facing condition.
    pub fn next_block_group(&self, cursor: usize) -> Result<EmittedGroup, DomainError> {
        let group = self.groups.get(cursor).ok_or_else(|| {
            DomainError::new(
                ErrorCode::CursorOutOfRange,
                format!(
                    "Cursor {} past end of template '{}' ({} groups)",
                    cursor,
                    self.key,
                    self.groups.len()
                ),
            )
            .with_detail("cursor", cursor.to_string())
            .with_detail("groups", self.groups.len().to_string())
        })?;

        Ok(EmittedGroup {
            blocks: group.blocks.clone(),
            new_cursor: cursor + 1,
            is_final: cursor + 1 == self.groups.len(),
        })
    }
}
