//! Content provider module.
//!
//! The content pack bundles everything the core consumes as opaque payload:
//! prompts, feedback branches, the entity registry, tier membership, and
//! report templates.

mod defaults;
mod pack;

pub use defaults::{default_pack, DEFAULT_PACK};
pub use pack::{AnswerSet, ContentError, ContentPack, PromptCopy, TemplateSeed};
