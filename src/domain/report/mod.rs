//! Report domain module.
//!
//! Templates, block-group emission, and stage content generation.

mod generator;
mod template;

pub use generator::{BeginReport, ContinueReport, ReportCopy, StageContentGenerator};
pub use template::{BlockGroup, ContentBlock, EmittedGroup, ReportTemplate, TemplateKey};
