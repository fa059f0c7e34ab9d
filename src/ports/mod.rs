//! Ports - interfaces the core consumes from its host.

mod template_store;

pub use template_store::TemplateStore;
