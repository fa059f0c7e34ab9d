//! Concrete implementations of the outbound ports.

pub mod memory;

pub use memory::InMemoryTemplateStore;
