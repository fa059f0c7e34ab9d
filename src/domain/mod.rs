//! Domain layer.
//!
//! Pure session, classification, and report logic with no I/O concerns.

pub mod classification;
pub mod foundation;
pub mod report;
pub mod session;
