//! Lay Advisor - Staged Advisory Dialogue Engine
//!
//! This crate implements a multi-turn advisory session: a qualifying
//! diagnostic gate, free-text brief classification, and a long-form report
//! emitted in resumable stages as a fragment stream.

pub mod adapters;
pub mod application;
pub mod config;
pub mod content;
pub mod domain;
pub mod ports;
