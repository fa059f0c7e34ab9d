//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Content pack loading failed: {0}")]
    ContentError(#[from] crate::content::ContentError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Stream buffer must be between 1 and 1024")]
    InvalidStreamBuffer,

    #[error("Typing delay exceeds maximum allowed (1000ms)")]
    TypingDelayTooLarge,

    #[error("Content pack path does not exist: {0}")]
    ContentPackNotFound(String),
}
