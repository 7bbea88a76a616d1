// ABOUTME: Unified error handling with standard error codes for the HydroCal bot
// ABOUTME: Splits recoverable chat-facing failures from programming-error signals
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Unified Error Handling System
//!
//! Every fallible path in the crate returns [`AppResult`]. The [`ErrorCode`]
//! carried by an [`AppError`] decides how the engine reacts: validation and
//! lookup codes are recoverable (the user is re-prompted and may retry),
//! everything else is logged and aborts only the current step, never the
//! process.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999): malformed user input, recovered by re-prompting
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3001,

    // State (4000-4999)
    #[serde(rename = "STATE_INCONSISTENCY")]
    StateInconsistency = 4000,

    // External lookups (5000-5999): weather / translation / nutrition
    #[serde(rename = "LOOKUP_FAILED")]
    LookupFailed = 5000,
    #[serde(rename = "LOOKUP_TIMEOUT")]
    LookupTimeout = 5001,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,

    // Chat transport (7000-7999)
    #[serde(rename = "TRANSPORT_ERROR")]
    TransportError = 7000,

    // Programming errors (9000-9999): should not occur if validation is correct
    #[serde(rename = "INVALID_ARGUMENT")]
    InvalidArgument = 9000,
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9001,
}

impl ErrorCode {
    /// Get a short description of this error class
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::StateInconsistency => "Profile state is incomplete for this operation",
            Self::LookupFailed => "An external lookup service returned an error",
            Self::LookupTimeout => "An external lookup service did not answer in time",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::TransportError => "Chat transport operation failed",
            Self::InvalidArgument => "A function was called with out-of-domain arguments",
            Self::InternalError => "An internal error occurred",
        }
    }

    /// Whether the user can fix this by retrying the same step
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::ValueOutOfRange
                | Self::LookupFailed
                | Self::LookupTimeout
                | Self::StateInconsistency
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the user can fix this by retrying the same step
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.code.is_recoverable()
    }

    /// Chat-facing text for this error. Validation messages are shown as-is;
    /// everything else gets a generic apology so internals never leak into chat.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.code {
            ErrorCode::InvalidInput | ErrorCode::ValueOutOfRange => self.message.clone(),
            ErrorCode::LookupFailed | ErrorCode::LookupTimeout => {
                "Sorry, I could not reach the lookup service. Please try again.".into()
            }
            _ => "Sorry, something went wrong on my side. Please try again.".into(),
        }
    }

    /// Malformed or out-of-range user input
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Input parsed but falls outside plausible bounds
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// External lookup returned non-success
    pub fn lookup(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::LookupFailed,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External lookup timed out
    pub fn lookup_timeout(service: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::LookupTimeout,
            format!("{}: request timed out", service.into()),
        )
    }

    /// Profile referenced with missing required fields
    pub fn state_inconsistency(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StateInconsistency, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Chat transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TransportError, message)
    }

    /// Formula library called with out-of-domain inputs
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classes() {
        assert!(ErrorCode::InvalidInput.is_recoverable());
        assert!(ErrorCode::LookupTimeout.is_recoverable());
        assert!(ErrorCode::StateInconsistency.is_recoverable());
        assert!(!ErrorCode::InvalidArgument.is_recoverable());
        assert!(!ErrorCode::ConfigMissing.is_recoverable());
    }

    #[test]
    fn test_validation_message_shown_verbatim() {
        let err = AppError::validation("Weight must be a positive number");
        assert_eq!(err.user_message(), "Weight must be a positive number");
    }

    #[test]
    fn test_internal_message_never_leaks() {
        let err = AppError::internal("dashmap shard poisoned");
        assert!(!err.user_message().contains("dashmap"));
    }

    #[test]
    fn test_lookup_error_carries_service_name() {
        let err = AppError::lookup("weather", "HTTP 503");
        assert_eq!(err.code, ErrorCode::LookupFailed);
        assert!(err.message.contains("weather"));
        assert!(err.message.contains("503"));
    }
}
