//! Domain-specific error types and error handling.

use thiserror::Error;

/// Errors produced by the OTP lifecycle manager.
///
/// `InvalidOtp` deliberately covers both "wrong code" and "no active
/// code" so responses do not leak which clients have pending codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Client not found")]
    ClientNotFound,

    #[error("Client has no phone number on file")]
    NoPhoneOnFile,

    #[error("Invalid OTP")]
    InvalidOtp {
        /// Attempts remaining before lockout; absent when no active
        /// record was involved
        attempts_left: Option<i32>,
    },

    #[error("OTP expired")]
    Expired,

    #[error("Please wait {wait_seconds} seconds before requesting a new code")]
    RateLimited { wait_seconds: i64 },

    #[error("Failed to deliver OTP: {reason}")]
    DeliveryFailed { reason: String },
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to OTP-specific errors
    #[error(transparent)]
    Otp(#[from] OtpError),
}

pub type DomainResult<T> = Result<T, DomainError>;
