//! Mapping from domain errors to HTTP responses.
//!
//! The mapping deliberately keeps `InvalidOtp` and "no active code"
//! indistinguishable, and never exposes internal error details to the
//! caller; those are logged server-side only.

use actix_web::HttpResponse;
use serde_json::json;

use fc_core::errors::{DomainError, OtpError};
use fc_shared::types::response::ErrorResponse;

/// Convert a domain error into the appropriate HTTP response
pub fn error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Otp(otp_error) => otp_error_response(otp_error),

        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new("VALIDATION_ERROR", message.clone())),

        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "NOT_FOUND",
            format!("{} not found", resource),
        )),

        DomainError::Internal { message } => {
            log::error!("Internal error while handling request: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "INTERNAL_ERROR",
                "An internal error occurred",
            ))
        }
    }
}

fn otp_error_response(error: &OtpError) -> HttpResponse {
    match error {
        OtpError::ClientNotFound => HttpResponse::NotFound()
            .json(ErrorResponse::new("CLIENT_NOT_FOUND", error.to_string())),

        OtpError::NoPhoneOnFile => HttpResponse::BadRequest()
            .json(ErrorResponse::new("NO_PHONE_ON_FILE", error.to_string())),

        OtpError::InvalidOtp { attempts_left } => {
            let mut response = ErrorResponse::new("INVALID_OTP", error.to_string());
            if let Some(attempts_left) = attempts_left {
                response = response.with_detail("attempts_left", json!(attempts_left));
            }
            HttpResponse::BadRequest().json(response)
        }

        OtpError::Expired => HttpResponse::BadRequest()
            .json(ErrorResponse::new("OTP_EXPIRED", error.to_string())),

        OtpError::RateLimited { wait_seconds } => HttpResponse::TooManyRequests().json(
            ErrorResponse::new("RATE_LIMITED", error.to_string())
                .with_detail("wait_seconds", json!(wait_seconds)),
        ),

        OtpError::DeliveryFailed { .. } => {
            // The failure reason may carry provider internals; keep it out
            // of the response body.
            log::error!("OTP delivery failure surfaced to caller: {}", error);
            HttpResponse::BadGateway().json(ErrorResponse::new(
                "DELIVERY_FAILED",
                "Failed to deliver the verification code",
            ))
        }
    }
}
