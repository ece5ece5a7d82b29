//! Handler for POST /api/v1/otp/verify

use actix_web::{web, HttpResponse};
use validator::Validate;

use fc_core::repositories::{AuditEventRepository, ClientRepository, OtpRepository};
use fc_core::services::otp::MessagingServiceTrait;
use fc_shared::types::response::{ApiResponse, ErrorResponse};

use crate::app::AppState;
use crate::dto::otp::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::error::error_response;

/// Verify a submitted code for a client.
///
/// A structurally invalid submission (wrong length) is rejected here
/// without burning an attempt; the service applies the same rule for
/// non-digit submissions.
pub async fn verify_otp<O, C, A, M>(
    state: web::Data<AppState<O, C, A, M>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    C: ClientRepository + 'static,
    A: AuditEventRepository + 'static,
    M: MessagingServiceTrait + 'static,
{
    log::info!(
        "Processing verify_otp request for client: {}",
        request.client_id
    );

    if request.validate().is_err() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "VALIDATION_ERROR",
            "OTP must be exactly 6 digits",
        ));
    }

    match state
        .otp_service
        .verify_otp(request.client_id, &request.otp)
        .await
    {
        Ok(verified) => {
            log::info!("Client {} verified successfully", verified.client_id);
            HttpResponse::Ok().json(ApiResponse::success(VerifyOtpResponse {
                verified: true,
                client_id: verified.client_id,
                verified_at: verified.verified_at,
            }))
        }
        Err(error) => {
            log::warn!(
                "verify_otp failed for client {}: {}",
                request.client_id,
                error
            );
            error_response(&error)
        }
    }
}
