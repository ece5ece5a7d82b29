//! Handler for POST /api/v1/otp/resend

use actix_web::{web, HttpResponse};

use fc_core::repositories::{AuditEventRepository, ClientRepository, OtpRepository};
use fc_core::services::otp::MessagingServiceTrait;

use crate::app::AppState;
use crate::dto::otp::SendOtpRequest;
use crate::handlers::error::error_response;

use super::send::issue_result_response;

/// Re-issue an OTP for a client.
///
/// Rejected with 429 while the latest code is still valid and younger
/// than the resend cooldown.
pub async fn resend_otp<O, C, A, M>(
    state: web::Data<AppState<O, C, A, M>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    C: ClientRepository + 'static,
    A: AuditEventRepository + 'static,
    M: MessagingServiceTrait + 'static,
{
    log::info!(
        "Processing resend_otp request for client: {}",
        request.client_id
    );

    match state
        .otp_service
        .resend_otp(request.client_id, request.actor_id)
        .await
    {
        Ok(result) => issue_result_response(result),
        Err(error) => {
            log::warn!(
                "resend_otp failed for client {}: {}",
                request.client_id,
                error
            );
            error_response(&error)
        }
    }
}
