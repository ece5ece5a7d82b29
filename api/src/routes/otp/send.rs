//! Handler for POST /api/v1/otp/send

use actix_web::{web, HttpResponse};
use chrono::Utc;

use fc_core::errors::OtpError;
use fc_core::repositories::{AuditEventRepository, ClientRepository, OtpRepository};
use fc_core::services::otp::{DeliveryOutcome, IssueOtpResult, MessagingServiceTrait};
use fc_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::dto::otp::{SendOtpRequest, SendOtpResponse};
use crate::handlers::error::error_response;

/// Issue a new OTP for a client and deliver it to the phone on file.
///
/// Supersedes any previously active code. Not throttled; only resend is.
pub async fn send_otp<O, C, A, M>(
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
        "Processing send_otp request for client: {}",
        request.client_id
    );

    match state
        .otp_service
        .issue_otp(request.client_id, request.actor_id)
        .await
    {
        Ok(result) => issue_result_response(result),
        Err(error) => {
            log::warn!(
                "send_otp failed for client {}: {}",
                request.client_id,
                error
            );
            error_response(&error)
        }
    }
}

/// Shared response shaping for send and resend
pub(super) fn issue_result_response(result: IssueOtpResult) -> HttpResponse {
    if let DeliveryOutcome::Failed { error } = result.delivery {
        // The code stays valid but the caller must know it never went out.
        return error_response(&OtpError::DeliveryFailed { reason: error }.into());
    }

    let now = Utc::now();
    let delivered = result.delivery.is_sent();
    let echoed = match result.delivery {
        DeliveryOutcome::Skipped { echoed_code } => echoed_code,
        _ => None,
    };

    let response = SendOtpResponse {
        message: if delivered {
            "Verification code sent successfully".to_string()
        } else {
            "Verification code issued".to_string()
        },
        expires_in_seconds: result.record.seconds_until_expiry(now),
        resend_after: (result.next_resend_at - now).num_seconds().max(0),
        delivered,
        otp: echoed,
    };

    HttpResponse::Ok().json(ApiResponse::success(response))
}
