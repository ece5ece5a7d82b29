//! Handler for GET /api/v1/otp/status/{client_id}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use fc_core::repositories::{AuditEventRepository, ClientRepository, OtpRepository};
use fc_core::services::otp::MessagingServiceTrait;
use fc_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::handlers::error::error_response;

/// Read-only snapshot of a client's OTP state.
///
/// Never mutates anything; a stale record shows up as inactive without
/// being retired here.
pub async fn otp_status<O, C, A, M>(
    state: web::Data<AppState<O, C, A, M>>,
    client_id: web::Path<Uuid>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    C: ClientRepository + 'static,
    A: AuditEventRepository + 'static,
    M: MessagingServiceTrait + 'static,
{
    match state.otp_service.otp_status(*client_id).await {
        Ok(status) => HttpResponse::Ok().json(ApiResponse::success(status)),
        Err(error) => {
            log::warn!("otp_status failed for client {}: {}", client_id, error);
            error_response(&error)
        }
    }
}
