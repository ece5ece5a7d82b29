//! Audit trail review endpoints.
//!
//! Read access to the append-only OTP audit log, plus the review flag.
//! Event payloads themselves are immutable.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use fc_core::repositories::{AuditEventRepository, ClientRepository, OtpRepository};
use fc_core::services::otp::MessagingServiceTrait;
use fc_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::handlers::error::error_response;

const DEFAULT_EVENT_LIMIT: usize = 50;
const MAX_EVENT_LIMIT: usize = 500;

#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    /// Maximum number of events to return
    pub limit: Option<usize>,
}

/// GET /api/v1/audit/client/{client_id} - recent events for a client
pub async fn list_client_events<O, C, A, M>(
    state: web::Data<AppState<O, C, A, M>>,
    client_id: web::Path<Uuid>,
    query: web::Query<EventListQuery>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    C: ClientRepository + 'static,
    A: AuditEventRepository + 'static,
    M: MessagingServiceTrait + 'static,
{
    let limit = query
        .limit
        .unwrap_or(DEFAULT_EVENT_LIMIT)
        .min(MAX_EVENT_LIMIT);

    match state.audit_repo.find_by_client(*client_id, limit).await {
        Ok(events) => HttpResponse::Ok().json(ApiResponse::success(events)),
        Err(error) => {
            log::warn!(
                "list_client_events failed for client {}: {}",
                client_id,
                error
            );
            error_response(&error)
        }
    }
}

/// POST /api/v1/audit/events/{id}/read - flag an event as reviewed
pub async fn mark_event_read<O, C, A, M>(
    state: web::Data<AppState<O, C, A, M>>,
    id: web::Path<Uuid>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    C: ClientRepository + 'static,
    A: AuditEventRepository + 'static,
    M: MessagingServiceTrait + 'static,
{
    match state.audit_repo.mark_read(*id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
            "marked_read": true,
        }))),
        Err(error) => {
            log::warn!("mark_event_read failed for event {}: {}", id, error);
            error_response(&error)
        }
    }
}
