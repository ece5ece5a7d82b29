//! Application state and route registration.

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use fc_core::repositories::{AuditEventRepository, ClientRepository, OtpRepository};
use fc_core::services::otp::{MessagingServiceTrait, OtpService};

use crate::routes;

/// Shared services injected into every handler
pub struct AppState<O, C, A, M>
where
    O: OtpRepository,
    C: ClientRepository,
    A: AuditEventRepository,
    M: MessagingServiceTrait,
{
    /// The OTP lifecycle service
    pub otp_service: Arc<OtpService<O, C, A, M>>,

    /// Direct audit access for the review endpoints
    pub audit_repo: Arc<A>,
}

impl<O, C, A, M> AppState<O, C, A, M>
where
    O: OtpRepository,
    C: ClientRepository,
    A: AuditEventRepository,
    M: MessagingServiceTrait,
{
    pub fn new(otp_service: Arc<OtpService<O, C, A, M>>, audit_repo: Arc<A>) -> Self {
        Self {
            otp_service,
            audit_repo,
        }
    }
}

/// Register every route on the given service config.
///
/// Generic over the concrete collaborator types so the same registration
/// serves both the production wiring and in-memory test wiring.
pub fn configure_api<O, C, A, M>(cfg: &mut web::ServiceConfig)
where
    O: OtpRepository + 'static,
    C: ClientRepository + 'static,
    A: AuditEventRepository + 'static,
    M: MessagingServiceTrait + 'static,
{
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/otp")
                    .route(
                        "/send",
                        web::post().to(routes::otp::send::send_otp::<O, C, A, M>),
                    )
                    .route(
                        "/verify",
                        web::post().to(routes::otp::verify::verify_otp::<O, C, A, M>),
                    )
                    .route(
                        "/resend",
                        web::post().to(routes::otp::resend::resend_otp::<O, C, A, M>),
                    )
                    .route(
                        "/status/{client_id}",
                        web::get().to(routes::otp::status::otp_status::<O, C, A, M>),
                    ),
            )
            .service(
                web::scope("/audit")
                    .route(
                        "/client/{client_id}",
                        web::get().to(routes::audit::list_client_events::<O, C, A, M>),
                    )
                    .route(
                        "/events/{id}/read",
                        web::post().to(routes::audit::mark_event_read::<O, C, A, M>),
                    ),
            ),
    )
    .route("/health", web::get().to(health_check));
}

/// Liveness endpoint for load balancers and monitoring
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "fieldcrm-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
