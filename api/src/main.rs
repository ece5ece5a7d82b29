//! FieldCRM API server entry point.
//!
//! Wires the MySQL repositories and the messaging gateway into the OTP
//! service, then serves the HTTP surface.

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;

use fc_api::app::{configure_api, AppState};
use fc_api::middleware::cors::create_cors;
use fc_core::services::otp::{OtpService, OtpServiceConfig};
use fc_infra::database::{
    DatabasePool, MySqlAuditEventRepository, MySqlClientRepository, MySqlOtpRepository,
};
use fc_infra::messaging::MessageGateway;
use fc_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    info!(
        "Starting FieldCRM API server in {} environment",
        config.environment
    );

    let pool = DatabasePool::new(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    if !pool.health_check().await.unwrap_or(false) {
        log::warn!("Database health check failed at startup");
    }

    let otp_repo = Arc::new(MySqlOtpRepository::new(pool.get_pool().clone()));
    let client_repo = Arc::new(MySqlClientRepository::new(pool.get_pool().clone()));
    let audit_repo = Arc::new(MySqlAuditEventRepository::new(pool.get_pool().clone()));

    let gateway = Arc::new(
        MessageGateway::new(config.messaging.clone())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?,
    );

    let service_config = OtpServiceConfig {
        default_country_code: config.messaging.default_country_code.clone(),
        delivery_enabled: config.messaging.delivery_enabled,
        echo_code_when_disabled: config.messaging.echo_code_allowed(),
        ..Default::default()
    };

    let otp_service = Arc::new(OtpService::new(
        otp_repo,
        client_repo,
        audit_repo.clone(),
        gateway,
        service_config,
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let workers = config.server.workers;
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(AppState::new(
                otp_service.clone(),
                audit_repo.clone(),
            )))
            .configure(
                configure_api::<
                    MySqlOtpRepository,
                    MySqlClientRepository,
                    MySqlAuditEventRepository,
                    MessageGateway,
                >,
            )
    });

    // workers == 0 means "one per core", actix's own default
    let server = if workers > 0 {
        server.workers(workers)
    } else {
        server
    };

    server.bind(&bind_address)?.run().await
}
