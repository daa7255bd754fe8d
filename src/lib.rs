use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use crate::clients::email::{Notifier, build_mailer};
use crate::clients::media::{CloudinaryClient, MediaHost};
use crate::db::establish_connection_pool;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;

pub mod clients;
pub mod db;
pub mod domain;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let http_timeout = Duration::from_secs(server_config.http_timeout_secs);

    let mailer = build_mailer(&server_config.email, http_timeout)
        .map_err(|e| std::io::Error::other(format!("Failed to build mailer: {e}")))?;
    let notifier = Notifier::new(mailer, &server_config.email);

    let media: Arc<dyn MediaHost> = Arc::new(
        CloudinaryClient::new(&server_config.media, http_timeout)
            .map_err(|e| std::io::Error::other(format!("Failed to build media client: {e}")))?,
    );
    let media = web::Data::from(media);

    let bind_address = (server_config.address.clone(), server_config.port);
    let api_version = server_config.api_version.clone();

    log::info!(
        "Starting server on {}:{} under /api/{api_version}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(notifier.clone()))
            .app_data(media.clone())
            .service(routes::api_scope(&api_version))
            .default_service(web::to(routes::default_not_found))
    })
    .shutdown_timeout(server_config.shutdown_timeout_secs)
    .bind(bind_address)?
    .run()
    .await
}
