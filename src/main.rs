use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;

use hrms_lite::backend::BackendClient;
use hrms_lite::config::Config;
use hrms_lite::docs::ApiDoc;
use hrms_lite::routes::{self, Limiters};
use hrms_lite::state::Workspace;

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(
        api_base = %config.api_base,
        require_auth = config.require_auth,
        "Dashboard starting..."
    );

    let client = BackendClient::new(&config.api_base, config.request_timeout)
        .context("failed to build HRMS API client")?;
    let limiters = Limiters::from_config(&config)?;

    // one workspace for all workers
    let workspace = Data::new(Workspace::default());
    let client = Data::new(client);
    let config_data = Data::new(config.clone());

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(client.clone())
            .app_data(workspace.clone())
            .app_data(config_data.clone())
            .configure(|cfg| routes::configure(cfg, &limiters))
    })
    .bind(&config.server_addr)
    .with_context(|| format!("failed to bind {}", config.server_addr))?
    .run()
    .await?;

    Ok(())
}
