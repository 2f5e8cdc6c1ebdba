use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use dram_utils_toolbox::ToolboxService;
use dram_utils_web::config::Config;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let _log_guard = dram_utils_web::logging::init(&config.log)?;

    let toolbox = web::Data::new(
        ToolboxService::new()
            .context("failed to initialize network toolbox")?
            .with_whois_timeout(config.whois.timeout()),
    );

    let (host, port) = config.bind_address();
    let workers = config.server.worker_count();
    tracing::info!("Starting dram-utils on {host}:{port} with {workers} workers");

    HttpServer::new(move || {
        App::new()
            .app_data(toolbox.clone())
            .wrap(middleware::Logger::default())
            .configure(dram_utils_web::configure)
    })
    .workers(workers)
    .bind((host.as_str(), port))
    .with_context(|| format!("failed to bind {host}:{port}"))?
    .run()
    .await?;

    tracing::info!("dram-utils stopped");
    Ok(())
}
