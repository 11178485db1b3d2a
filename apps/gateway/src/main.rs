use actix_web::{web, App, HttpServer};
use gateway::config::app::Config;
use gateway::config::tls::load_rustls_config;
use gateway::middleware::request_trace::RequestTrace;
use gateway::middleware::security_headers::SecurityHeaders;
use gateway::middleware::structured_logger::StructuredLogger;
use gateway::middleware::trace_span::TraceSpan;
use gateway::routes;
use gateway::state::app_state::AppState;
use gateway::telemetry;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let tls = match load_rustls_config(&config.tls) {
        Ok(tls) => tls,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(AppState::from_config(&config));

    info!(
        host = %config.host,
        port = config.port,
        issuer = %config.security.issuer,
        session_ttl_secs = config.security.session_ttl.as_secs(),
        "Starting session gateway"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind_rustls_0_23((config.host.as_str(), config.port), tls)?
    .run()
    .await
}
