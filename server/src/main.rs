use anyhow::Context;
use axum::extract::MatchedPath;
use axum::http::Request;
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use recipe_server::config::{Config, StoreConfig};
use recipe_server::service::RecipeService;
use recipe_server::store::{MemoryRecipeStore, PgRecipeStore, RecipeStore};
use recipe_server::{api, db, AppState};
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// OTLP layers for traces and logs, when the collector is configured and reachable.
fn otel_providers(endpoint: &str) -> anyhow::Result<(SdkTracerProvider, SdkLoggerProvider)> {
    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "recipe-server".to_string());

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .build();

    let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("Failed to create OTLP trace exporter")?;

    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("Failed to create OTLP log exporter")?;

    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    Ok((trace_provider, log_provider))
}

fn collector_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://");

    // Quick TCP check to see if the collector is up (resolve hostname first)
    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false)
}

/// Initialize telemetry with optional OpenTelemetry export.
/// If OTEL_EXPORTER_OTLP_ENDPOINT is set and reachable, traces and logs are sent
/// to the collector. Otherwise, only console logging is used.
fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    let endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();
    let providers = match endpoint.as_deref() {
        Some(endpoint) if collector_reachable(endpoint) => Some(otel_providers(endpoint)),
        _ => None,
    };

    match providers {
        Some(Ok((trace_provider, log_provider))) => {
            let tracer = trace_provider.tracer("recipe-server");
            opentelemetry::global::set_tracer_provider(trace_provider);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .with(OpenTelemetryTracingBridge::new(&log_provider))
                .init();

            tracing::info!(
                "OpenTelemetry enabled, exporting traces and logs to {}",
                endpoint.unwrap_or_default()
            );
        }
        Some(Err(e)) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();

            tracing::warn!("OpenTelemetry setup failed, using console logging only: {:#}", e);
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();

            match endpoint {
                Some(endpoint) => tracing::info!(
                    "OpenTelemetry endpoint {} not reachable, using console logging only",
                    endpoint
                ),
                None => tracing::debug!(
                    "OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only"
                ),
            }
        }
    }
}

fn create_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn RecipeStore>> {
    match config {
        StoreConfig::Postgres { database_url } => {
            let pool = db::create_pool(database_url)?;
            Ok(Arc::new(PgRecipeStore::new(pool)))
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory recipe store; data is lost on exit");
            Ok(Arc::new(MemoryRecipeStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi()
            .to_pretty_json()
            .context("Failed to render OpenAPI spec")?;
        println!("{}", spec);
        return Ok(());
    }

    init_telemetry();

    let config = Config::from_env()?;
    let store = create_store(&config.store)?;
    let state: AppState = Arc::new(RecipeService::new(store));

    let app = api::app(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched_path,
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::http::Response<_>, latency: Duration, _span: &Span| {
                    let status = response.status().as_u16();
                    if status >= 500 {
                        tracing::error!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request failed with server error"
                        );
                    } else {
                        tracing::info!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    }
                },
            )
            .on_failure(
                |error: tower_http::classify::ServerErrorsFailureClass,
                 latency: Duration,
                 _span: &Span| {
                    tracing::error!(
                        error = %error,
                        latency_ms = %latency.as_millis(),
                        "request failed"
                    );
                },
            ),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!("Swagger UI available at /swagger-ui/");
    tracing::info!("OpenAPI spec available at /api-docs/openapi.json");

    axum::serve(listener, app).await?;
    Ok(())
}
