//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, limits, timeout, headers, CORS)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::{AppConfig, DownloadConfig};
use crate::dataset::Datasets;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::shutdown_signal;
use crate::observability::metrics::track_metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub datasets: Arc<Datasets>,
    pub downloads: Arc<DownloadConfig>,
}

/// HTTP server for the venue lookup service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over already-loaded datasets.
    pub fn new(config: AppConfig, datasets: Datasets) -> Self {
        let state = AppState {
            datasets: Arc::new(datasets),
            downloads: Arc::new(config.downloads.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(handlers::root))
            .route("/select_districts", post(handlers::select_districts))
            .route("/district/{name}", get(handlers::get_district))
            .route("/select_cities", post(handlers::select_cities))
            .route("/city/{name}", get(handlers::get_city))
            .route("/select_theater", post(handlers::select_theater))
            .route("/cinema/{name}", get(handlers::get_cinema))
            .route("/select_cinemas", post(handlers::select_cinemas))
            .route("/provinces", get(handlers::get_provinces))
            .route("/download", post(handlers::download))
            .route("/get-date", get(handlers::get_date))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state);

        if config.security.enable_headers {
            router = router.layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ));
        }
        if config.security.cors_permissive {
            router = router.layer(CorsLayer::permissive());
        }

        router
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// Run the server until a signal or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
