#![allow(clippy::must_use_candidate)]

mod health;
mod probe;
mod recovery;
pub mod sink;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use bailout_config::Config;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

pub use recovery::RecoveryBoundary;
pub use sink::{LogSink, MemorySink, TracingSink, WriterSink};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// The recovery boundary logs through the sink selected by
    /// `config.recovery`.
    pub fn new(config: &Config) -> Self {
        Self::with_log_sink(config, sink::from_config(&config.recovery))
    }

    /// Build the server with an explicit recovery log sink
    pub fn with_log_sink(config: &Config, sink: Arc<dyn LogSink>) -> Self {
        Self::with_routes(config, sink, Router::new())
    }

    /// Build the server around application routes
    ///
    /// `routes` sit behind the recovery boundary together with the built-in
    /// health and probe endpoints, so assertions inside them are answered as
    /// structured failures.
    pub fn with_routes(config: &Config, sink: Arc<dyn LogSink>, routes: Router) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mut app = routes;

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Status probe
        if config.server.probe.enabled {
            let path = format!("{}/{{code}}", config.server.probe.base_path());
            app = app.route(&path, axum::routing::get(probe::probe_handler));
        }

        // Apply middleware layers (innermost first)

        // Recovery boundary (innermost — catches failures raised by handlers)
        let boundary = RecoveryBoundary::new(sink);
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let boundary = boundary.clone();
            async move { boundary.intercept(req, next).await }
        }));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the listener or serving fails
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
