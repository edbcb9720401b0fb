mod cors;
mod health;

use std::net::SocketAddr;

use axum::Router;
use parley_config::Config;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the health path collides with a gateway route or
    /// the gateway cannot be initialized, most notably when the primary
    /// provider has no API key
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config.server.listen_address();

        let health_config = &config.server.health;
        if health_config.enabled && parley_gateway::reserved_paths().any(|path| path == health_config.path) {
            anyhow::bail!(
                "server.health.path '{}' conflicts with a gateway route",
                health_config.path
            );
        }

        let gateway = parley_gateway::build_gateway(config)?;

        let mut app = parley_gateway::endpoint_router(&gateway);

        if health_config.enabled {
            app = app.route(&health_config.path, axum::routing::get(health::health_handler));
        }

        // Outermost last: CORS answers preflights before tracing sees them
        app = app
            .layer(TraceLayer::new_for_http())
            .layer(cors::cors_layer(&config.server.cors));

        Ok(Self {
            router: app,
            listen_address,
        })
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
    /// Blocks until the cancellation token is triggered. In-flight requests
    /// finish before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
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
