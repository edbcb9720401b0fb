#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
pub mod protocol;
pub mod provider;
mod request;
mod routes;
mod server;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

pub use error::{ErrorEnvelope, GatewayError, Result};
pub use request::{BODY_LIMIT_BYTES, ExtractPayload};
pub use routes::{LISTING_PATH, ProviderKind, ROUTES, RouteDescriptor, RouteListing, reserved_paths};
pub use server::{Gateway, GatewayBuilder, Route};
pub use types::{GenerationParams, GenerationRequest, GenerationResponse, PromptRequest};

/// Build the gateway from configuration
pub fn build_gateway(config: &parley_config::Config) -> anyhow::Result<Gateway> {
    GatewayBuilder::new(&config.providers)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize gateway: {e}"))
}

/// Create the router for every generation route plus the route listing
pub fn endpoint_router(gateway: &Gateway) -> Router {
    let mut router = Router::new();

    for route in gateway.routes() {
        for path in route.descriptor().paths() {
            router = router.route(path, post(generate).with_state(Arc::clone(route)));
        }
    }

    let listing = Arc::new(RouteListing::new(
        gateway.routes().iter().map(|route| *route.descriptor()),
    ));

    router.route(LISTING_PATH, get(list_routes).with_state(listing))
}

/// Handle a prompt on one route
async fn generate(
    State(route): State<Arc<Route>>,
    ExtractPayload(request): ExtractPayload<PromptRequest>,
) -> Result<Json<GenerationResponse>> {
    tracing::debug!("generation handler called for route: {}", route.descriptor().name);

    let response = route.generate(request).await?;

    Ok(Json(response))
}

async fn list_routes(State(listing): State<Arc<RouteListing>>) -> Json<RouteListing> {
    Json(listing.as_ref().clone())
}
