use std::str::FromStr;

use http::Method;
use http::header::{HeaderName, HeaderValue};
use parley_config::{AnyOrArray, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build the CORS layer applied to every route
///
/// Entries that fail to parse are logged and skipped rather than failing
/// startup.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = match &config.origins {
        AnyOrArray::Any => AllowOrigin::any(),
        AnyOrArray::List(origins) => AllowOrigin::list(parse_all::<HeaderValue>("origin", origins)),
    };

    let methods = match &config.methods {
        AnyOrArray::Any => AllowMethods::any(),
        AnyOrArray::List(methods) => AllowMethods::list(parse_all::<Method>("method", methods)),
    };

    let headers = match &config.headers {
        AnyOrArray::Any => AllowHeaders::any(),
        AnyOrArray::List(headers) => AllowHeaders::list(parse_all::<HeaderName>("header", headers)),
    };

    let mut layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(config.credentials);

    if !config.expose_headers.is_empty() {
        layer = layer.expose_headers(parse_all::<HeaderName>("expose header", &config.expose_headers));
    }

    if let Some(max_age) = config.max_age_duration() {
        layer = layer.max_age(max_age);
    }

    layer
}

fn parse_all<T: FromStr>(kind: &str, values: &[String]) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| {
            let parsed = value.parse().ok();
            if parsed.is_none() {
                tracing::warn!(%value, "ignoring invalid CORS {kind}");
            }
            parsed
        })
        .collect()
}
