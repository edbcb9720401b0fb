use axum::body::Body;
use serde::de::DeserializeOwned;

use crate::error::GatewayError;

/// Body limit for generation requests (1 MiB)
pub const BODY_LIMIT_BYTES: usize = 1 << 20;

/// JSON body extractor whose rejections use the gateway error envelope
///
/// Unlike `axum::Json`, every failure here is a [`GatewayError`], so callers
/// always receive `{"detail": ...}`.
pub struct ExtractPayload<T>(pub T);

impl<S, T> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = GatewayError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        if !is_json(&parts.headers) {
            return Err(GatewayError::UnsupportedMediaType);
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                GatewayError::PayloadTooLarge {
                    limit: BODY_LIMIT_BYTES,
                }
            } else {
                GatewayError::Validation(format!("Failed to read request body: {err}"))
            }
        })?;

        serde_json::from_slice::<T>(&bytes)
            .map(Self)
            .map_err(|e| GatewayError::Validation(format!("Failed to parse request body: {e}")))
    }
}

/// Accepts `application/json` and `application/*+json`, with or without
/// parameters such as `charset`
///
/// A request without a `Content-Type` header is parsed as JSON.
fn is_json(headers: &http::HeaderMap) -> bool {
    let Some(value) = headers.get(http::header::CONTENT_TYPE) else {
        return true;
    };

    let Some(essence) = value.to_str().ok().and_then(|v| v.split(';').next()) else {
        return false;
    };
    let essence = essence.trim().to_ascii_lowercase();

    essence == "application/json"
        || essence
            .strip_prefix("application/")
            .is_some_and(|subtype| subtype.ends_with("+json"))
}
