pub mod google;
pub mod huggingface;

use async_trait::async_trait;

use crate::{error::Result, types::GenerationRequest};

/// A backend that turns a prompt into text
///
/// Implementations make exactly one outbound call per `generate` and never
/// retry. An empty string is a valid return value here; the route decides
/// what an empty generation means.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name used in logs and error messages
    fn name(&self) -> &str;

    /// Run a single generation
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String>;
}
