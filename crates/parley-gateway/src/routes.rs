use serde::Serialize;

use crate::types::GenerationParams;

/// Which upstream a route talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Generative Language API; key checked at startup
    Google,
    /// Hugging Face Inference; key checked per request
    HuggingFace,
}

/// Static description of one generation endpoint
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RouteDescriptor {
    pub name: &'static str,
    pub path: &'static str,
    pub alias: &'static str,
    pub provider: ProviderKind,
    pub model: &'static str,
    pub params: GenerationParams,
}

impl RouteDescriptor {
    /// Every path this route answers on: canonical, alias, and both without
    /// the trailing slash
    pub fn paths(&self) -> impl Iterator<Item = &'static str> + use<> {
        [self.path, self.alias]
            .into_iter()
            .flat_map(|path| [path, path.trim_end_matches('/')])
    }
}

const SECONDARY_PARAMS: GenerationParams = GenerationParams {
    max_new_tokens: Some(128),
    temperature: Some(0.7),
};

/// Route table served by the gateway
pub const ROUTES: [RouteDescriptor; 4] = [
    RouteDescriptor {
        name: "primary",
        path: "/primary/",
        alias: "/gemini/",
        provider: ProviderKind::Google,
        model: "gemini-1.5-flash",
        params: GenerationParams {
            max_new_tokens: None,
            temperature: None,
        },
    },
    RouteDescriptor {
        name: "secondary-a",
        path: "/secondary-a/",
        alias: "/mistral/",
        provider: ProviderKind::HuggingFace,
        model: "mistralai/Mistral-7B-Instruct-v0.3",
        params: SECONDARY_PARAMS,
    },
    RouteDescriptor {
        name: "secondary-b",
        path: "/secondary-b/",
        alias: "/llama/",
        provider: ProviderKind::HuggingFace,
        model: "meta-llama/Llama-2-7b-chat-hf",
        params: SECONDARY_PARAMS,
    },
    RouteDescriptor {
        name: "secondary-c",
        path: "/secondary-c/",
        alias: "/gpt2/",
        provider: ProviderKind::HuggingFace,
        model: "gpt2",
        params: SECONDARY_PARAMS,
    },
];

/// Path of the route listing endpoint
pub const LISTING_PATH: &str = "/routes";

/// Every path the gateway router registers
///
/// Other routes mounted on the same router must avoid these.
pub fn reserved_paths() -> impl Iterator<Item = &'static str> {
    ROUTES
        .into_iter()
        .flat_map(|route| route.paths())
        .chain([LISTING_PATH])
}

/// Body of `GET /routes`
#[derive(Debug, Clone, Serialize)]
pub struct RouteListing {
    pub object: &'static str,
    pub data: Vec<RouteDescriptor>,
}

impl RouteListing {
    pub fn new(descriptors: impl IntoIterator<Item = RouteDescriptor>) -> Self {
        Self {
            object: "list",
            data: descriptors.into_iter().collect(),
        }
    }
}
