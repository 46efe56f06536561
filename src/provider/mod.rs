use async_trait::async_trait;
use clap::ValueEnum;

use crate::error::GatewayError;
use crate::models::UpstreamError;

mod huggingface;
mod replicate;

pub use huggingface::HuggingFaceProvider;
pub use replicate::ReplicateProvider;

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProviderKind {
    Huggingface,
    Replicate,
}

impl ProviderKind {
    // Environment variable holding the server-side credential
    pub fn credential_env_var(self) -> &'static str {
        match self {
            ProviderKind::Huggingface => "HUGGINGFACE_API_KEY",
            ProviderKind::Replicate => "REPLICATE_API_TOKEN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::Huggingface => "Hugging Face",
            ProviderKind::Replicate => "Replicate",
        }
    }
}

// clap needs Display for the default value; keep it in sync with the
// ValueEnum spelling so the printed default parses back
impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ProviderKind::Huggingface => "huggingface",
            ProviderKind::Replicate => "replicate",
        })
    }
}

// One upstream image API. Implementations submit the prompt, wait for the
// result however their API requires, and hand back raw image bytes.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn generate(
        &self,
        client: &reqwest::Client,
        prompt: &str,
        token: &str,
    ) -> Result<Vec<u8>, GatewayError>;
}

// Turn a non-success upstream response into a GatewayError. The upstream
// `error` field passes through verbatim when present; otherwise fall back to
// the raw body, then to a friendly message for the well-known statuses.
pub(crate) async fn read_upstream_error(res: reqwest::Response) -> GatewayError {
    let status = res.status();
    let body = res.text().await.unwrap_or_default();

    let message = serde_json::from_str::<UpstreamError>(&body)
        .ok()
        .and_then(|e| e.error)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                friendly_status_message(status.as_u16())
                    .unwrap_or_else(|| {
                        status.canonical_reason().unwrap_or("upstream API error")
                    })
                    .to_string()
            } else {
                body
            }
        });

    GatewayError::Upstream {
        status: status.as_u16(),
        message,
    }
}

fn friendly_status_message(status: u16) -> Option<&'static str> {
    match status {
        401 | 403 => Some("invalid API credential"),
        429 => Some("rate limited by the image API, try again later"),
        503 => Some("the model is warming up, try again shortly"),
        _ => None,
    }
}
