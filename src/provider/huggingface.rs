use async_trait::async_trait;
use serde_json::json;

use super::{ImageProvider, ProviderKind, read_upstream_error};
use crate::error::GatewayError;

// Hugging Face Inference API: one POST, raw image bytes back.
pub struct HuggingFaceProvider {
    endpoint: String,
}

impl HuggingFaceProvider {
    pub fn new(endpoint: String) -> Self {
        Self { endpoint }
    }

    pub fn for_model(model: &str) -> Self {
        Self::new(format!(
            "https://api-inference.huggingface.co/models/{}",
            model
        ))
    }
}

#[async_trait]
impl ImageProvider for HuggingFaceProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Huggingface
    }

    async fn generate(
        &self,
        client: &reqwest::Client,
        prompt: &str,
        token: &str,
    ) -> Result<Vec<u8>, GatewayError> {
        let res = client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&json!({
                "inputs": prompt,
                "options": { "wait_for_model": true }
            }))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(read_upstream_error(res).await);
        }

        let bytes = res.bytes().await?;
        println!("[huggingface] generated {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};

    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake image payload";

    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn success_returns_the_upstream_bytes() {
        let app = Router::new().route(
            "/models/test",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["inputs"], "a red fox, watercolor");
                assert_eq!(body["options"]["wait_for_model"], true);
                PNG_BYTES.to_vec()
            }),
        );
        let base = spawn_upstream(app).await;

        let provider = HuggingFaceProvider::new(format!("{}/models/test", base));
        let bytes = provider
            .generate(&reqwest::Client::new(), "a red fox, watercolor", "hf_key")
            .await
            .unwrap();
        assert_eq!(bytes, PNG_BYTES);
    }

    #[tokio::test]
    async fn upstream_error_field_passes_through_verbatim() {
        let app = Router::new().route(
            "/models/test",
            post(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    r#"{"error":"model loading"}"#,
                )
            }),
        );
        let base = spawn_upstream(app).await;

        let provider = HuggingFaceProvider::new(format!("{}/models/test", base));
        let err = provider
            .generate(&reqwest::Client::new(), "a cat", "hf_key")
            .await
            .unwrap_err();
        match err {
            GatewayError::Upstream { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "model loading");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_error_body_gets_a_friendly_message() {
        let app = Router::new().route(
            "/models/test",
            post(|| async { (StatusCode::UNAUTHORIZED, "") }),
        );
        let base = spawn_upstream(app).await;

        let provider = HuggingFaceProvider::new(format!("{}/models/test", base));
        let err = provider
            .generate(&reqwest::Client::new(), "a cat", "bad_key")
            .await
            .unwrap_err();
        match err {
            GatewayError::Upstream { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid API credential");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_used_as_is() {
        let app = Router::new().route(
            "/models/test",
            post(|| async { (StatusCode::BAD_GATEWAY, "backend exploded") }),
        );
        let base = spawn_upstream(app).await;

        let provider = HuggingFaceProvider::new(format!("{}/models/test", base));
        let err = provider
            .generate(&reqwest::Client::new(), "a cat", "hf_key")
            .await
            .unwrap_err();
        match err {
            GatewayError::Upstream { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "backend exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn for_model_builds_the_inference_url() {
        let provider = HuggingFaceProvider::for_model("stabilityai/stable-diffusion-xl-base-1.0");
        assert_eq!(
            provider.endpoint,
            "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0"
        );
    }
}
