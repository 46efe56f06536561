use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::provider::ProviderKind;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
    pub timestamp: String,
    // Field name depends on the provider, matching what its clients expect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_configured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token_configured: Option<bool>,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let kind = state.provider.kind();
    let configured = state.api_token.is_some();
    Json(HealthResponse {
        status: "ok",
        message: format!("AI Image Generator API ({})", kind.label()),
        timestamp: chrono::Utc::now().to_rfc3339(),
        api_key_configured: (kind == ProviderKind::Huggingface).then_some(configured),
        api_token_configured: (kind == ProviderKind::Replicate).then_some(configured),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::provider::{HuggingFaceProvider, ReplicateProvider};
    use std::time::Duration;

    #[tokio::test]
    async fn huggingface_health_reports_api_key_configured() {
        let state = Arc::new(AppState {
            client: reqwest::Client::new(),
            provider: Box::new(HuggingFaceProvider::for_model("test/model")),
            api_token: Some("hf_key".to_string()),
        });
        let res = health_handler(State(state)).await;
        assert_eq!(res.status, "ok");
        assert_eq!(res.api_key_configured, Some(true));
        assert_eq!(res.api_token_configured, None);

        let json = serde_json::to_value(&res.0).unwrap();
        assert_eq!(json["apiKeyConfigured"], true);
        assert!(json.get("apiTokenConfigured").is_none());
    }

    #[tokio::test]
    async fn replicate_health_reports_api_token_configured() {
        let state = Arc::new(AppState {
            client: reqwest::Client::new(),
            provider: Box::new(ReplicateProvider::new(
                "https://api.replicate.com".to_string(),
                "version".to_string(),
                Duration::from_secs(1),
                60,
            )),
            api_token: None,
        });
        let res = health_handler(State(state)).await;
        assert_eq!(res.api_token_configured, Some(false));
        assert_eq!(res.api_key_configured, None);
    }
}
