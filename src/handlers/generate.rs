use std::sync::Arc;
use std::time::Instant;

use axum::{Json, extract::State};
use base64::Engine;
use base64::prelude::BASE64_STANDARD;

use crate::error::GatewayError;
use crate::metrics::{GENERATION_FAILURES, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{GenerateRequest, GenerateResponse};
use crate::state::AppState;

// Style suffix is appended verbatim with a comma separator
fn full_prompt(prompt: &str, style: Option<&str>) -> String {
    match style.map(str::trim) {
        Some(style) if !style.is_empty() => format!("{}, {}", prompt, style),
        _ => prompt.to_string(),
    }
}

// Client-supplied key wins over the server-held token
fn resolve_credential<'a>(
    request_key: Option<&'a str>,
    server_token: Option<&'a str>,
) -> Option<&'a str> {
    request_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .or(server_token)
}

fn to_data_url(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64_STANDARD.encode(bytes))
}

pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, GatewayError> {
    REQUEST_TOTAL.inc();

    let prompt = payload.prompt.trim();
    if prompt.is_empty() {
        return Err(GatewayError::MissingPrompt);
    }

    let token = resolve_credential(payload.api_key.as_deref(), state.api_token.as_deref())
        .ok_or(GatewayError::MissingCredential)?
        .to_string();

    let prompt = full_prompt(prompt, payload.style.as_deref());
    println!("[generate] prompt: {}", prompt);

    let start = Instant::now();
    let result = state.provider.generate(&state.client, &prompt, &token).await;
    REQUEST_LATENCY.observe(start.elapsed().as_secs_f64());

    match result {
        Ok(bytes) => {
            println!("[generate] success: {} bytes", bytes.len());
            Ok(Json(GenerateResponse {
                success: true,
                image: to_data_url(&bytes),
            }))
        }
        Err(err) => {
            GENERATION_FAILURES.inc();
            println!("[generate] failed: {}", err);
            Err(err)
        }
    }
}
