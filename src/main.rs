use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

mod config;
mod error;
mod handlers;
mod metrics;
mod models;
mod provider;
mod state;

use config::Args;
use handlers::{generate_handler, health_handler, metrics_handler};
use provider::{HuggingFaceProvider, ImageProvider, ProviderKind, ReplicateProvider};
use state::AppState;

fn build_provider(args: &Args) -> Box<dyn ImageProvider> {
    match args.provider {
        ProviderKind::Huggingface => match &args.api_url {
            Some(url) => Box::new(HuggingFaceProvider::new(format!(
                "{}/models/{}",
                url, args.model
            ))),
            None => Box::new(HuggingFaceProvider::for_model(&args.model)),
        },
        ProviderKind::Replicate => Box::new(ReplicateProvider::new(
            args.api_url
                .clone()
                .unwrap_or_else(|| "https://api.replicate.com".to_string()),
            args.version.clone(),
            Duration::from_millis(args.poll_interval_ms),
            args.poll_attempts,
        )),
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let api_token = args.env_credential();
    let state = Arc::new(AppState {
        client: reqwest::Client::new(),
        provider: build_provider(&args),
        api_token: api_token.clone(),
    });

    let app = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/generate-image", post(generate_handler))
        .route("/metrics", get(metrics_handler))
        .fallback_service(ServeDir::new(&args.static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    println!("Gateway running on http://localhost:{}", args.port);
    println!("Provider: {}", args.provider.label());
    println!(
        "Credential ({}): {}",
        args.provider.credential_env_var(),
        if api_token.is_some() {
            "set"
        } else {
            "not set (clients must supply apiKey)"
        }
    );
    axum::serve(listener, app).await.unwrap();
}
