use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{ImageProvider, ProviderKind, read_upstream_error};
use crate::error::GatewayError;
use crate::metrics::POLL_ATTEMPTS;
use crate::models::{Prediction, PredictionStatus};

// Replicate predictions API: submit a job, poll its status at a fixed
// interval until it reaches a terminal state, then fetch the output URL.
pub struct ReplicateProvider {
    base_url: String,
    version: String,
    poll_interval: Duration,
    max_attempts: u32,
}

impl ReplicateProvider {
    pub fn new(
        base_url: String,
        version: String,
        poll_interval: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            base_url,
            version,
            poll_interval,
            max_attempts,
        }
    }

    fn auth_header(token: &str) -> String {
        // Replicate uses "Token <...>", not "Bearer <...>"
        format!("Token {}", token)
    }

    async fn submit(
        &self,
        client: &reqwest::Client,
        prompt: &str,
        token: &str,
    ) -> Result<Prediction, GatewayError> {
        let res = client
            .post(format!("{}/v1/predictions", self.base_url))
            .header("Authorization", Self::auth_header(token))
            .json(&json!({
                "version": self.version,
                "input": {
                    "prompt": prompt,
                    "num_inference_steps": 25,
                    "guidance_scale": 7.5,
                    "width": 512,
                    "height": 512
                }
            }))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(read_upstream_error(res).await);
        }
        Ok(res.json().await?)
    }

    async fn fetch_output(
        &self,
        client: &reqwest::Client,
        prediction: &Prediction,
    ) -> Result<Vec<u8>, GatewayError> {
        let url = prediction
            .output
            .as_deref()
            .and_then(|urls| urls.first())
            .ok_or_else(|| GatewayError::Upstream {
                status: 500,
                message: "prediction succeeded but returned no output".to_string(),
            })?;

        let res = client.get(url).send().await?;
        if !res.status().is_success() {
            return Err(read_upstream_error(res).await);
        }
        Ok(res.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ImageProvider for ReplicateProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Replicate
    }

    async fn generate(
        &self,
        client: &reqwest::Client,
        prompt: &str,
        token: &str,
    ) -> Result<Vec<u8>, GatewayError> {
        let mut prediction = self.submit(client, prompt, token).await?;
        println!("[replicate] prediction started: {}", prediction.id);

        let mut attempts = 0u32;
        let mut check_failed = false;

        while !prediction.status.is_terminal() && attempts < self.max_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let res = client
                .get(format!("{}/v1/predictions/{}", self.base_url, prediction.id))
                .header("Authorization", Self::auth_header(token))
                .send()
                .await?;

            if !res.status().is_success() {
                // Deliberate short-circuit: a failing status endpoint is not retried
                println!(
                    "[replicate] status check failed with {}, giving up",
                    res.status()
                );
                check_failed = true;
                break;
            }

            prediction = res.json().await?;
            attempts += 1;
            println!(
                "[replicate] status: {:?} ({}/{})",
                prediction.status, attempts, self.max_attempts
            );
        }

        POLL_ATTEMPTS.observe(attempts as f64);

        match prediction.status {
            PredictionStatus::Succeeded => self.fetch_output(client, &prediction).await,
            PredictionStatus::Failed => Err(GatewayError::Upstream {
                status: 500,
                message: prediction
                    .error
                    .unwrap_or_else(|| "image generation failed".to_string()),
            }),
            _ if check_failed => Err(GatewayError::Upstream {
                status: 502,
                message: "prediction status check failed".to_string(),
            }),
            _ => Err(GatewayError::Timeout { attempts }),
        }
    }
}
