use clap::Parser;

use crate::provider::ProviderKind;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "imagegen-gateway")]
#[command(about = "HTTP proxy for text-to-image inference APIs")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    // Upstream image provider
    #[arg(long, value_enum, default_value_t = ProviderKind::Huggingface)]
    pub provider: ProviderKind,

    // Hugging Face model id
    #[arg(long, default_value = "stabilityai/stable-diffusion-xl-base-1.0")]
    pub model: String,

    // Replicate model version hash
    #[arg(
        long,
        default_value = "39ed52f2a78e934b3ba6e2a89f5b1c712de7dfea535525255b1aa35c5565e08b"
    )]
    pub version: String,

    // Prediction poll interval in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub poll_interval_ms: u64,

    // Max prediction status checks before giving up
    #[arg(long, default_value_t = 60)]
    pub poll_attempts: u32,

    // Directory with the frontend assets
    #[arg(long, default_value = "public")]
    pub static_dir: String,

    // Upstream base URL override (self-hosted gateways, tests)
    #[arg(long)]
    pub api_url: Option<String>,
}

impl Args {
    // Server-held credential from the provider's environment variable
    pub fn env_credential(&self) -> Option<String> {
        std::env::var(self.provider.credential_env_var())
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}
