use crate::provider::ImageProvider;

// App's shared state; handlers are stateless beyond this
pub struct AppState {
    pub client: reqwest::Client,
    pub provider: Box<dyn ImageProvider>,
    // Server-held credential from the environment, if configured
    pub api_token: Option<String>,
}
