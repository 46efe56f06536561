use serde::{Deserialize, Serialize};

// Generation request from the browser
#[derive(Deserialize, Serialize, Clone)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    // Optional style suffix, appended to the prompt with a comma
    #[serde(default)]
    pub style: Option<String>,
    // Optional client-supplied credential; the server env token is the fallback
    #[serde(default, rename = "apiKey")]
    pub api_key: Option<String>,
}

// Generation response back to the browser
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GenerateResponse {
    pub success: bool,
    // data:image/png;base64,<...>
    pub image: String,
}

// Replicate prediction, as returned by the submit and status endpoints
#[derive(Deserialize, Serialize, Clone)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
}

impl PredictionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, PredictionStatus::Succeeded | PredictionStatus::Failed)
    }
}

// Error body shape shared by both upstream APIs
#[derive(Deserialize)]
pub struct UpstreamError {
    #[serde(default)]
    pub error: Option<String>,
}
