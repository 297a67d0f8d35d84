/// Vision providers — describe a coin photo using a hosted vision LLM.
///
/// The request/response shapes follow the OpenAI chat-completions and Gemini
/// generateContent APIs; both take the image as base64 alongside the text
/// prompt and answer with free text. Anything beyond "send image + prompt,
/// receive text" is out of scope here.
use async_trait::async_trait;
use tracing::info;

use coinlens_core::{CoinError, ImageAnalyzer, ImagePayload};

/// Supported vision providers.
pub enum VisionProvider {
    OpenAI { api_key: String, model: String },
    Gemini { api_key: String },
}

impl VisionProvider {
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::OpenAI { api_key: api_key.into(), model: "gpt-4o".to_string() }
    }

    pub fn openai_with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::OpenAI { api_key: api_key.into(), model: model.into() }
    }

    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self::Gemini { api_key: api_key.into() }
    }
}

#[async_trait]
impl ImageAnalyzer for VisionProvider {
    fn name(&self) -> &str {
        match self {
            Self::OpenAI { .. } => "openai",
            Self::Gemini { .. } => "gemini",
        }
    }

    async fn analyze(&self, image: &ImagePayload, prompt: &str) -> Result<String, CoinError> {
        match self {
            Self::OpenAI { api_key, model } => {
                describe_via_openai(api_key, model, image, prompt).await
            }
            Self::Gemini { api_key } => describe_via_gemini(api_key, image, prompt).await,
        }
    }
}

async fn describe_via_openai(
    api_key: &str, model: &str, image: &ImagePayload, prompt: &str,
) -> Result<String, CoinError> {
    info!("[Vision] Describing coin image via OpenAI {}", model);
    let client = reqwest::Client::new();
    let body = serde_json::json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": prompt },
                { "type": "image_url",
                  "image_url": { "url": image.data_uri() } }
            ]
        }],
        "max_tokens": 512
    });
    let resp = client
        .post("https://api.openai.com/v1/chat/completions")
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| CoinError::Analyzer(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(CoinError::Analyzer(resp.text().await.unwrap_or_default()));
    }
    let json: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| CoinError::Analyzer(e.to_string()))?;
    Ok(json["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .to_string())
}

async fn describe_via_gemini(
    api_key: &str, image: &ImagePayload, prompt: &str,
) -> Result<String, CoinError> {
    info!("[Vision] Describing coin image via Gemini");
    let client = reqwest::Client::new();
    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key={}",
        api_key
    );
    let body = serde_json::json!({
        "contents": [{ "parts": [
            { "text": prompt },
            { "inlineData": { "mimeType": image.mime_type, "data": image.data } }
        ]}]
    });
    let resp = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| CoinError::Analyzer(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(CoinError::Analyzer(resp.text().await.unwrap_or_default()));
    }
    let json: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| CoinError::Analyzer(e.to_string()))?;
    Ok(json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .unwrap_or("")
        .to_string())
}
