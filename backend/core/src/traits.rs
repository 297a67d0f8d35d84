use async_trait::async_trait;

use crate::error::CoinError;
use crate::image::ImagePayload;

/// The external image-understanding service, treated as a black box.
///
/// Implementations send the image and prompt to a hosted vision model and
/// return its free-text answer. The controller only ever sees this trait,
/// so tests can substitute a mock.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Provider name (e.g., "openai", "gemini").
    fn name(&self) -> &str;

    /// Describe the image, guided by the given prompt.
    async fn analyze(&self, image: &ImagePayload, prompt: &str) -> Result<String, CoinError>;
}
