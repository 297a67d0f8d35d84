//! Upload/analysis session controller.
//!
//! Owns the session state and mediates the three user actions: upload a
//! photo, re-analyze the current photo, and the startup default load. The
//! analyzer is awaited with the state lock released, so a user who fires
//! re-analyze while a call is in flight gets two racing calls and the last
//! response to resolve wins. That matches the original behavior; no
//! sequencing guard is applied.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use coinlens_core::{
    detect_image_mime, CoinError, ImageAnalyzer, ImagePayload, SessionState, COIN_PROMPT,
    DEFAULT_ANALYSIS,
};

pub struct Controller {
    analyzer: Arc<dyn ImageAnalyzer>,
    asset_path: PathBuf,
    state: Mutex<SessionState>,
}

impl Controller {
    pub fn new(analyzer: Arc<dyn ImageAnalyzer>, asset_path: impl Into<PathBuf>) -> Self {
        Self {
            analyzer,
            asset_path: asset_path.into(),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn asset_path(&self) -> &Path {
        &self.asset_path
    }

    /// Clone of the current session state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Load the bundled sample image and its canned analysis. No analyzer
    /// call is made.
    pub async fn load_default(&self) -> Result<(), CoinError> {
        let result = self.read_default_asset().await;
        let mut state = self.state.lock().await;
        state.is_loading = false;
        match result {
            Ok(payload) => {
                info!(bytes = payload.byte_len, "Loaded bundled default coin");
                state.image = Some(payload);
                state.analysis_text = DEFAULT_ANALYSIS.to_string();
                state.error_message = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Default asset unavailable");
                state.error_message = Some(e.user_message());
                Err(e)
            }
        }
    }

    async fn read_default_asset(&self) -> Result<ImagePayload, CoinError> {
        let bytes = tokio::fs::read(&self.asset_path)
            .await
            .map_err(|e| CoinError::Load(format!("default asset unavailable: {e}")))?;
        let mime = detect_image_mime(&self.asset_path).unwrap_or("image/png");
        ImagePayload::from_bytes(mime, &bytes)
    }

    /// Validate an uploaded file, replace the current image, and analyze it.
    ///
    /// Rejected uploads (wrong type, over 20 MiB) never reach the analyzer
    /// and leave the previous image in place.
    pub async fn handle_upload(
        &self,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<(), CoinError> {
        let payload = ImagePayload::from_bytes(content_type, bytes)?;
        info!(
            mime = %payload.mime_type,
            bytes = payload.byte_len,
            "Accepted coin photo upload"
        );
        {
            let mut state = self.state.lock().await;
            state.image = Some(payload);
            state.error_message = None;
        }
        self.analyze().await
    }

    /// Send the current image to the analyzer with the fixed coin prompt.
    ///
    /// Success replaces the analysis text and clears any error; failure
    /// stores the analyzer's message verbatim. Loading is cleared on both
    /// paths.
    pub async fn analyze(&self) -> Result<(), CoinError> {
        let image = {
            let mut state = self.state.lock().await;
            let Some(image) = state.image.clone() else {
                let err = CoinError::Validation("no image loaded".to_string());
                state.error_message = Some(err.user_message());
                return Err(err);
            };
            state.is_loading = true;
            state.error_message = None;
            image
        };

        // Lock released: the network call must not block snapshot reads.
        let result = self.analyzer.analyze(&image, COIN_PROMPT).await;

        let mut state = self.state.lock().await;
        state.is_loading = false;
        match result {
            Ok(text) => {
                state.analysis_text = text;
                state.error_message = None;
                Ok(())
            }
            Err(e) => {
                warn!(provider = self.analyzer.name(), error = %e, "Analysis failed");
                state.error_message = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Re-run analysis on the currently loaded image without re-uploading.
    pub async fn reanalyze(&self) -> Result<(), CoinError> {
        info!("Re-analyzing current coin image");
        self.analyze().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockAnalyzer {
        calls: AtomicUsize,
        last_prompt: std::sync::Mutex<Option<String>>,
        response: Result<String, CoinError>,
    }

    impl MockAnalyzer {
        fn replying(text: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_prompt: std::sync::Mutex::new(None),
                response: Ok(text.to_string()),
            }
        }

        fn failing(err: CoinError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_prompt: std::sync::Mutex::new(None),
                response: Err(err),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageAnalyzer for MockAnalyzer {
        fn name(&self) -> &str {
            "mock"
        }

        async fn analyze(
            &self,
            _image: &ImagePayload,
            prompt: &str,
        ) -> Result<String, CoinError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.response.clone()
        }
    }

    fn controller_with(analyzer: Arc<MockAnalyzer>) -> Controller {
        Controller::new(analyzer, "does-not-exist.png")
    }

    #[tokio::test]
    async fn valid_upload_triggers_exactly_one_analysis() {
        let analyzer = Arc::new(MockAnalyzer::replying("1. Coin Identification:"));
        let controller = controller_with(Arc::clone(&analyzer));

        let jpeg = vec![0u8; 1024 * 1024];
        controller.handle_upload("image/jpeg", &jpeg).await.unwrap();

        assert_eq!(analyzer.call_count(), 1);
        assert_eq!(
            analyzer.last_prompt.lock().unwrap().as_deref(),
            Some(COIN_PROMPT)
        );
        let state = controller.snapshot().await;
        assert_eq!(state.analysis_text, "1. Coin Identification:");
        assert_eq!(state.error_message, None);
        assert!(!state.is_loading);
        assert_eq!(state.image.unwrap().byte_len, jpeg.len());
    }

    #[tokio::test]
    async fn oversized_upload_never_reaches_analyzer() {
        let analyzer = Arc::new(MockAnalyzer::replying("unused"));
        let controller = controller_with(Arc::clone(&analyzer));

        let big = vec![0u8; 25 * 1024 * 1024];
        let err = controller.handle_upload("image/jpeg", &big).await.unwrap_err();

        assert_eq!(err, CoinError::Validation("too large".to_string()));
        assert_eq!(analyzer.call_count(), 0);
        assert!(controller.snapshot().await.image.is_none());
    }

    #[tokio::test]
    async fn non_image_upload_never_reaches_analyzer() {
        let analyzer = Arc::new(MockAnalyzer::replying("unused"));
        let controller = controller_with(Arc::clone(&analyzer));

        let err = controller
            .handle_upload("text/plain", b"not a coin")
            .await
            .unwrap_err();

        assert_eq!(err, CoinError::Validation("unsupported type".to_string()));
        assert_eq!(analyzer.call_count(), 0);
    }

    #[tokio::test]
    async fn analyzer_failure_surfaces_message_verbatim() {
        let analyzer = Arc::new(MockAnalyzer::failing(CoinError::Analyzer(
            "quota exceeded".to_string(),
        )));
        let controller = controller_with(Arc::clone(&analyzer));

        let jpeg = vec![0u8; 1024];
        controller.handle_upload("image/jpeg", &jpeg).await.unwrap_err();

        let state = controller.snapshot().await;
        assert_eq!(state.error_message.as_deref(), Some("quota exceeded"));
        assert!(!state.is_loading);
        // The previous analysis text is left untouched on failure.
        assert_eq!(state.analysis_text, "");
    }

    #[tokio::test]
    async fn empty_analyzer_error_gets_generic_fallback() {
        let analyzer = Arc::new(MockAnalyzer::failing(CoinError::Analyzer(String::new())));
        let controller = controller_with(analyzer);

        controller.handle_upload("image/png", &[0u8; 16]).await.unwrap_err();

        let state = controller.snapshot().await;
        assert_eq!(state.error_message.as_deref(), Some("image analysis failed"));
    }

    #[tokio::test]
    async fn reanalyze_without_image_is_rejected() {
        let analyzer = Arc::new(MockAnalyzer::replying("unused"));
        let controller = controller_with(Arc::clone(&analyzer));

        let err = controller.reanalyze().await.unwrap_err();

        assert_eq!(err, CoinError::Validation("no image loaded".to_string()));
        assert_eq!(analyzer.call_count(), 0);
    }

    #[tokio::test]
    async fn reanalyze_reuses_current_image() {
        let analyzer = Arc::new(MockAnalyzer::replying("- Metal: silver"));
        let controller = controller_with(Arc::clone(&analyzer));

        controller.handle_upload("image/png", &[0u8; 64]).await.unwrap();
        controller.reanalyze().await.unwrap();

        assert_eq!(analyzer.call_count(), 2);
    }

    #[tokio::test]
    async fn load_default_uses_canned_analysis() {
        let analyzer = Arc::new(MockAnalyzer::replying("unused"));
        let mut asset = tempfile::NamedTempFile::with_suffix(".png").unwrap();
        asset.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let controller = Controller::new(
            Arc::clone(&analyzer) as Arc<dyn ImageAnalyzer>,
            asset.path(),
        );
        controller.load_default().await.unwrap();

        let state = controller.snapshot().await;
        assert_eq!(state.analysis_text, DEFAULT_ANALYSIS);
        assert_eq!(state.error_message, None);
        assert!(state.image.is_some());
        assert_eq!(analyzer.call_count(), 0);
    }

    #[tokio::test]
    async fn load_default_missing_asset_sets_error() {
        let analyzer = Arc::new(MockAnalyzer::replying("unused"));
        let controller = controller_with(analyzer);

        let err = controller.load_default().await.unwrap_err();

        assert!(matches!(err, CoinError::Load(_)));
        let state = controller.snapshot().await;
        assert!(state.error_message.is_some());
        assert!(!state.is_loading);
    }
}
