use serde::{Deserialize, Serialize};

use crate::image::ImagePayload;

/// State of one analysis session.
///
/// `is_loading` is true only while an analyzer call is outstanding. An error
/// message and a successful analysis update are mutually exclusive for the
/// same operation: success clears the error, failure leaves the previous
/// analysis text untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Currently loaded image, if any.
    pub image: Option<ImagePayload>,
    /// Raw analyzer output (or the bundled default text).
    pub analysis_text: String,
    pub is_loading: bool,
    pub error_message: Option<String>,
}
