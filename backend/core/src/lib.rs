pub mod error;
pub mod image;
pub mod prompt;
pub mod state;
pub mod traits;

pub use error::CoinError;
pub use image::{detect_image_mime, ImagePayload, MAX_IMAGE_BYTES};
pub use prompt::{COIN_PROMPT, DEFAULT_ANALYSIS};
pub use state::SessionState;
pub use traits::ImageAnalyzer;
