pub mod provider;

pub use provider::VisionProvider;
