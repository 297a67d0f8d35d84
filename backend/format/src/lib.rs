//! Analysis text formatter.
//!
//! Turns the vision model's free-text answer into a typed sequence of
//! display blocks that any frontend (web page, terminal) can render. The
//! classifier is line-oriented pseudo-markdown; it knows nothing about
//! coins.

pub mod blocks;
pub mod formatter;

pub use blocks::DisplayBlock;
pub use formatter::{format_analysis, format_blocks};
