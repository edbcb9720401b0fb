//! Upstream wire formats

pub mod google;
pub mod huggingface;
