pub mod interface;
pub mod client;

pub use interface::{TranscriptionCapability, TranscriptionRequest, TranscriptionResult};
pub use client::WhisperClient;
