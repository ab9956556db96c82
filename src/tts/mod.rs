pub mod interface;
pub mod client;
pub mod factory;

pub use interface::{SpeechDelivery, SynthesisCapability, VoiceConfig};
pub use client::SpeechClient;
pub use factory::TTSFactory;
