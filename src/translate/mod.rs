pub mod interface;
pub mod client;

pub use interface::{TranslationCapability, TranslationResult};
pub use client::ChatTranslator;
