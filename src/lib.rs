pub mod asr;
pub mod config;
pub mod error;
pub mod openai_service;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod translate;
pub mod tts;
pub mod utils;
