//! HTTP adapters for the external generation services.

pub mod generation_client;

pub use generation_client::HttpGenerationClient;
