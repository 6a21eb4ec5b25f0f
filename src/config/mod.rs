pub mod env;
mod loader;

pub use env::{AppConfig, XApiConfig};
pub use loader::load_config;
