pub mod client;
pub mod stream;
pub mod types;

pub use client::{XApiClient, XApiError};
pub use stream::EventStream;
