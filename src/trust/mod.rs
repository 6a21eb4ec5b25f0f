pub mod analyzer;
pub mod cache;
pub mod reply;
pub mod scoring;

pub use analyzer::{ProfileAnalyzer, ProfileSource};
pub use cache::{HttpListSource, ListSource, TrustedList, TrustedListCache};
