mod metrics;
mod models;
mod normalizer;
mod service;

pub use metrics::*;
pub use models::*;
pub use normalizer::*;
pub use service::*;
