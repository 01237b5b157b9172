mod aggregator;
mod models;
mod month;

pub use aggregator::*;
pub use models::*;
pub use month::*;
