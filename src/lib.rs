pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod dividends;
pub mod format;
pub mod models;
pub mod portfolio;
pub mod session;
pub mod sort;
pub mod source;
pub mod stock;
pub mod view;

#[cfg(feature = "app")]
pub mod app;
