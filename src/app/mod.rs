//! Command implementations shared by the CLI: load, query, render as JSON.

mod config;
mod portfolio;
mod token;
mod types;

pub use config::config_output;
pub use portfolio::{
    calendar_output, dividends_output, load_engine, load_snapshot, load_stock, positions_output,
    stock_output, summary_output,
};
pub use token::{token_output, token_output_with};
pub use types::{
    CalendarEventOutput, CalendarOutput, ChangeOutput, ChartPointOutput, DiagnosticOutput,
    PaymentOutput, PositionDividendsOutput, PositionOutput, PositionsOutput, StockOutput,
    SummaryOutput, YearDividendsOutput,
};
