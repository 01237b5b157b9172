//! Non-fatal data problems found while enriching a snapshot.

use rust_decimal::Decimal;
use tracing::warn;

/// A record that was excluded (fully or in part) from aggregation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    #[error("negative price {price}")]
    NegativePrice { price: Decimal },
    #[error("negative quantity {quantity}")]
    NegativeQuantity { quantity: i64 },
    #[error("unparseable {field} {value:?}")]
    InvalidDate { field: &'static str, value: String },
    #[error("ticker listed more than once; later entry ignored")]
    DuplicateTicker,
    #[error("{field} out of representable range")]
    Overflow { field: &'static str },
}

/// A [`DataError`] attributed to the ticker it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub ticker: String,
    pub error: DataError,
}

impl Diagnostic {
    pub fn new(ticker: impl Into<String>, error: DataError) -> Self {
        Self {
            ticker: ticker.into(),
            error,
        }
    }
}

/// Collects diagnostics and logs each one as it is reported.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, ticker: &str, error: DataError) {
        warn!(ticker = %ticker, error = %error, "malformed record excluded from aggregates");
        self.entries.push(Diagnostic::new(ticker, error));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
