//! Dividend history of a single ticker.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::diagnostics::{DataError, Diagnostic, Diagnostics};
use crate::dividends::DividendPayment;
use crate::models::StockDetail;
use crate::sort::{payment_resolver, sort_items, SortSpec};

/// One point of the payout chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Validated payments of one [`StockDetail`].
#[derive(Debug, Clone)]
pub struct StockHistory {
    detail: StockDetail,
    payments: Vec<DividendPayment>,
    diagnostics: Vec<Diagnostic>,
}

impl StockHistory {
    pub fn new(detail: StockDetail) -> Self {
        let mut diagnostics = Diagnostics::new();
        if detail.current_price < Decimal::ZERO {
            diagnostics.report(
                &detail.ticker,
                DataError::NegativePrice {
                    price: detail.current_price,
                },
            );
        }
        if detail.quantity < 0 {
            diagnostics.report(
                &detail.ticker,
                DataError::NegativeQuantity {
                    quantity: detail.quantity,
                },
            );
        }
        let payments = DividendPayment::collect(&detail.ticker, detail.dividends(), &mut diagnostics);

        Self {
            detail,
            payments,
            diagnostics: diagnostics.into_vec(),
        }
    }

    pub fn detail(&self) -> &StockDetail {
        &self.detail
    }

    /// Payments, oldest first.
    pub fn payments(&self) -> &[DividendPayment] {
        &self.payments
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The history table ordered by `spec`.
    pub fn sorted(&self, spec: &SortSpec) -> Vec<DividendPayment> {
        sort_items(self.payments.clone(), spec, &payment_resolver())
    }

    /// Newest payment first.
    pub fn default_sort() -> SortSpec {
        SortSpec::descending("date")
    }

    pub fn chart_series(&self) -> Vec<ChartPoint> {
        self.payments
            .iter()
            .map(|payment| ChartPoint {
                date: payment.date,
                amount: payment.amount_per_share,
            })
            .collect()
    }

    /// Mean per-share payout, `None` without any payment or on overflow.
    pub fn average_amount(&self) -> Option<Decimal> {
        if self.payments.is_empty() {
            return None;
        }
        let sum = self
            .payments
            .iter()
            .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.amount_per_share))?;
        sum.checked_div(Decimal::from(self.payments.len()))
    }

    /// Value of the holding at the current price, `None` for a bad record
    /// or one out of range.
    pub fn holding_value(&self) -> Option<Decimal> {
        let quantity = u64::try_from(self.detail.quantity).ok()?;
        if self.detail.current_price < Decimal::ZERO {
            return None;
        }
        self.detail.current_price.checked_mul(Decimal::from(quantity))
    }
}
