//! Sortable fields of the three tables: positions, calendar events and a
//! stock's dividend history.

use super::{FieldAccessor, FieldTable, ResolverChain, SortValue};
use crate::dividends::{DividendEvent, DividendPayment};
use crate::portfolio::EnrichedPosition;

fn total_value(p: &EnrichedPosition) -> SortValue {
    SortValue::number(p.total_value)
}

fn total_dividends(p: &EnrichedPosition) -> SortValue {
    SortValue::number(p.total_dividends_this_year)
}

/// First payment of the reference year, per share.
fn first_dividend(p: &EnrichedPosition) -> SortValue {
    SortValue::number(p.dividends_this_year.first().map(|d| d.amount_per_share))
}

fn change_percent(p: &EnrichedPosition) -> SortValue {
    SortValue::number(p.detail.as_ref().map(|d| d.effective_change_percent()))
}

fn daily_change_percent(p: &EnrichedPosition) -> SortValue {
    SortValue::number(p.detail.as_ref().map(|d| d.effective_daily_change_percent()))
}

fn price(p: &EnrichedPosition) -> SortValue {
    SortValue::number(p.detail.as_ref().map(|d| d.price))
}

fn quantity(p: &EnrichedPosition) -> SortValue {
    SortValue::number(p.detail.as_ref().map(|d| d.quantity.into()))
}

fn change(p: &EnrichedPosition) -> SortValue {
    SortValue::number(p.detail.as_ref().map(|d| d.change))
}

fn daily_change(p: &EnrichedPosition) -> SortValue {
    SortValue::number(p.detail.as_ref().map(|d| d.daily_change))
}

fn position_yield(p: &EnrichedPosition) -> SortValue {
    SortValue::number(p.detail.as_ref().and_then(|d| d.dividend_yield_percent))
}

fn name(p: &EnrichedPosition) -> SortValue {
    SortValue::text(p.position.name.as_str())
}

fn ticker(p: &EnrichedPosition) -> SortValue {
    SortValue::text(p.position.ticker.as_str())
}

fn instrument_type(p: &EnrichedPosition) -> SortValue {
    SortValue::text(p.position.instrument_type.as_str())
}

static POSITION_DERIVED: &[(&str, FieldAccessor<EnrichedPosition>)] = &[
    ("totalvalue", total_value),
    ("totaldividends", total_dividends),
    ("dividends", first_dividend),
    ("changepercent", change_percent),
    ("dailychangepercent", daily_change_percent),
];

static POSITION_DETAIL: &[(&str, FieldAccessor<EnrichedPosition>)] = &[
    ("price", price),
    ("quantity", quantity),
    ("change", change),
    ("dailychange", daily_change),
    ("dividendyieldpercent", position_yield),
];

static POSITION_RAW: &[(&str, FieldAccessor<EnrichedPosition>)] = &[
    ("name", name),
    ("ticker", ticker),
    ("instrumenttype", instrument_type),
];

/// Derived metrics, then detail fields, then listing fields.
pub fn position_resolver() -> ResolverChain<EnrichedPosition> {
    ResolverChain::new()
        .then(FieldTable::new(POSITION_DERIVED))
        .then(FieldTable::new(POSITION_DETAIL))
        .then(FieldTable::new(POSITION_RAW))
}

fn event_title(e: &DividendEvent) -> SortValue {
    SortValue::text(e.title.as_str())
}

fn event_ticker(e: &DividendEvent) -> SortValue {
    SortValue::text(e.ticker.as_str())
}

fn event_date(e: &DividendEvent) -> SortValue {
    SortValue::Date(e.date)
}

fn event_quantity(e: &DividendEvent) -> SortValue {
    SortValue::Number(e.quantity.into())
}

fn event_yield(e: &DividendEvent) -> SortValue {
    SortValue::number(e.dividend_yield_percent)
}

fn event_amount(e: &DividendEvent) -> SortValue {
    SortValue::Number(e.amount_total)
}

fn event_amount_per_share(e: &DividendEvent) -> SortValue {
    SortValue::Number(e.amount_per_share)
}

static EVENT_FIELDS: &[(&str, FieldAccessor<DividendEvent>)] = &[
    ("title", event_title),
    ("name", event_title),
    ("ticker", event_ticker),
    ("date", event_date),
    ("start", event_date),
    ("quantity", event_quantity),
    ("dividendyieldpercent", event_yield),
    ("amount", event_amount),
    ("amounttotal", event_amount),
    ("amountpershare", event_amount_per_share),
];

pub fn event_resolver() -> ResolverChain<DividendEvent> {
    ResolverChain::new().then(FieldTable::new(EVENT_FIELDS))
}

fn payment_date(p: &DividendPayment) -> SortValue {
    SortValue::Date(p.date)
}

fn payment_amount(p: &DividendPayment) -> SortValue {
    SortValue::Number(p.amount_per_share)
}

fn payment_yield(p: &DividendPayment) -> SortValue {
    SortValue::number(p.dividend_yield_percent)
}

fn payment_last_buy_date(p: &DividendPayment) -> SortValue {
    SortValue::date(p.last_buy_date)
}

static PAYMENT_FIELDS: &[(&str, FieldAccessor<DividendPayment>)] = &[
    ("date", payment_date),
    ("amount", payment_amount),
    ("amountpershare", payment_amount),
    ("dividendyieldpercent", payment_yield),
    ("lastbuydate", payment_last_buy_date),
];

pub fn payment_resolver() -> ResolverChain<DividendPayment> {
    ResolverChain::new().then(FieldTable::new(PAYMENT_FIELDS))
}
