use tracing::{debug, info};

use super::{metrics, normalize, EnrichedPosition, PortfolioSnapshot, PortfolioTotals};
use crate::diagnostics::Diagnostic;
use crate::dividends::{
    calendar_events, dividends_for_month, dividends_for_year, CalendarMonth, DividendEvent,
    MonthDividends, YearDividends,
};
use crate::models::InstrumentType;
use crate::sort::{event_resolver, position_resolver, sort_items, SortSpec};
use crate::view::{ChangeView, ViewMode, ViewProjection};

/// Derived state of one snapshot and the queries over it.
///
/// The engine never performs I/O and never reads the clock: the reference
/// year is fixed at construction and every query works on state computed by
/// [`PortfolioEngine::replace_snapshot`].
#[derive(Debug, Clone)]
pub struct PortfolioEngine {
    reference_year: i32,
    positions: Vec<EnrichedPosition>,
    events: Vec<DividendEvent>,
    totals: PortfolioTotals,
    diagnostics: Vec<Diagnostic>,
}

impl PortfolioEngine {
    pub fn new(snapshot: &PortfolioSnapshot, reference_year: i32) -> Self {
        let mut engine = Self {
            reference_year,
            positions: Vec::new(),
            events: Vec::new(),
            totals: metrics::portfolio_totals(&[], reference_year),
            diagnostics: Vec::new(),
        };
        engine.replace_snapshot(snapshot);
        engine
    }

    /// Recompute all derived state from `snapshot`, discarding the old one.
    pub fn replace_snapshot(&mut self, snapshot: &PortfolioSnapshot) {
        let normalized = normalize(snapshot, self.reference_year);
        self.events = calendar_events(&normalized.positions);
        self.totals = metrics::portfolio_totals(&normalized.positions, self.reference_year);
        self.positions = normalized.positions;
        self.diagnostics = normalized.diagnostics;

        info!(
            positions = self.positions.len(),
            pending = self.totals.pending_count,
            events = self.events.len(),
            diagnostics = self.diagnostics.len(),
            "snapshot installed"
        );
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Enriched positions in snapshot order.
    pub fn positions(&self) -> &[EnrichedPosition] {
        &self.positions
    }

    pub fn position(&self, ticker: &str) -> Option<&EnrichedPosition> {
        self.positions.iter().find(|p| p.ticker() == ticker)
    }

    /// Every dividend event, oldest first.
    pub fn events(&self) -> &[DividendEvent] {
        &self.events
    }

    /// Malformed records found in the current snapshot.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn portfolio_totals(&self) -> &PortfolioTotals {
        &self.totals
    }

    pub fn sorted_positions(&self, spec: &SortSpec) -> Vec<EnrichedPosition> {
        sort_items(self.positions.clone(), spec, &position_resolver())
    }

    /// Sorted positions limited to the given instrument types.
    ///
    /// An empty filter keeps every position. Totals are unaffected.
    pub fn table_positions(
        &self,
        spec: &SortSpec,
        instrument_types: &[InstrumentType],
    ) -> Vec<EnrichedPosition> {
        let visible: Vec<EnrichedPosition> = self
            .positions
            .iter()
            .filter(|p| {
                instrument_types.is_empty() || instrument_types.contains(&p.position.instrument_type)
            })
            .cloned()
            .collect();
        debug!(
            visible = visible.len(),
            total = self.positions.len(),
            "filtered positions table"
        );
        sort_items(visible, spec, &position_resolver())
    }

    pub fn dividends_for_month(&self, month: CalendarMonth) -> MonthDividends {
        dividends_for_month(&self.events, month)
    }

    /// The month bucket with its events ordered by `spec`.
    pub fn sorted_month_dividends(&self, month: CalendarMonth, spec: &SortSpec) -> MonthDividends {
        let mut bucket = self.dividends_for_month(month);
        bucket.events = sort_items(bucket.events, spec, &event_resolver());
        bucket
    }

    pub fn dividends_for_year(&self, year: i32) -> YearDividends {
        dividends_for_year(&self.positions, year)
    }

    pub fn set_view_mode(&self, view: ViewProjection, mode: ViewMode) -> ViewProjection {
        view.with_mode(mode)
    }

    pub fn set_selected_month(&self, view: ViewProjection, month: CalendarMonth) -> ViewProjection {
        view.with_month(month)
    }

    pub fn change_view(&self, view: &ViewProjection) -> ChangeView {
        view.project(&self.totals)
    }

    /// Events of the month selected in `view`.
    pub fn month_view(&self, view: &ViewProjection) -> MonthDividends {
        view.month_dividends(&self.events)
    }
}
