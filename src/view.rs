//! UI selection state and the figures it surfaces.
//!
//! [`ViewProjection`] is a plain value: every change returns a new
//! projection, and surfacing a figure only picks among numbers that were
//! already computed.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dividends::{dividends_for_month, CalendarMonth, DividendEvent, MonthDividends};
use crate::portfolio::{EnrichedPosition, PortfolioTotals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Change since the previous close.
    #[default]
    Today,
    /// Change since purchase.
    AllTime,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::AllTime => "allTime",
        }
    }

    /// Russian caption used by the summary card.
    pub fn caption_ru(&self) -> &'static str {
        match self {
            Self::Today => "За сегодня",
            Self::AllTime => "За все время",
        }
    }
}

impl FromStr for ViewMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "today" | "daily" => Ok(Self::Today),
            "alltime" | "all" => Ok(Self::AllTime),
            _ => anyhow::bail!("Invalid view mode: {value}. Use: today, all-time"),
        }
    }
}

/// A change figure as surfaced for the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeView {
    pub mode: ViewMode,
    pub change: Decimal,
    pub change_percent: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewProjection {
    pub mode: ViewMode,
    pub selected_month: CalendarMonth,
}

impl ViewProjection {
    pub fn new(mode: ViewMode, selected_month: CalendarMonth) -> Self {
        Self {
            mode,
            selected_month,
        }
    }

    pub fn with_mode(self, mode: ViewMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_month(self, selected_month: CalendarMonth) -> Self {
        Self {
            selected_month,
            ..self
        }
    }

    pub fn advance_month(self) -> Self {
        self.with_month(self.selected_month.advance())
    }

    pub fn retreat_month(self) -> Self {
        self.with_month(self.selected_month.retreat())
    }

    /// Portfolio-wide change for the active mode.
    pub fn project(&self, totals: &PortfolioTotals) -> ChangeView {
        match self.mode {
            ViewMode::Today => ChangeView {
                mode: self.mode,
                change: totals.daily_change,
                change_percent: totals.daily_change_percent,
            },
            ViewMode::AllTime => ChangeView {
                mode: self.mode,
                change: totals.change,
                change_percent: totals.change_percent,
            },
        }
    }

    /// Change of one position for the active mode; `None` while pending.
    pub fn position_change(&self, position: &EnrichedPosition) -> Option<ChangeView> {
        let detail = position.detail.as_ref()?;
        Some(match self.mode {
            ViewMode::Today => ChangeView {
                mode: self.mode,
                change: detail.daily_change,
                change_percent: detail.effective_daily_change_percent(),
            },
            ViewMode::AllTime => ChangeView {
                mode: self.mode,
                change: detail.change,
                change_percent: detail.effective_change_percent(),
            },
        })
    }

    /// The calendar bucket of the selected month.
    pub fn month_dividends(&self, events: &[DividendEvent]) -> MonthDividends {
        dividends_for_month(events, self.selected_month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn totals() -> PortfolioTotals {
        PortfolioTotals {
            total_value: d("1000"),
            change: d("100"),
            change_percent: d("10"),
            daily_change: d("-5"),
            daily_change_percent: d("-0.5"),
            dividends_year: 2024,
            total_dividends: d("0"),
            position_count: 1,
            pending_count: 0,
        }
    }

    #[test]
    fn mode_picks_precomputed_figures() {
        let view = ViewProjection::new(ViewMode::Today, CalendarMonth::JANUARY);
        let today = view.project(&totals());
        assert_eq!(today.change, d("-5"));
        assert_eq!(today.change_percent, d("-0.5"));

        let all_time = view.with_mode(ViewMode::AllTime).project(&totals());
        assert_eq!(all_time.change, d("100"));
        assert_eq!(all_time.change_percent, d("10"));
    }

    #[test]
    fn month_navigation_returns_new_values() {
        let view = ViewProjection::new(ViewMode::Today, CalendarMonth::DECEMBER);
        let next = view.advance_month();
        assert_eq!(next.selected_month, CalendarMonth::JANUARY);
        assert_eq!(view.selected_month, CalendarMonth::DECEMBER);
        assert_eq!(next.retreat_month(), view);
    }

    #[test]
    fn view_mode_parses_cli_spellings() {
        assert_eq!("all-time".parse::<ViewMode>().unwrap(), ViewMode::AllTime);
        assert_eq!("allTime".parse::<ViewMode>().unwrap(), ViewMode::AllTime);
        assert_eq!("today".parse::<ViewMode>().unwrap(), ViewMode::Today);
        assert!("yesterday".parse::<ViewMode>().is_err());
    }
}
