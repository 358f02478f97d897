//! History timeframes and their sampling parameters.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::error::HedgefundError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeframe {
    OneDay,
    OneWeek,
    OneMonth,
    #[default]
    ThreeMonths,
    OneYear,
    FiveYears,
}

impl Timeframe {
    pub const ALL: [Timeframe; 6] = [
        Timeframe::OneDay,
        Timeframe::OneWeek,
        Timeframe::OneMonth,
        Timeframe::ThreeMonths,
        Timeframe::OneYear,
        Timeframe::FiveYears,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Timeframe::OneDay => "1D",
            Timeframe::OneWeek => "1W",
            Timeframe::OneMonth => "1M",
            Timeframe::ThreeMonths => "3M",
            Timeframe::OneYear => "1Y",
            Timeframe::FiveYears => "5Y",
        }
    }

    /// How far back from the anchor date the series starts.
    pub fn span(&self) -> Duration {
        match self {
            Timeframe::OneDay => Duration::days(1),
            Timeframe::OneWeek => Duration::weeks(1),
            Timeframe::OneMonth => Duration::days(30),
            Timeframe::ThreeMonths => Duration::days(90),
            Timeframe::OneYear => Duration::days(365),
            Timeframe::FiveYears => Duration::days(365 * 5),
        }
    }

    /// Spacing between consecutive points.
    pub fn interval(&self) -> Duration {
        match self {
            Timeframe::OneDay => Duration::hours(1),
            Timeframe::OneWeek | Timeframe::OneMonth | Timeframe::ThreeMonths => Duration::days(1),
            Timeframe::OneYear => Duration::days(7),
            Timeframe::FiveYears => Duration::days(30),
        }
    }

    pub fn points(&self) -> usize {
        match self {
            Timeframe::OneDay => 24,
            Timeframe::OneWeek => 7,
            Timeframe::OneMonth => 30,
            Timeframe::ThreeMonths => 90,
            Timeframe::OneYear => 52,
            Timeframe::FiveYears => 60,
        }
    }

    /// Sub-year timeframes only sample trading days.
    pub fn skips_weekends(&self) -> bool {
        !matches!(self, Timeframe::OneYear | Timeframe::FiveYears)
    }

    pub fn valid_tokens() -> String {
        Self::ALL
            .iter()
            .map(|t| t.token())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Timeframe {
    type Err = HedgefundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.token() == s)
            .ok_or_else(|| HedgefundError::InvalidTimeframe {
                valid: Self::valid_tokens(),
            })
    }
}

/// Calendar years accepted for anchors and simulation windows.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// Reject dates outside [`SUPPORTED_YEARS`]; `field` names the input in the error.
pub fn ensure_supported_year(field: &str, date: NaiveDate) -> Result<NaiveDate, HedgefundError> {
    if SUPPORTED_YEARS.contains(&date.year()) {
        Ok(date)
    } else {
        Err(HedgefundError::invalid(
            field,
            format!("year {} outside 1..=9999", date.year()),
        ))
    }
}
