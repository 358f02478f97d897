//! Deterministic synthetic price series.
//!
//! A symbol is hashed arithmetically (byte sum and first character code) into
//! a base price, a volatility fraction and a per-step trend. Each step mixes
//! the trend with a pseudo-random change derived from the calendar date, so the
//! same `(symbol, timeframe, anchor date)` always yields the same series.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::Serialize;

use super::error::HedgefundError;
use super::numeric::round2;
use super::timeframe::{Timeframe, ensure_supported_year};

/// Prices never fall below this floor.
pub const MIN_PRICE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Seed material derived from a symbol's character codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolSeed {
    pub byte_sum: u64,
    pub first_char: u32,
    pub first_byte: u8,
}

impl SymbolSeed {
    pub fn from_symbol(symbol: &str) -> Result<Self, HedgefundError> {
        let first = symbol
            .chars()
            .next()
            .ok_or_else(|| HedgefundError::invalid("symbol", "must not be empty"))?;
        Ok(Self {
            byte_sum: symbol.bytes().map(u64::from).sum(),
            first_char: first as u32,
            first_byte: symbol.as_bytes()[0],
        })
    }

    /// 100 + (byte sum mod 400).
    pub fn base_price(&self) -> f64 {
        100.0 + (self.byte_sum % 400) as f64
    }

    /// 0% to 9% depending on the first character.
    pub fn volatility(&self) -> f64 {
        (self.first_char % 10) as f64 / 100.0
    }

    /// -1% to +0.8% per step depending on the first character.
    pub fn trend(&self) -> f64 {
        ((self.first_char % 10) as f64 - 5.0) / 500.0
    }

    fn random_change(&self, at: NaiveDate) -> f64 {
        let day_seed = (at.day() * at.month() + self.first_char) % 100;
        ((day_seed as f64 / 100.0) * 2.0 - 1.0) * self.volatility()
    }
}

fn is_weekend(at: NaiveDateTime) -> bool {
    matches!(at.weekday(), Weekday::Sat | Weekday::Sun)
}

fn next_price(prev: f64, trend: f64, random_change: f64) -> f64 {
    (prev * (1.0 + trend + random_change)).max(MIN_PRICE)
}

/// Generate `timeframe.points()` prices starting at `start`.
pub fn generate_series(seed: &SymbolSeed, timeframe: Timeframe, start: NaiveDate) -> Vec<PricePoint> {
    let interval = timeframe.interval();
    let trend = seed.trend();
    let mut cursor = start.and_time(NaiveTime::MIN);
    let mut price = seed.base_price();
    let mut points = Vec::with_capacity(timeframe.points());

    for _ in 0..timeframe.points() {
        if timeframe.skips_weekends() {
            while is_weekend(cursor) {
                cursor += chrono::Duration::days(1);
            }
        }

        let date = cursor.date();
        price = next_price(price, trend, seed.random_change(date));
        points.push(PricePoint {
            date,
            price: round2(price),
        });

        cursor += interval;
    }

    points
}

/// History for `symbol` over `timeframe`, ending at `end_date`.
pub fn price_history(
    symbol: &str,
    timeframe: Timeframe,
    end_date: NaiveDate,
) -> Result<Vec<PricePoint>, HedgefundError> {
    let seed = SymbolSeed::from_symbol(symbol)?;
    let end_date = ensure_supported_year("end_date", end_date)?;
    let start = end_date
        .checked_sub_signed(timeframe.span())
        .ok_or_else(|| HedgefundError::invalid("end_date", "out of range"))?;
    Ok(generate_series(&seed, timeframe, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn seed_from_symbol() {
        let seed = SymbolSeed::from_symbol("AAPL").unwrap();
        // 65 + 65 + 80 + 76
        assert_eq!(seed.byte_sum, 286);
        assert_eq!(seed.first_char, 65);
        assert_abs_diff_eq!(seed.base_price(), 386.0);
        assert_abs_diff_eq!(seed.volatility(), 0.05);
        assert_abs_diff_eq!(seed.trend(), 0.0);
    }

    #[test]
    fn trend_is_signed() {
        // 'C' = 67 → 7 → +0.4%
        let up = SymbolSeed::from_symbol("C").unwrap();
        assert_abs_diff_eq!(up.trend(), 0.004);
        // 'F' = 70 → 0 → -1%
        let down = SymbolSeed::from_symbol("F").unwrap();
        assert_abs_diff_eq!(down.trend(), -0.01);
        assert_abs_diff_eq!(down.volatility(), 0.0);
    }

    #[test]
    fn anchor_outside_calendar_rejected() {
        let far = NaiveDate::from_ymd_opt(-262_143, 1, 5).unwrap();
        assert!(matches!(
            price_history("AAPL", Timeframe::FiveYears, far),
            Err(HedgefundError::InvalidInput { .. })
        ));
    }

    #[test]
    fn earliest_anchor_still_generates() {
        let first = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        assert_eq!(price_history("AAPL", Timeframe::FiveYears, first).unwrap().len(), 60);
    }

    #[test]
    fn five_year_points_step_thirty_days() {
        let history = price_history("AAPL", Timeframe::FiveYears, date("2024-03-15")).unwrap();
        assert_eq!(history.len(), 60);
        // 365 * 5 days back, no weekend skipping
        assert_eq!(history[0].date, date("2019-03-17"));
        for pair in history.windows(2) {
            assert_eq!((pair[1].date - pair[0].date).num_days(), 30);
        }
    }

    #[test]
    fn empty_symbol_rejected() {
        assert!(matches!(
            SymbolSeed::from_symbol(""),
            Err(HedgefundError::InvalidInput { .. })
        ));
    }

    #[test]
    fn first_point_matches_hand_calculation() {
        // 1M back from Fri 2024-03-15 starts Wed 2024-02-14.
        // day_seed = (14 * 2 + 65) % 100 = 93 → change = 0.86 * 0.05 = 0.043
        let history = price_history("AAPL", Timeframe::OneMonth, date("2024-03-15")).unwrap();
        assert_eq!(history[0].date, date("2024-02-14"));
        assert_abs_diff_eq!(history[0].price, 402.6, epsilon = 1e-9);
    }

    #[test]
    fn identical_inputs_identical_series() {
        let end = date("2024-06-30");
        for tf in Timeframe::ALL {
            let a = price_history("MSFT", tf, end).unwrap();
            let b = price_history("MSFT", tf, end).unwrap();
            assert_eq!(a, b, "timeframe {tf}");
        }
    }

    #[test]
    fn different_symbols_diverge() {
        let end = date("2024-06-30");
        let a = price_history("AAPL", Timeframe::OneMonth, end).unwrap();
        let b = price_history("TSLA", Timeframe::OneMonth, end).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn length_matches_point_count() {
        let end = date("2024-06-30");
        for tf in Timeframe::ALL {
            let history = price_history("GOOGL", tf, end).unwrap();
            assert_eq!(history.len(), tf.points(), "timeframe {tf}");
        }
    }

    #[test]
    fn weekday_timeframes_skip_weekends() {
        let end = date("2024-06-30");
        for tf in [Timeframe::OneWeek, Timeframe::OneMonth, Timeframe::ThreeMonths] {
            for point in price_history("NVDA", tf, end).unwrap() {
                assert!(
                    !matches!(point.date.weekday(), Weekday::Sat | Weekday::Sun),
                    "{tf} produced weekend date {}",
                    point.date
                );
            }
        }
    }

    #[test]
    fn dates_never_go_backwards() {
        let end = date("2024-06-30");
        for tf in Timeframe::ALL {
            let history = price_history("AMZN", tf, end).unwrap();
            assert!(history.windows(2).all(|w| w[0].date <= w[1].date));
        }
    }

    #[test]
    fn one_day_points_share_a_trading_date() {
        // Sun 2024-03-17 anchor starts on Saturday; hourly steps land on Monday.
        let history = price_history("AAPL", Timeframe::OneDay, date("2024-03-17")).unwrap();
        assert_eq!(history.len(), 24);
        assert!(history.iter().all(|p| p.date == date("2024-03-18")));
    }

    #[test]
    fn yearly_timeframe_steps_by_week() {
        let history = price_history("AAPL", Timeframe::OneYear, date("2024-12-31")).unwrap();
        assert_eq!(history[0].date, date("2024-01-01"));
        assert_eq!(history[1].date, date("2024-01-08"));
    }

    #[test]
    fn price_floor_applies() {
        assert_abs_diff_eq!(next_price(2.0, -0.9, -0.5), MIN_PRICE);
        assert_abs_diff_eq!(next_price(100.0, 0.01, 0.0), 101.0, epsilon = 1e-9);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn timeframe() -> impl Strategy<Value = Timeframe> {
            prop::sample::select(Timeframe::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn prices_positive_and_counted(
                symbol in "\\PC{1,8}",
                tf in timeframe(),
                offset in 0i64..20_000,
            ) {
                let end = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(offset);
                let history = price_history(&symbol, tf, end).unwrap();
                prop_assert_eq!(history.len(), tf.points());
                prop_assert!(history.iter().all(|p| p.price > 0.0));
            }

            #[test]
            fn deterministic(symbol in "[A-Z]{1,5}", tf in timeframe()) {
                let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
                prop_assert_eq!(
                    price_history(&symbol, tf, end).unwrap(),
                    price_history(&symbol, tf, end).unwrap()
                );
            }
        }
    }
}
