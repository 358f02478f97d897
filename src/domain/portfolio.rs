//! Demo portfolio: canned holdings and transactions plus a synthetic
//! 90-day value history.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use super::numeric::round2;

pub const HISTORY_DAYS: i64 = 90;
pub const CASH_BALANCE: f64 = 15_000.0;
/// History values never fall below this floor.
pub const HISTORY_FLOOR: f64 = 1_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuePoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub shares: u32,
    pub average_cost: f64,
    pub current_price: f64,
    pub value: f64,
    pub day_change: f64,
    pub total_gain: f64,
    pub total_gain_percent: f64,
}

impl Holding {
    fn new(symbol: &str, name: &str, shares: u32, average_cost: f64, current_price: f64, day_move: f64) -> Self {
        let qty = shares as f64;
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            shares,
            average_cost,
            current_price,
            value: round2(current_price * qty),
            day_change: day_move * qty,
            total_gain: (current_price - average_cost) * qty,
            total_gain_percent: (current_price - average_cost) / average_cost * 100.0,
        }
    }

    pub fn cost_basis(&self) -> f64 {
        self.average_cost * self.shares as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub symbol: String,
    pub action: String,
    pub shares: u32,
    pub price: f64,
    pub total: f64,
    pub agent: String,
}

impl Transaction {
    fn buy(id: &str, date: (i32, u32, u32), symbol: &str, shares: u32, price: f64, agent: &str) -> Self {
        Self {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
            symbol: symbol.to_string(),
            action: "BUY".to_string(),
            shares,
            price,
            total: shares as f64 * price,
            agent: agent.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub total_value: f64,
    pub cash_balance: f64,
    pub total_gain: f64,
    pub total_gain_percent: f64,
    pub buying_power: f64,
    pub holdings: Vec<Holding>,
    pub transactions: Vec<Transaction>,
    pub portfolio_history: Vec<ValuePoint>,
}

pub fn holdings() -> Vec<Holding> {
    vec![
        Holding::new("AAPL", "Apple Inc.", 25, 155.35, 173.45, 2.35),
        Holding::new("MSFT", "Microsoft Corporation", 15, 290.12, 328.79, 1.05),
        Holding::new("NVDA", "NVIDIA Corporation", 10, 350.25, 437.53, 12.33),
    ]
}

pub fn transactions() -> Vec<Transaction> {
    vec![
        Transaction::buy("1", (2023, 4, 1), "AAPL", 15, 165.21, "Warren Buffett"),
        Transaction::buy("2", (2023, 4, 5), "AAPL", 10, 145.50, "Technical Analyst"),
        Transaction::buy("3", (2023, 4, 10), "MSFT", 15, 290.12, "Warren Buffett"),
        Transaction::buy("4", (2023, 4, 15), "NVDA", 10, 350.25, "Cathie Wood"),
    ]
}

/// Walk back from `today` over trading days, shaving a shrinking fraction off
/// the value each day, then return the points oldest first.
pub fn value_history(current_value: f64, today: NaiveDate) -> Vec<ValuePoint> {
    let mut value = current_value;
    let mut history: Vec<ValuePoint> = (0..HISTORY_DAYS)
        .filter_map(|i| {
            let date = today - Duration::days(i);
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                return None;
            }
            let fraction = 0.01 - 0.005 * (i as f64 / HISTORY_DAYS as f64);
            value = (value - fraction * value).max(HISTORY_FLOOR);
            Some(ValuePoint {
                date,
                value: round2(value),
            })
        })
        .collect();
    history.reverse();
    history
}

pub fn snapshot(today: NaiveDate) -> PortfolioSnapshot {
    let holdings = holdings();
    let total_value: f64 = holdings.iter().map(|h| h.value).sum();
    let total_cost: f64 = holdings.iter().map(Holding::cost_basis).sum();
    let total_gain = total_value - total_cost;

    PortfolioSnapshot {
        total_value,
        cash_balance: CASH_BALANCE,
        total_gain,
        total_gain_percent: total_gain / total_cost * 100.0,
        buying_power: CASH_BALANCE,
        portfolio_history: value_history(total_value, today),
        holdings,
        transactions: transactions(),
    }
}
