//! Mock hedge-fund simulation run.
//!
//! Produces trade decisions, analyst signals, a portfolio value path and
//! summary performance for a ticker list over a date window. Everything is
//! arithmetic on the day offset; there is no market data and no model.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::analyst::{analyst_by_name, resolve_selection};
use super::error::HedgefundError;
use super::model::load_model;
use super::numeric::{finite_or_zero, round2};
use super::portfolio::ValuePoint;
use super::timeframe::ensure_supported_year;

const DECISION_EVERY_DAYS: usize = 3;
const SIGNAL_EVERY_DAYS: usize = 7;
const DAYS_PER_YEAR: f64 = 365.0;
const MIN_YEARS: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
    pub initial_cash: f64,
    #[serde(default)]
    pub margin_requirement: f64,
    pub model: String,
    #[serde(default)]
    pub show_reasoning: bool,
    pub analyst: String,
}

/// Parsed and checked form of a [`SimulationConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationPlan {
    pub tickers: Vec<String>,
    pub analysts: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub initial_cash: f64,
}

impl SimulationPlan {
    /// Calendar days in the window; zero when `end` precedes `start`.
    pub fn days(&self) -> usize {
        (self.end - self.start).num_days().max(0) as usize
    }

    fn trading_day(&self, offset: usize) -> Option<NaiveDate> {
        let date = self.start + Duration::days(offset as i64);
        (!matches!(date.weekday(), Weekday::Sat | Weekday::Sun)).then_some(date)
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, HedgefundError> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| HedgefundError::invalid(field, format!("expected YYYY-MM-DD, got {value:?}")))?;
    ensure_supported_year(field, date)
}

impl SimulationConfig {
    pub fn plan(&self) -> Result<SimulationPlan, HedgefundError> {
        let start = parse_date("startDate", &self.start_date)?;
        let end = parse_date("endDate", &self.end_date)?;

        if !(self.initial_cash.is_finite() && self.initial_cash > 0.0) {
            return Err(HedgefundError::invalid("initialCash", "must be a positive amount"));
        }

        let tickers: Vec<String> = self
            .ticker
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if tickers.is_empty() {
            return Err(HedgefundError::invalid("ticker", "no tickers specified"));
        }

        let analysts = resolve_selection(&self.analyst);
        if analysts.is_empty() {
            return Err(HedgefundError::invalid("analyst", "no analysts specified"));
        }

        Ok(SimulationPlan {
            tickers,
            analysts,
            start,
            end,
            initial_cash: self.initial_cash,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
}

const SIGNAL_CYCLE: [Signal; 3] = [Signal::Bullish, Signal::Bearish, Signal::Neutral];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeDecision {
    pub date: NaiveDate,
    pub ticker: String,
    pub action: TradeAction,
    pub shares: u64,
    pub price: f64,
    pub total: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalystSignal {
    pub date: NaiveDate,
    pub ticker: String,
    pub analyst: String,
    pub signal: Signal,
    pub confidence: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub total_return: f64,
    pub annualized_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub trade_decisions: Vec<TradeDecision>,
    pub analyst_signals: Vec<AnalystSignal>,
    pub portfolio_history: Vec<ValuePoint>,
    pub performance: Performance,
}

/// One decision per ticker every third trading day. Price ramps linearly
/// from 50 to 500 across the window.
pub fn trade_decisions(plan: &SimulationPlan) -> Vec<TradeDecision> {
    let days = plan.days();
    let mut decisions = Vec::new();

    for i in (0..days).step_by(DECISION_EVERY_DAYS) {
        let Some(date) = plan.trading_day(i) else {
            continue;
        };
        let price = 50.0 + 450.0 * i as f64 / days as f64;
        let (action, budget) = if i % 5 < 3 {
            (TradeAction::Buy, 1000.0)
        } else {
            (TradeAction::Sell, 500.0)
        };
        let shares = (budget / price).floor() as u64;
        if shares == 0 {
            continue;
        }
        let verb = match action {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        };

        for ticker in &plan.tickers {
            decisions.push(TradeDecision {
                date,
                ticker: ticker.clone(),
                action,
                shares,
                price: round2(price),
                total: round2(shares as f64 * price),
                reasoning: format!("Mock {verb} decision for testing"),
            });
        }
    }

    decisions
}

/// One signal per ticker every seventh trading day, rotating through the
/// selected analysts and the bullish/bearish/neutral cycle.
pub fn analyst_signals(plan: &SimulationPlan) -> Vec<AnalystSignal> {
    let days = plan.days();
    let mut signals = Vec::new();

    for i in (0..days).step_by(SIGNAL_EVERY_DAYS) {
        let Some(date) = plan.trading_day(i) else {
            continue;
        };
        let analyst = &plan.analysts[i % plan.analysts.len()];
        let signal = SIGNAL_CYCLE[i % SIGNAL_CYCLE.len()];
        let confidence = round2(0.5 + (i as f64 / days as f64) * 0.5);
        let mood = match signal {
            Signal::Bullish => "bullish",
            Signal::Bearish => "bearish",
            Signal::Neutral => "neutral",
        };

        for ticker in &plan.tickers {
            signals.push(AnalystSignal {
                date,
                ticker: ticker.clone(),
                analyst: analyst.clone(),
                signal,
                confidence,
                reasoning: format!("Mock {mood} signal from {analyst} for testing"),
            });
        }
    }

    signals
}

/// Daily value path: starts 1% down per day and drifts to 1% up by the end.
pub fn portfolio_history(plan: &SimulationPlan) -> Vec<ValuePoint> {
    let days = plan.days();
    let mut value = plan.initial_cash;

    (0..days)
        .filter_map(|i| {
            let date = plan.trading_day(i)?;
            let change = 0.02 * (i as f64 / days as f64) - 0.01;
            value *= 1.0 + change;
            Some(ValuePoint {
                date,
                value: round2(value),
            })
        })
        .collect()
}

fn max_drawdown_pct(history: &[ValuePoint], initial_value: f64) -> f64 {
    let mut peak = initial_value;
    let mut max_dd = 0.0_f64;

    for point in history {
        if point.value > peak {
            peak = point.value;
        } else if peak > 0.0 {
            let dd = (peak - point.value) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

impl Performance {
    /// Percent-based summary of a value path. Ratios other than return and
    /// drawdown are derived from those two rather than from trades.
    pub fn compute(history: &[ValuePoint], initial_value: f64) -> Self {
        let (Some(first), Some(last)) = (history.first(), history.last()) else {
            return Self::default();
        };

        let final_value = last.value;
        let total_return = (final_value - initial_value) / initial_value * 100.0;

        let years = ((last.date - first.date).num_days() as f64 / DAYS_PER_YEAR).max(MIN_YEARS);
        let annualized_return = finite_or_zero(((final_value / initial_value).powf(1.0 / years) - 1.0) * 100.0);

        let max_drawdown = max_drawdown_pct(history, initial_value);

        Self {
            total_return: round2(total_return),
            annualized_return: round2(annualized_return),
            max_drawdown: round2(max_drawdown),
            sharpe_ratio: round2(finite_or_zero(annualized_return / (max_drawdown + 1.0))),
            win_rate: round2(60.0 + total_return / 10.0),
            profit_factor: round2(1.5 + total_return / 100.0),
            avg_win: round2(initial_value * 0.05),
            avg_loss: round2(initial_value * 0.03),
        }
    }
}

/// Run a mock simulation. The model and analysts are resolved through the
/// placeholder registries so unknown names surface in the logs.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationResult, HedgefundError> {
    let plan = config.plan()?;

    let model = load_model(&config.model);
    for name in &plan.analysts {
        let analyst = analyst_by_name(name);
        if !analyst.known {
            tracing::warn!(analyst = %analyst.name, "unknown analyst, using generic strategy");
        }
    }

    tracing::info!(
        tickers = ?plan.tickers,
        start = %plan.start,
        end = %plan.end,
        model = %model.name,
        "running mock simulation"
    );

    let portfolio_history = portfolio_history(&plan);
    let performance = Performance::compute(&portfolio_history, plan.initial_cash);

    Ok(SimulationResult {
        trade_decisions: trade_decisions(&plan),
        analyst_signals: analyst_signals(&plan),
        portfolio_history,
        performance,
    })
}
