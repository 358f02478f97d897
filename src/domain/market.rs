//! Canned stock quotes, per-symbol detail and analyst insights.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::error::HedgefundError;
use super::numeric::round2;
use super::series::SymbolSeed;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub market_cap: u64,
    pub volume: u64,
    pub sector: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDetail {
    #[serde(flatten)]
    pub quote: StockQuote,
    pub high52: f64,
    pub low52: f64,
    pub pe: f64,
    pub dividend: f64,
    #[serde(rename = "yield")]
    pub dividend_yield: f64,
    pub beta: f64,
    pub description: String,
}

struct Listing {
    symbol: &'static str,
    name: &'static str,
    price: f64,
    change: f64,
    change_percent: f64,
    market_cap: u64,
    volume: u64,
    sector: &'static str,
}

const LISTINGS: [Listing; 5] = [
    Listing {
        symbol: "AAPL",
        name: "Apple Inc.",
        price: 173.45,
        change: 2.35,
        change_percent: 1.37,
        market_cap: 2_850_000_000_000,
        volume: 62_500_000,
        sector: "Technology",
    },
    Listing {
        symbol: "MSFT",
        name: "Microsoft Corporation",
        price: 328.79,
        change: 1.05,
        change_percent: 0.32,
        market_cap: 2_450_000_000_000,
        volume: 21_800_000,
        sector: "Technology",
    },
    Listing {
        symbol: "GOOGL",
        name: "Alphabet Inc.",
        price: 135.31,
        change: -0.61,
        change_percent: -0.45,
        market_cap: 1_720_000_000_000,
        volume: 23_700_000,
        sector: "Technology",
    },
    Listing {
        symbol: "AMZN",
        name: "Amazon.com, Inc.",
        price: 129.12,
        change: 1.43,
        change_percent: 1.12,
        market_cap: 1_320_000_000_000,
        volume: 35_600_000,
        sector: "Consumer Cyclical",
    },
    Listing {
        symbol: "TSLA",
        name: "Tesla, Inc.",
        price: 248.5,
        change: -5.3,
        change_percent: -2.09,
        market_cap: 780_000_000_000,
        volume: 118_000_000,
        sector: "Automotive",
    },
];

impl Listing {
    fn quote(&self) -> StockQuote {
        StockQuote {
            symbol: self.symbol.to_string(),
            name: self.name.to_string(),
            price: self.price,
            change: self.change,
            change_percent: self.change_percent,
            market_cap: self.market_cap,
            volume: self.volume,
            sector: self.sector.to_string(),
        }
    }
}

/// high52, low52, pe, dividend, yield, beta, description
type Fundamentals = (f64, f64, f64, f64, f64, f64, &'static str);

fn fundamentals(symbol: &str) -> Option<Fundamentals> {
    match symbol {
        "AAPL" => Some((
            180.45,
            124.17,
            28.7,
            0.92,
            0.53,
            1.28,
            "Apple Inc. designs, manufactures, and markets smartphones, personal computers, tablets, wearables, and accessories worldwide. The company offers iPhone, Mac, iPad, and wearables, home, and accessories.",
        )),
        "MSFT" => Some((
            335.94,
            213.43,
            35.2,
            2.48,
            0.75,
            0.93,
            "Microsoft Corporation develops, licenses, and supports software, services, devices, and solutions worldwide. The company operates in three segments: Productivity and Business Processes, Intelligent Cloud, and More Personal Computing.",
        )),
        "GOOGL" => Some((
            143.71,
            83.34,
            26.1,
            0.0,
            0.0,
            1.06,
            "Alphabet Inc. offers various products and platforms in the United States, Europe, the Middle East, Africa, the Asia-Pacific, Canada, and Latin America. It operates through Google Services, Google Cloud, and Other Bets segments.",
        )),
        _ => None,
    }
}

pub fn list_stocks() -> Vec<StockQuote> {
    LISTINGS.iter().map(Listing::quote).collect()
}

/// Detail for a symbol: canned for a few large caps, derived from the
/// symbol's first byte for everything else.
pub fn stock_detail(symbol: &str) -> Result<StockDetail, HedgefundError> {
    let known = LISTINGS.iter().find(|l| l.symbol == symbol);
    if let (Some(listing), Some(f)) = (known, fundamentals(symbol)) {
        let (high52, low52, pe, dividend, dividend_yield, beta, description) = f;
        return Ok(StockDetail {
            quote: listing.quote(),
            high52,
            low52,
            pe,
            dividend,
            dividend_yield,
            beta,
            description: description.to_string(),
        });
    }

    let seed = SymbolSeed::from_symbol(symbol)?;
    let b = seed.first_byte as f64;
    let scaled = b / 255.0;
    let change = (seed.first_byte % 10) as f64 - 5.0;

    Ok(StockDetail {
        quote: StockQuote {
            symbol: symbol.to_string(),
            name: format!("{symbol} Corporation"),
            price: round2(100.0 + scaled * 400.0),
            change: round2(change),
            change_percent: round2(change / 100.0),
            market_cap: 1_000_000_000 + u64::from(seed.first_byte) * 10_000_000_000,
            volume: 1_000_000 + u64::from(seed.first_byte) * 100_000,
            sector: "Technology".to_string(),
        },
        high52: round2(120.0 + scaled * 400.0),
        low52: round2(80.0 + scaled * 100.0),
        pe: round2(10.0 + scaled * 30.0),
        dividend: round2((seed.first_byte % 5) as f64 / 10.0),
        dividend_yield: round2((seed.first_byte % 5) as f64 / 100.0),
        beta: round2(0.8 + scaled),
        description: format!(
            "{symbol} Corporation is a leading company in the technology sector, focusing on innovation and sustainable growth."
        ),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestingStyle {
    Value,
    Technical,
    Growth,
    Fundamentals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rating {
    Buy,
    Hold,
    Sell,
}

struct Desk {
    name: &'static str,
    style: InvestingStyle,
}

const DESKS: [Desk; 4] = [
    Desk {
        name: "AI Warren Buffett",
        style: InvestingStyle::Value,
    },
    Desk {
        name: "AI Technical Analyst",
        style: InvestingStyle::Technical,
    },
    Desk {
        name: "AI Cathie Wood",
        style: InvestingStyle::Growth,
    },
    Desk {
        name: "AI Fundamentals Analyst",
        style: InvestingStyle::Fundamentals,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub analyst: String,
    pub ticker: String,
    pub rating: Rating,
    pub target_price: Option<f64>,
    pub summary: String,
    pub date: NaiveDate,
}

impl InvestingStyle {
    /// (buy above, hold above) thresholds on a 0..100 seed.
    fn thresholds(&self) -> (u64, u64) {
        match self {
            InvestingStyle::Value => (60, 30),
            InvestingStyle::Growth => (40, 10),
            InvestingStyle::Technical | InvestingStyle::Fundamentals => (50, 30),
        }
    }

    pub fn rate(&self, seed: u64) -> Rating {
        let (buy, hold) = self.thresholds();
        if seed > buy {
            Rating::Buy
        } else if seed > hold {
            Rating::Hold
        } else {
            Rating::Sell
        }
    }

    fn summary(&self, rating: Rating, symbol: &str) -> String {
        match (self, rating) {
            (InvestingStyle::Value, Rating::Buy) => format!("{symbol} represents excellent value at current prices. Strong balance sheet and cash flow generation with a durable competitive advantage."),
            (InvestingStyle::Value, Rating::Hold) => format!("{symbol} is currently trading near fair value. The company has solid fundamentals but limited margin of safety at current prices."),
            (InvestingStyle::Value, Rating::Sell) => format!("{symbol} appears overvalued at current prices. Concerns about increasing competition and declining margins."),
            (InvestingStyle::Growth, Rating::Buy) => format!("{symbol} is positioned for exponential growth in its sector. Their R&D investments and innovative approach will drive significant revenue expansion."),
            (InvestingStyle::Growth, Rating::Hold) => format!("{symbol} has decent growth prospects but faces increasing competition. Wait for a better entry point or more clarity on new product adoption."),
            (InvestingStyle::Growth, Rating::Sell) => format!("{symbol} is facing significant headwinds in its growth trajectory. Recent product launches have underperformed expectations."),
            (InvestingStyle::Technical, Rating::Buy) => format!("{symbol} has broken through key resistance levels with increasing volume. Technical indicators suggest continued upward momentum."),
            (InvestingStyle::Technical, Rating::Hold) => format!("{symbol} is in a consolidation phase. Wait for confirmation of the next trend direction before taking a position."),
            (InvestingStyle::Technical, Rating::Sell) => format!("{symbol} has broken below key support levels with bearish indicators. Moving averages suggest continued downward pressure."),
            (InvestingStyle::Fundamentals, Rating::Buy) => format!("{symbol} reported strong earnings with positive guidance. Key metrics including ROE and profit margins are trending positively."),
            (InvestingStyle::Fundamentals, Rating::Hold) => format!("{symbol} shows mixed fundamental signals. While revenue is growing, margin compression is a concern for future profitability."),
            (InvestingStyle::Fundamentals, Rating::Sell) => format!("{symbol} has deteriorating fundamentals with concerning trends in key performance indicators. Recent quarterly results missed expectations."),
        }
    }
}

/// One insight per analyst desk, dated back one day per desk from `today`.
pub fn stock_insights(symbol: &str, today: NaiveDate) -> Result<Vec<Insight>, HedgefundError> {
    let seed = SymbolSeed::from_symbol(symbol)?;
    let current_price = seed.base_price();

    Ok(DESKS
        .iter()
        .enumerate()
        .map(|(i, desk)| {
            let desk_seed = (seed.byte_sum + i as u64) % 100;
            let rating = desk.style.rate(desk_seed);
            let target_price = (rating == Rating::Buy)
                .then(|| round2(current_price * (1.1 + (desk_seed % 20) as f64 / 100.0)));
            Insight {
                analyst: desk.name.to_string(),
                ticker: symbol.to_string(),
                rating,
                target_price,
                summary: desk.style.summary(rating, symbol),
                date: today - Duration::days(i as i64),
            }
        })
        .collect())
}
