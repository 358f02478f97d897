//! Placeholder analyst registry.
//!
//! No analysis agent exists yet; each name maps to a canned strategy string.

use serde::Serialize;

/// Analysts used when a simulation asks for `all`.
pub const DEFAULT_ANALYSTS: [&str; 3] = ["warren_buffett", "technical_analyst", "fundamentals_analyst"];

const STRATEGIES: [(&str, &str); 7] = [
    ("warren_buffett", "Value investing with focus on competitive advantage"),
    ("technical_analyst", "Technical analysis with momentum indicators"),
    ("fundamentals_analyst", "Fundamental analysis of financial statements"),
    ("peter_lynch", "Growth at a reasonable price (GARP)"),
    ("charlie_munger", "Concentrated value investing"),
    ("cathie_wood", "Disruptive innovation investing"),
    ("all", "Ensemble of all strategies"),
];

const GENERIC_STRATEGY: &str = "Generic trading strategy";

const ANALYST_KIND: &str = "dummy_analyst";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analyst {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub strategy: String,
    /// False when `name` is not in the registry and the generic strategy was used.
    #[serde(skip)]
    pub known: bool,
}

fn registered_strategy(name: &str) -> Option<&'static str> {
    STRATEGIES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, strategy)| *strategy)
}

pub fn analyst_by_name(name: &str) -> Analyst {
    let registered = registered_strategy(name);
    Analyst {
        name: name.to_string(),
        kind: ANALYST_KIND.to_string(),
        strategy: registered.unwrap_or(GENERIC_STRATEGY).to_string(),
        known: registered.is_some(),
    }
}

/// Expand a comma-separated analyst selection; `all` means the default trio.
pub fn resolve_selection(selection: &str) -> Vec<String> {
    if selection == "all" {
        return DEFAULT_ANALYSTS.iter().map(|s| s.to_string()).collect();
    }
    selection
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
