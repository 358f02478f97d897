//! Persisted records: saved simulations and custom agents.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::simulation::SimulationConfig;

/// A record stored in a flat collection, addressed by an opaque string ID.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Human-readable kind, used in not-found messages.
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// Fresh opaque record ID. Never reused, unlike positional counters.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSimulationRequest {
    pub name: String,
    pub description: String,
    pub config: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ticker: String,
    pub date_created: NaiveDateTime,
    pub config: SimulationConfig,
}

impl SimulationRecord {
    pub fn new(id: String, request: SaveSimulationRequest, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: request.name,
            description: request.description,
            ticker: request.config.ticker.clone(),
            date_created: now,
            config: request.config,
        }
    }

    /// Replace the editable fields; ID and creation time are kept.
    pub fn apply(&mut self, request: SaveSimulationRequest) {
        self.name = request.name;
        self.description = request.description;
        self.ticker = request.config.ticker.clone();
        self.config = request.config;
    }
}

impl Record for SimulationRecord {
    const KIND: &'static str = "Simulation";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAgentRequest {
    pub name: String,
    pub description: String,
    pub strategy: String,
    pub risk_tolerance: String,
    pub time_horizon: String,
    pub objectives: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub strategy: String,
    pub risk_tolerance: String,
    pub time_horizon: String,
    pub objectives: String,
    pub date_created: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<NaiveDateTime>,
}

impl AgentRecord {
    pub fn new(id: String, request: CustomAgentRequest, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: request.name,
            description: request.description,
            strategy: request.strategy,
            risk_tolerance: request.risk_tolerance,
            time_horizon: request.time_horizon,
            objectives: request.objectives,
            date_created: now,
            date_updated: None,
        }
    }

    pub fn apply(&mut self, request: CustomAgentRequest, now: NaiveDateTime) {
        self.name = request.name;
        self.description = request.description;
        self.strategy = request.strategy;
        self.risk_tolerance = request.risk_tolerance;
        self.time_horizon = request.time_horizon;
        self.objectives = request.objectives;
        self.date_updated = Some(now);
    }
}

impl Record for AgentRecord {
    const KIND: &'static str = "Agent";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sim_request(ticker: &str) -> SaveSimulationRequest {
        SaveSimulationRequest {
            name: "Apple H1 2023".into(),
            description: "Simulation of AAPL for first half of 2023".into(),
            config: SimulationConfig {
                ticker: ticker.into(),
                start_date: "2023-01-01".into(),
                end_date: "2023-06-30".into(),
                initial_cash: 10_000.0,
                margin_requirement: 0.0,
                model: "default".into(),
                show_reasoning: true,
                analyst: "warren_buffett".into(),
            },
        }
    }

    fn agent_request(name: &str) -> CustomAgentRequest {
        CustomAgentRequest {
            name: name.into(),
            description: "A conservative value investor".into(),
            strategy: "Value investing with focus on dividends".into(),
            risk_tolerance: "low".into(),
            time_horizon: "long-term".into(),
            objectives: "Income generation with capital preservation".into(),
        }
    }

    #[test]
    fn record_ids_are_unique() {
        assert_ne!(new_record_id(), new_record_id());
    }

    #[test]
    fn simulation_copies_ticker_from_config() {
        let rec = SimulationRecord::new("x".into(), sim_request("AAPL,MSFT"), at(9));
        assert_eq!(rec.ticker, "AAPL,MSFT");
        assert_eq!(rec.id(), "x");
    }

    #[test]
    fn simulation_update_keeps_id_and_creation_time() {
        let mut rec = SimulationRecord::new("x".into(), sim_request("AAPL"), at(9));
        rec.apply(sim_request("TSLA"));
        assert_eq!(rec.id, "x");
        assert_eq!(rec.date_created, at(9));
        assert_eq!(rec.ticker, "TSLA");
        assert_eq!(rec.config.ticker, "TSLA");
    }

    #[test]
    fn simulation_config_nested_in_camel_case() {
        let rec = SimulationRecord::new("x".into(), sim_request("AAPL"), at(9));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["config"]["initialCash"], 10_000.0);
        assert_eq!(json["date_created"], "2024-03-01T09:00:00");
    }

    #[test]
    fn agent_update_stamps_date_updated() {
        let mut rec = AgentRecord::new("a".into(), agent_request("Old"), at(9));
        assert!(rec.date_updated.is_none());
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("date_updated").is_none());

        rec.apply(agent_request("New"), at(10));
        assert_eq!(rec.name, "New");
        assert_eq!(rec.date_created, at(9));
        assert_eq!(rec.date_updated, Some(at(10)));
    }

    #[test]
    fn legacy_agent_without_date_updated_parses() {
        let json = r#"{
            "id": "1",
            "name": "My Custom Agent",
            "description": "d",
            "strategy": "s",
            "risk_tolerance": "low",
            "time_horizon": "long-term",
            "objectives": "o",
            "date_created": "2024-03-01T09:00:00.123456"
        }"#;
        let rec: AgentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, "1");
        assert!(rec.date_updated.is_none());
    }
}
