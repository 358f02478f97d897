#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::NaiveDate;
use hedgefund::adapters::web::{AppState, build_test_router};
use hedgefund::domain::error::HedgefundError;
use hedgefund::domain::records::{AgentRecord, Record, SimulationRecord};
use hedgefund::ports::record_port::RecordPort;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// In-memory record collection with an optional forced storage failure.
pub struct MockRecordStore<R> {
    pub records: Mutex<Vec<R>>,
    pub failure: Option<String>,
}

impl<R: Record> MockRecordStore<R> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    pub fn with_records(self, records: Vec<R>) -> Self {
        *self.records.lock().unwrap() = records;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }

    fn check(&self) -> Result<(), HedgefundError> {
        match &self.failure {
            Some(reason) => Err(HedgefundError::Storage {
                path: "mock".into(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl<R: Record> RecordPort<R> for MockRecordStore<R> {
    fn list(&self) -> Result<Vec<R>, HedgefundError> {
        self.check()?;
        Ok(self.records.lock().unwrap().clone())
    }

    fn get(&self, id: &str) -> Result<R, HedgefundError> {
        self.check()?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| HedgefundError::not_found(R::KIND, id))
    }

    fn create(&self, record: R) -> Result<R, HedgefundError> {
        self.check()?;
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    fn update(&self, id: &str, edit: &mut dyn FnMut(&mut R)) -> Result<R, HedgefundError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| HedgefundError::not_found(R::KIND, id))?;
        edit(record);
        Ok(record.clone())
    }

    fn delete(&self, id: &str) -> Result<(), HedgefundError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(HedgefundError::not_found(R::KIND, id));
        }
        Ok(())
    }
}

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

pub fn app_with(
    simulations: MockRecordStore<SimulationRecord>,
    agents: MockRecordStore<AgentRecord>,
) -> Router {
    build_test_router(AppState {
        simulations: Arc::new(simulations),
        agents: Arc::new(agents),
        today: fixed_today,
    })
}

pub fn test_app() -> Router {
    app_with(MockRecordStore::new(), MockRecordStore::new())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn simulation_config(ticker: &str, analyst: &str) -> Value {
    serde_json::json!({
        "ticker": ticker,
        "startDate": "2024-01-01",
        "endDate": "2024-01-11",
        "initialCash": 10000.0,
        "marginRequirement": 0.0,
        "model": "default",
        "showReasoning": false,
        "analyst": analyst,
    })
}

pub fn agent_request(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "description": "A conservative value investor",
        "strategy": "Value investing with focus on dividends",
        "risk_tolerance": "low",
        "time_horizon": "long-term",
        "objectives": "Income generation with capital preservation",
    })
}
