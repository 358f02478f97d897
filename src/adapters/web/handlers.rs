//! HTTP request handlers for web adapter.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::domain::market::{self, Insight, StockDetail, StockQuote};
use crate::domain::portfolio::{self, PortfolioSnapshot};
use crate::domain::records::{
    AgentRecord, CustomAgentRequest, Record, SaveSimulationRequest, SimulationRecord,
    new_record_id,
};
use crate::domain::series::{self, PricePoint};
use crate::domain::simulation::{self, SimulationConfig, SimulationResult};
use crate::domain::timeframe::Timeframe;

use super::{AppState, WebError};

type Shared = State<Arc<AppState>>;

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn deleted<R: Record>(id: &str) -> Json<Value> {
    Json(json!({ "message": format!("{} with ID {id} deleted successfully", R::KIND) }))
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "AI Hedge Fund API is running" }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn not_found() -> WebError {
    WebError::not_found("Not Found")
}

pub async fn run_simulation(
    payload: Result<Json<SimulationConfig>, JsonRejection>,
) -> Result<Json<SimulationResult>, WebError> {
    let Json(config) = payload?;
    tracing::debug!(ticker = %config.ticker, analyst = %config.analyst, "running simulation");
    Ok(Json(simulation::run_simulation(&config)?))
}

// ── Saved simulations ──

pub async fn list_simulations(
    State(state): Shared,
) -> Result<Json<Vec<SimulationRecord>>, WebError> {
    Ok(Json(state.simulations.list()?))
}

pub async fn get_simulation(
    State(state): Shared,
    Path(id): Path<String>,
) -> Result<Json<SimulationRecord>, WebError> {
    Ok(Json(state.simulations.get(&id)?))
}

pub async fn create_simulation(
    State(state): Shared,
    payload: Result<Json<SaveSimulationRequest>, JsonRejection>,
) -> Result<Json<SimulationRecord>, WebError> {
    let Json(request) = payload?;
    let record = SimulationRecord::new(new_record_id(), request, now());
    tracing::debug!(id = %record.id, name = %record.name, "saving simulation");
    Ok(Json(state.simulations.create(record)?))
}

pub async fn update_simulation(
    State(state): Shared,
    Path(id): Path<String>,
    payload: Result<Json<SaveSimulationRequest>, JsonRejection>,
) -> Result<Json<SimulationRecord>, WebError> {
    let Json(request) = payload?;
    let mut request = Some(request);
    let updated = state.simulations.update(&id, &mut |record| {
        if let Some(req) = request.take() {
            record.apply(req);
        }
    })?;
    Ok(Json(updated))
}

pub async fn delete_simulation(
    State(state): Shared,
    Path(id): Path<String>,
) -> Result<Json<Value>, WebError> {
    state.simulations.delete(&id)?;
    Ok(deleted::<SimulationRecord>(&id))
}

// ── Market data ──

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub timeframe: Option<String>,
}

pub async fn list_stocks() -> Json<Vec<StockQuote>> {
    Json(market::list_stocks())
}

pub async fn stock_detail(Path(symbol): Path<String>) -> Result<Json<StockDetail>, WebError> {
    Ok(Json(market::stock_detail(&symbol)?))
}

pub async fn stock_history(
    State(state): Shared,
    Path(symbol): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<PricePoint>>, WebError> {
    let timeframe = match query.timeframe.as_deref() {
        Some(token) => token.parse::<Timeframe>()?,
        None => Timeframe::default(),
    };
    tracing::debug!(%symbol, %timeframe, "price history");
    Ok(Json(series::price_history(&symbol, timeframe, (state.today)())?))
}

pub async fn stock_insights(
    State(state): Shared,
    Path(symbol): Path<String>,
) -> Result<Json<Vec<Insight>>, WebError> {
    Ok(Json(market::stock_insights(&symbol, (state.today)())?))
}

pub async fn portfolio(State(state): Shared) -> Json<PortfolioSnapshot> {
    Json(portfolio::snapshot((state.today)()))
}

// ── Custom agents ──

pub async fn list_agents(State(state): Shared) -> Result<Json<Vec<AgentRecord>>, WebError> {
    Ok(Json(state.agents.list()?))
}

pub async fn get_agent(
    State(state): Shared,
    Path(id): Path<String>,
) -> Result<Json<AgentRecord>, WebError> {
    Ok(Json(state.agents.get(&id)?))
}

pub async fn create_agent(
    State(state): Shared,
    payload: Result<Json<CustomAgentRequest>, JsonRejection>,
) -> Result<Json<AgentRecord>, WebError> {
    let Json(request) = payload?;
    let record = AgentRecord::new(new_record_id(), request, now());
    tracing::debug!(id = %record.id, name = %record.name, "saving custom agent");
    Ok(Json(state.agents.create(record)?))
}

pub async fn update_agent(
    State(state): Shared,
    Path(id): Path<String>,
    payload: Result<Json<CustomAgentRequest>, JsonRejection>,
) -> Result<Json<AgentRecord>, WebError> {
    let Json(request) = payload?;
    let stamp = now();
    let mut request = Some(request);
    let updated = state.agents.update(&id, &mut |record| {
        if let Some(req) = request.take() {
            record.apply(req, stamp);
        }
    })?;
    Ok(Json(updated))
}

pub async fn delete_agent(
    State(state): Shared,
    Path(id): Path<String>,
) -> Result<Json<Value>, WebError> {
    state.agents.delete(&id)?;
    Ok(deleted::<AgentRecord>(&id))
}
