//! Core domain types and deterministic generators.

pub mod error;
pub mod numeric;
pub mod timeframe;
pub mod series;
pub mod market;
pub mod portfolio;
pub mod analyst;
pub mod model;
pub mod simulation;
pub mod records;
