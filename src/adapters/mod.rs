//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod json_store;
pub mod web;
