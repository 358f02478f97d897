//! hedgefund: mock financial data backend for the AI hedge fund demo.
//!
//! Hexagonal architecture: deterministic generators and records in [`domain`],
//! port traits in [`ports`], HTTP and file-backed implementations in
//! [`adapters`], command-line entry in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
