//! tierpilot service library entry.
//!
//! Wires config, catalog loading, the flow endpoint, and ops endpoints into
//! an axum application. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flow;
pub mod obs;
pub mod ops;
pub mod router;
