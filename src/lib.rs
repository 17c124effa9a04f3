//! opsboard - operations dashboard front server
//!
//! Polls a monitoring API for inference node, database and physical server
//! health, renders HTML fragments server-side into an in-memory page, and
//! serves that page with live updates over WebSocket.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod dbcheck;
pub mod drilldown;
pub mod logging;
pub mod metrics;
pub mod page;
pub mod poller;
pub mod render;
pub mod status;
pub mod view;
