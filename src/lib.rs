//! neowatch library
//!
//! Proxy for NASA's NeoWs feed with a five-minute cache and sample-data
//! fallback, plus the terminal dashboard that consumes it.

pub mod app;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod data;
pub mod server;
pub mod service;
pub mod ui;
