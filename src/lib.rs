//! Core library for the `stresser` CLI.
//!
//! The binary fires a fixed number of HTTP GET requests across a fixed pool
//! of workers. This crate exposes the pieces it is built from: CLI argument
//! types, configuration loading, the request dispatcher, the shared result
//! aggregator and the reporters that render its summary.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
pub mod shutdown;
