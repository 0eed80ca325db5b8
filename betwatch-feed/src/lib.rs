//! Live on-chain bet feed library.
//!
//! Polls a JSON-RPC endpoint for settled dice & coin-flip wagers, decodes
//! them, and shapes them for display: chunked log retrieval, per-event
//! block timestamps, and pure table formatting.

pub mod chains;
pub mod chunks;
pub mod config;
pub mod display;
pub mod fetcher;
