//! On-chain dice & coin-flip bet feed SDK.
//!
//! Event bindings, network metadata, and domain types shared by the feed
//! binary. The chunked log retrieval, polling loop, and table rendering
//! live in the `betwatch-feed` crate.

pub mod contracts;
pub mod error;
pub mod networks;
pub mod types;

pub use error::BetError;
pub use networks::{GameAddresses, Network};
pub use types::{BetEvent, GameKind};
