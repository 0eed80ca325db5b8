#![allow(clippy::print_stdout)]
//! Fetch one player's recent dice bets and print them as a table.
//!
//! Usage:
//!   cargo run --example `player_view`
//!
//! Connects to BSC mainnet via a public RPC endpoint and runs a single
//! fetch cycle for a fixed player address.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy::providers::ProviderBuilder;
use betwatch::GameKind;
use betwatch_feed::chains;
use betwatch_feed::display::render_table;
use betwatch_feed::fetcher::{self, FetchParams};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let chain = chains::by_chain_id(56).ok_or("unknown chain")?;
    let provider = ProviderBuilder::new().connect_http(chain.default_rpc.parse()?);

    let player = "0x00000000000000000000000000000000000be7a1".parse()?;
    let params = FetchParams {
        max_span: 450,
        max_results: 20,
        lookback: 5_000,
    };

    let bets = fetcher::player_bets(&provider, chain, GameKind::Dice, player, &params).await?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    print!("{}", render_table(&bets, now));
    println!("{} bets in the last 5000 blocks", bets.len());

    Ok(())
}
