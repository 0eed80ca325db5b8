//! RPC event fetching: the poll-cycle retrieval routine.
//!
//! One cycle:
//! 1. Reads the chain tip and derives the lookback range.
//! 2. Queries `eth_getLogs` once per window per game contract, newest
//!    window first, staying under the provider's span limit.
//! 3. Decodes each log, applies the optional player filter, and resolves
//!    block timestamps.
//! 4. Merges, sorts descending by block number, and caps for display.
//!
//! Any query failure aborts the whole cycle; the caller retries on its
//! next timer tick. Per-log and per-block failures only skip that entry.

use std::collections::HashMap;
use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::Provider;
use alloy::rpc::types::{Filter, Log};
use anyhow::{Context, Result};
use betwatch::contracts::SETTLED_TOPIC;
use betwatch::{BetEvent, GameKind};

use crate::chains::ChainConfig;
use crate::chunks;
use crate::config::FetchSettings;

/// Per-request timeout for RPC calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Delay between consecutive log queries to avoid provider rate-limiting.
/// Best-effort throttle only; correctness never depends on it.
const INTER_QUERY_DELAY: Duration = Duration::from_millis(200);

/// One contract to pull bets from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetSource {
    /// Game contract address.
    pub address: Address,
    /// Tag applied to events decoded from this contract.
    pub game: GameKind,
}

/// Cycle parameters shared by both call sites.
#[derive(Debug, Clone, Copy)]
pub struct FetchParams {
    /// Maximum block span a single log query may cover.
    pub max_span: u64,
    /// Display cap applied after sorting.
    pub max_results: usize,
    /// How many blocks behind the tip a cycle looks.
    pub lookback: u64,
}

impl From<FetchSettings> for FetchParams {
    fn from(s: FetchSettings) -> Self {
        Self {
            max_span: s.max_span,
            max_results: s.max_results,
            lookback: s.lookback,
        }
    }
}

/// Retrieve all settled bets from `sources` within `[start, latest]`.
///
/// Every returned event's block number lies within the range, results are
/// sorted descending by block number, and at most `max_results` survive.
///
/// # Errors
///
/// Returns an error when any single log query fails or times out; there
/// is no partial-result fallback and no retry within a cycle.
pub async fn fetch_bets<P: Provider>(
    provider: &P,
    sources: &[BetSource],
    start: u64,
    latest: u64,
    player: Option<Address>,
    params: &FetchParams,
) -> Result<Vec<BetEvent>> {
    let mut bets = Vec::new();
    let mut timestamps = HashMap::new();

    for (from, to) in chunks::windows(start, latest, params.max_span) {
        for source in sources {
            let filter = Filter::new()
                .address(source.address)
                .event_signature(SETTLED_TOPIC)
                .from_block(from)
                .to_block(to);

            let logs = tokio::time::timeout(REQUEST_TIMEOUT, provider.get_logs(&filter))
                .await
                .map_err(|_| anyhow::anyhow!("log query timed out"))
                .and_then(|r| r.map_err(|e| anyhow::anyhow!("{e}")))
                .with_context(|| format!("retrieving bet events in [{from}, {to}]"))?;

            for log in &logs {
                let Some(bet) = decode_bet(log, source.game, player) else {
                    continue;
                };
                let Some(ts) = block_timestamp(provider, &mut timestamps, bet.block_number).await
                else {
                    continue;
                };
                bets.push(BetEvent {
                    timestamp: ts,
                    ..bet
                });
            }

            tokio::time::sleep(INTER_QUERY_DELAY).await;
        }
    }

    Ok(sort_and_cap(bets, params.max_results))
}

/// Aggregation view: recent bets across the game contracts.
///
/// `game` narrows the feed to one contract; `player` keeps only that
/// bettor's wagers.
///
/// # Errors
///
/// Fails when the chain tip cannot be read or any window query fails; the
/// caller retries on its next tick.
pub async fn recent_bets<P: Provider>(
    provider: &P,
    chain: &ChainConfig,
    game: Option<GameKind>,
    player: Option<Address>,
    params: &FetchParams,
) -> Result<Vec<BetEvent>> {
    let latest = latest_block(provider).await?;
    let start = start_block(chain, latest, params.lookback);

    let addrs = chain.network.addresses();
    let all = [
        BetSource {
            address: addrs.dice,
            game: GameKind::Dice,
        },
        BetSource {
            address: addrs.coinflip,
            game: GameKind::CoinFlip,
        },
    ];
    let sources: Vec<BetSource> = match game {
        Some(kind) => all.iter().copied().filter(|s| s.game == kind).collect(),
        None => all.to_vec(),
    };

    fetch_bets(provider, &sources, start, latest, player, params).await
}

/// Player view: one game contract, filtered to a single bettor.
///
/// # Errors
///
/// Same failure contract as [`recent_bets`].
pub async fn player_bets<P: Provider>(
    provider: &P,
    chain: &ChainConfig,
    game: GameKind,
    player: Address,
    params: &FetchParams,
) -> Result<Vec<BetEvent>> {
    let latest = latest_block(provider).await?;
    let start = start_block(chain, latest, params.lookback);

    let addrs = chain.network.addresses();
    let source = [BetSource {
        address: match game {
            GameKind::Dice => addrs.dice,
            GameKind::CoinFlip => addrs.coinflip,
        },
        game,
    }];

    fetch_bets(provider, &source, start, latest, Some(player), params).await
}

/// Read the chain tip with the standard request timeout.
async fn latest_block<P: Provider>(provider: &P) -> Result<u64> {
    tokio::time::timeout(REQUEST_TIMEOUT, provider.get_block_number())
        .await
        .context("get_block_number timed out")?
        .context("get_block_number failed")
}

/// Lower edge of a cycle's range: `lookback` blocks behind the tip,
/// clamped to the deployment block and never above the tip.
fn start_block(chain: &ChainConfig, latest: u64, lookback: u64) -> u64 {
    latest
        .saturating_sub(lookback)
        .max(chain.deployment_block)
        .min(latest)
}

/// Decode one log, applying the optional player filter.
///
/// Address comparison is byte-wise, so mixed-case filter input matches
/// regardless of how the address was rendered anywhere upstream.
fn decode_bet(log: &Log, game: GameKind, player: Option<Address>) -> Option<BetEvent> {
    let bet = match BetEvent::decode(log, game) {
        Ok(bet) => bet,
        Err(e) => {
            tracing::debug!(error = %e, "skipping undecodable log");
            return None;
        }
    };
    if player.is_some_and(|p| p != bet.player) {
        return None;
    }
    Some(bet)
}

/// Resolve a block's timestamp, caching within the cycle.
///
/// Returns `None` on lookup failure; the caller skips that event.
async fn block_timestamp<P: Provider>(
    provider: &P,
    cache: &mut HashMap<u64, u64>,
    number: u64,
) -> Option<u64> {
    if let Some(ts) = cache.get(&number) {
        return Some(*ts);
    }

    let fetched =
        tokio::time::timeout(REQUEST_TIMEOUT, provider.get_block_by_number(number.into())).await;
    let ts = match fetched {
        Ok(Ok(Some(block))) => block.header.timestamp,
        Ok(Ok(None)) => {
            tracing::warn!(number, "block not found, skipping event");
            return None;
        }
        Ok(Err(e)) => {
            tracing::warn!(number, error = %e, "block lookup failed, skipping event");
            return None;
        }
        Err(_) => {
            tracing::warn!(number, "block lookup timed out, skipping event");
            return None;
        }
    };

    cache.insert(number, ts);
    Some(ts)
}

/// Sort descending by block number and truncate to the display cap.
fn sort_and_cap(mut bets: Vec<BetEvent>, cap: usize) -> Vec<BetEvent> {
    bets.sort_by(|a, b| b.block_number.cmp(&a.block_number));
    bets.truncate(cap);
    bets
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{B256, U256, address, b256};
    use alloy::sol_types::SolEvent;
    use betwatch::Network;
    use betwatch::contracts::BetSettled;

    const PLAYER: Address = address!("00000000000000000000000000000000000be7a1");
    const TX: B256 = b256!("2222222222222222222222222222222222222222222222222222222222222222");

    fn settled_log(player: Address, block: u64) -> Log {
        let event = BetSettled {
            player,
            amount: U256::from(1_000u64),
            choice: 2,
            outcome: 5,
            win: false,
        };
        Log {
            inner: alloy::primitives::Log {
                address: Network::BscMainnet.addresses().dice,
                data: event.encode_log_data(),
            },
            block_number: Some(block),
            transaction_hash: Some(TX),
            ..Default::default()
        }
    }

    fn bet(block: u64) -> BetEvent {
        decode_bet(&settled_log(PLAYER, block), GameKind::Dice, None)
            .expect("well-formed log decodes")
    }

    #[test]
    fn player_filter_matches_case_insensitively() {
        let log = settled_log(PLAYER, 10);

        let upper: Address = "0x00000000000000000000000000000000000BE7A1"
            .parse()
            .expect("valid hex address");
        assert!(
            decode_bet(&log, GameKind::Dice, Some(upper)).is_some(),
            "mixed-case filter input must match the same address"
        );
    }

    #[test]
    fn player_filter_drops_other_bettors() {
        let log = settled_log(PLAYER, 10);
        let other = Address::repeat_byte(9);
        assert!(
            decode_bet(&log, GameKind::Dice, Some(other)).is_none(),
            "events from other players must be discarded"
        );
    }

    #[test]
    fn undecodable_logs_are_skipped_not_fatal() {
        let mut log = settled_log(PLAYER, 10);
        log.block_number = None;
        assert!(
            decode_bet(&log, GameKind::Dice, None).is_none(),
            "decode failure yields None so the cycle continues"
        );
    }

    #[test]
    fn output_is_sorted_descending_and_capped() {
        let bets = vec![bet(5), bet(900), bet(17), bet(42), bet(899)];
        let out = sort_and_cap(bets, 3);

        assert_eq!(out.len(), 3, "cap applies after sorting");
        let blocks: Vec<u64> = out.iter().map(|b| b.block_number).collect();
        assert_eq!(
            blocks,
            vec![900, 899, 42],
            "newest blocks first, oldest dropped by the cap"
        );
    }

    #[test]
    fn cap_larger_than_input_keeps_everything() {
        let out = sort_and_cap(vec![bet(1), bet(2)], 50);
        assert_eq!(out.len(), 2, "cap is an upper bound only");
    }

    #[test]
    fn start_block_clamps_to_deployment_and_tip() {
        let chain = crate::chains::by_chain_id(56).expect("mainnet is known");
        let deploy = chain.deployment_block;

        assert_eq!(
            start_block(chain, deploy + 10_000, 5_000),
            deploy + 5_000,
            "plain lookback when history is deep enough"
        );
        assert_eq!(
            start_block(chain, deploy + 100, 5_000),
            deploy,
            "lookback clamps to the deployment block"
        );
    }
}
