//! Betwatch feed CLI.
//!
//! Polls the game contracts for settled dice & coin-flip wagers and
//! renders them as tables.
//!
//! # Usage
//!
//! ```bash
//! # One-shot feed of recent bets on BSC mainnet
//! betwatch-feed recent
//!
//! # Live feed, refreshed on a fixed timer
//! betwatch-feed watch --interval 15
//!
//! # One player's dice bets, as JSON
//! betwatch-feed recent --game dice --player 0x00000000000000000000000000000000000be7a1 --json
//!
//! # List known deployments
//! betwatch-feed list
//! ```

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use alloy::primitives::Address;
use alloy::providers::ProviderBuilder;
use anyhow::{Context, Result};
use betwatch::{BetEvent, GameKind};
use betwatch_feed::chains::{self, ChainConfig};
use betwatch_feed::config::Config;
use betwatch_feed::display;
use betwatch_feed::fetcher::{self, FetchParams};
use clap::{Args, Parser, Subcommand};

/// Live on-chain bet feed for the dice & coin-flip games.
#[derive(Debug, Parser)]
#[command(name = "betwatch-feed", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch one cycle of recent bets and print them.
    Recent {
        #[command(flatten)]
        feed: FeedArgs,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Poll on a fixed timer and print the refreshed feed. Ctrl-C stops.
    Watch {
        #[command(flatten)]
        feed: FeedArgs,

        /// Seconds between refreshes (overrides the config).
        #[arg(long)]
        interval: Option<u64>,
    },

    /// List all known game deployments.
    List,
}

/// Flags shared by `recent` and `watch`.
#[derive(Debug, Args)]
struct FeedArgs {
    /// Chain to read, by EIP-155 chain ID.
    #[arg(long, default_value_t = 56)]
    chain: u64,

    /// Override the RPC endpoint (otherwise config file, then built-in).
    #[arg(long)]
    rpc: Option<String>,

    /// Restrict the feed to one game (`dice` or `coin-flip`).
    #[arg(long)]
    game: Option<GameKind>,

    /// Only show bets placed by this address.
    #[arg(long)]
    player: Option<Address>,

    /// How many blocks behind the tip to scan.
    #[arg(long)]
    lookback: Option<u64>,

    /// Maximum number of bets to display.
    #[arg(long)]
    limit: Option<usize>,

    /// Path to the TOML config file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

/// Resolved invocation context shared by `recent` and `watch`.
struct Feed {
    chain: &'static ChainConfig,
    rpcs: Vec<String>,
    params: FetchParams,
    game: Option<GameKind>,
    player: Option<Address>,
    poll: Duration,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Recent { feed, json } => cmd_recent(feed, json).await,
        Command::Watch { feed, interval } => cmd_watch(feed, interval).await,
        Command::List => {
            cmd_list();
            Ok(())
        }
    }
}

/// Resolve CLI flags against the config file and chain table.
fn resolve(args: &FeedArgs, interval: Option<u64>) -> Result<Feed> {
    let chain = chains::by_chain_id(args.chain)
        .with_context(|| format!("unknown chain ID {}", args.chain))?;
    let config = Config::load(&args.config)?;

    let rpcs = match &args.rpc {
        Some(url) => vec![url.clone()],
        None => config.rpcs_for(chain.chain_id(), chain.default_rpc),
    };

    let mut params = FetchParams::from(config.fetch);
    if let Some(lookback) = args.lookback {
        params.lookback = lookback;
    }
    if let Some(limit) = args.limit {
        params.max_results = limit;
    }

    Ok(Feed {
        chain,
        rpcs,
        params,
        game: args.game,
        player: args.player,
        poll: Duration::from_secs(interval.unwrap_or(config.fetch.poll_secs)),
    })
}

/// Run one fetch cycle against a single endpoint.
async fn run_cycle(feed: &Feed, rpc_url: &str) -> Result<Vec<BetEvent>> {
    let provider = ProviderBuilder::new().connect_http(
        rpc_url
            .parse()
            .with_context(|| format!("invalid RPC URL: {rpc_url}"))?,
    );

    match (feed.game, feed.player) {
        (Some(game), Some(player)) => {
            fetcher::player_bets(&provider, feed.chain, game, player, &feed.params).await
        }
        _ => fetcher::recent_bets(&provider, feed.chain, feed.game, feed.player, &feed.params).await,
    }
}

/// Execute the `recent` subcommand.
async fn cmd_recent(args: FeedArgs, json: bool) -> Result<()> {
    let feed = resolve(&args, None)?;
    let rpc = feed.rpcs.first().context("no RPC endpoint configured")?;

    tracing::info!(chain_id = feed.chain.chain_id(), rpc = %rpc, "fetching recent bets");
    let bets = run_cycle(&feed, rpc).await?;
    print_bets(&bets, json)
}

/// Execute the `watch` subcommand.
///
/// One cycle runs to completion (or failure) per tick. A failed cycle
/// surfaces a single error line and rotates to the next configured
/// endpoint for the following tick.
async fn cmd_watch(args: FeedArgs, interval: Option<u64>) -> Result<()> {
    let feed = resolve(&args, interval)?;
    let mut rpc_index = 0usize;
    let mut ticker = tokio::time::interval(feed.poll);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    tracing::info!(
        chain_id = feed.chain.chain_id(),
        interval_secs = feed.poll.as_secs(),
        "watching for settled bets"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let rpc = &feed.rpcs[rpc_index % feed.rpcs.len()];
                match run_cycle(&feed, rpc).await {
                    Ok(bets) => print_frame(&feed, &bets),
                    Err(e) => {
                        tracing::error!(rpc = %rpc, error = %e, "bet feed refresh failed");
                        rpc_index += 1;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                return Ok(());
            }
        }
    }
}

/// Print one cycle's worth of bets.
#[allow(clippy::print_stdout)]
fn print_bets(bets: &[BetEvent], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(bets)?);
    } else if bets.is_empty() {
        println!("no settled bets in range");
    } else {
        print!("{}", display::render_table(bets, now_secs()));
    }
    Ok(())
}

/// Print a refreshed feed frame with a wall-clock header.
#[allow(clippy::print_stdout)]
fn print_frame(feed: &Feed, bets: &[BetEvent]) {
    let stamp = chrono::Utc::now().format("%H:%M:%S");
    println!(
        "[{stamp}] chain {} | {} settled bets",
        feed.chain.chain_id(),
        bets.len()
    );
    if bets.is_empty() {
        println!("no settled bets in range");
    } else {
        print!("{}", display::render_table(bets, now_secs()));
    }
    println!();
}

/// Execute the `list` subcommand.
#[allow(clippy::print_stdout)]
fn cmd_list() {
    println!(
        "{:<10} {:<12} {:<6} {:<14} {:<44} RPC",
        "Chain ID", "Network", "Type", "Deploy Block", "Dice / Coin-flip"
    );
    println!("{}", "-".repeat(130));

    for chain in chains::ALL {
        let net_type = if chain.is_testnet { "test" } else { "main" };
        let addrs = chain.network.addresses();
        println!(
            "{:<10} {:<12} {:<6} {:<14} {:#x} / {:#x}  {}",
            chain.chain_id(),
            format!("{:?}", chain.network),
            net_type,
            chain.deployment_block,
            addrs.dice,
            addrs.coinflip,
            chain.default_rpc,
        );
    }
}

/// Current wall-clock time as seconds since the epoch.
fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
