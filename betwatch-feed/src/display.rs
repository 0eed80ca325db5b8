//! Pure presentation helpers: relative times, truncated identifiers,
//! scaled amounts, fixed-width tables. Derived display logic only; no
//! state and no I/O.

use std::fmt::Write as _;

use alloy::primitives::{Address, TxHash, U256};
use alloy::primitives::utils::format_ether;
use betwatch::BetEvent;

/// Render a seconds-since-epoch timestamp relative to `now`.
#[must_use]
pub fn relative_time(timestamp: u64, now: u64) -> String {
    let delta = now.saturating_sub(timestamp);
    if delta < 5 {
        "just now".to_owned()
    } else if delta < 60 {
        format!("{delta}s ago")
    } else if delta < 3_600 {
        format!("{}m ago", delta / 60)
    } else if delta < 86_400 {
        format!("{}h ago", delta / 3_600)
    } else {
        format!("{}d ago", delta / 86_400)
    }
}

/// Truncate an address to `0x1234…cdef` (lowercase).
#[must_use]
pub fn short_address(address: Address) -> String {
    shorten(&format!("{address:#x}"))
}

/// Truncate a transaction hash to `0x1234…cdef` (lowercase).
#[must_use]
pub fn short_hash(hash: TxHash) -> String {
    shorten(&format!("{hash:#x}"))
}

fn shorten(hex: &str) -> String {
    if hex.len() < 12 {
        return hex.to_owned();
    }
    format!("{}…{}", &hex[..6], &hex[hex.len() - 4..])
}

/// Scale a wei amount to whole tokens with four fractional digits.
#[must_use]
pub fn format_amount(amount: U256) -> String {
    let scaled = format_ether(amount);
    match scaled.split_once('.') {
        Some((whole, frac)) => format!("{whole}.{}", &frac[..frac.len().min(4)]),
        None => scaled,
    }
}

/// Render the feed as a fixed-width table, newest first.
#[must_use]
pub fn render_table(bets: &[BetEvent], now: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<10} {:<14} {:>12} {:>7} {:>7} {:<6} {}",
        "WHEN", "GAME", "PLAYER", "BET", "PICK", "DREW", "RESULT", "TX"
    );
    let _ = writeln!(out, "{}", "-".repeat(88));

    for bet in bets {
        let _ = writeln!(
            out,
            "{:<10} {:<10} {:<14} {:>12} {:>7} {:>7} {:<6} {}",
            relative_time(bet.timestamp, now),
            bet.game.label(),
            short_address(bet.player),
            format_amount(bet.amount),
            bet.game.code_label(bet.choice),
            bet.game.code_label(bet.outcome),
            if bet.win { "win" } else { "loss" },
            short_hash(bet.tx_hash),
        );
    }
    out
}
