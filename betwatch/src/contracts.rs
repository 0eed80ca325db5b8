//! Contract event bindings for the game contracts.
//!
//! Both game contracts emit the same `BetSettled` event when a wager
//! resolves, so one binding and one topic hash cover the whole feed.

use alloy::primitives::B256;
use alloy::sol;
use alloy::sol_types::SolEvent;

sol! {
    /// Emitted once per wager when the outcome is drawn.
    ///
    /// `choice` and `outcome` are game-specific codes: the face value for
    /// dice, 0/1 (heads/tails) for coin-flip.
    #[derive(Debug, PartialEq, Eq)]
    event BetSettled(
        address indexed player,
        uint256 amount,
        uint8 choice,
        uint8 outcome,
        bool win
    );
}

/// keccak256 of the `BetSettled` signature, used as topic0 in log filters.
pub const SETTLED_TOPIC: B256 = BetSettled::SIGNATURE_HASH;
