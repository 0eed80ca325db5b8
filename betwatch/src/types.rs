//! Domain types for the bet feed.
//!
//! A [`BetEvent`] is created by decoding one log entry and never mutated;
//! each poll cycle replaces the whole display list rather than editing it.

use core::fmt;
use core::str::FromStr;

use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::Log;
use serde::Serialize;

use crate::contracts::BetSettled;
use crate::error::BetError;

/// Which game contract an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    /// Six-sided dice: pick a face, win if the roll matches.
    Dice,
    /// Coin flip: pick heads (0) or tails (1).
    CoinFlip,
}

impl GameKind {
    /// Short lowercase tag used in tables and JSON.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dice => "dice",
            Self::CoinFlip => "coin-flip",
        }
    }

    /// Human label for a choice or outcome code.
    ///
    /// Codes the contract should never emit render as `"?"`; display must
    /// not reject what the chain recorded.
    #[must_use]
    pub fn code_label(self, code: u8) -> String {
        match self {
            Self::Dice if (1..=6).contains(&code) => code.to_string(),
            Self::CoinFlip if code == 0 => "heads".to_owned(),
            Self::CoinFlip if code == 1 => "tails".to_owned(),
            _ => "?".to_owned(),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameKind {
    type Err = BetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dice" => Ok(Self::Dice),
            "coinflip" | "coin-flip" | "flip" => Ok(Self::CoinFlip),
            other => Err(BetError::UnknownGameKind(other.to_owned())),
        }
    }
}

/// One settled wager, decoded from a `BetSettled` log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BetEvent {
    /// Block the settlement landed in.
    pub block_number: u64,
    /// Transaction that settled the wager.
    pub tx_hash: TxHash,
    /// The bettor.
    pub player: Address,
    /// Wagered amount in native-token wei.
    pub amount: U256,
    /// The player's pick (game-specific code).
    pub choice: u8,
    /// The drawn result (game-specific code).
    pub outcome: u8,
    /// Whether the player won.
    pub win: bool,
    /// Which game contract emitted the event.
    pub game: GameKind,
    /// Timestamp of the enclosing block, seconds since epoch.
    /// Zero until the fetcher resolves the block.
    pub timestamp: u64,
}

impl BetEvent {
    /// Decode one raw log against the [`BetSettled`] shape.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::Decode`] when the log does not match the event
    /// signature, and [`BetError::MissingField`] when the provider omitted
    /// the block number or transaction hash.
    pub fn decode(log: &Log, game: GameKind) -> Result<Self, BetError> {
        let decoded = log.log_decode::<BetSettled>()?;
        let block_number = log
            .block_number
            .ok_or(BetError::MissingField("blockNumber"))?;
        let tx_hash = log
            .transaction_hash
            .ok_or(BetError::MissingField("transactionHash"))?;

        let BetSettled {
            player,
            amount,
            choice,
            outcome,
            win,
        } = decoded.inner.data;

        Ok(Self {
            block_number,
            tx_hash,
            player,
            amount,
            choice,
            outcome,
            win,
            game,
            timestamp: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{B256, Bytes, LogData, b256};
    use alloy::sol_types::SolEvent;

    use crate::contracts::SETTLED_TOPIC;
    use crate::networks::Network;

    const PLAYER: Address = alloy::primitives::address!("00000000000000000000000000000000000be7a1");
    const TX: B256 = b256!("1111111111111111111111111111111111111111111111111111111111111111");

    /// Build an RPC log by hand-encoding the ABI words, independent of the
    /// `sol!` encoder, so decode is checked against the raw wire format.
    fn raw_log(amount: U256, choice: u8, outcome: u8, win: bool) -> Log {
        let mut data = Vec::with_capacity(128);
        data.extend_from_slice(&amount.to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(choice).to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(outcome).to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(u8::from(win)).to_be_bytes::<32>());

        let topics = vec![SETTLED_TOPIC, B256::left_padding_from(PLAYER.as_slice())];
        Log {
            inner: alloy::primitives::Log {
                address: Network::BscMainnet.addresses().dice,
                data: LogData::new_unchecked(topics, Bytes::from(data)),
            },
            block_number: Some(1_234_567),
            transaction_hash: Some(TX),
            ..Default::default()
        }
    }

    #[test]
    fn decode_matches_raw_encoded_values() {
        let amount = U256::from(500_000_000_000_000_000u64);
        let log = raw_log(amount, 3, 3, true);

        let bet = BetEvent::decode(&log, GameKind::Dice).expect("log matches the event shape");
        assert_eq!(bet.player, PLAYER, "indexed player topic");
        assert_eq!(bet.amount, amount, "amount word");
        assert_eq!(bet.choice, 3, "choice word");
        assert_eq!(bet.outcome, 3, "outcome word");
        assert!(bet.win, "win word");
        assert_eq!(bet.block_number, 1_234_567, "block number from log metadata");
        assert_eq!(bet.tx_hash, TX, "tx hash from log metadata");
        assert_eq!(bet.game, GameKind::Dice, "game tag from the call site");
        assert_eq!(bet.timestamp, 0, "timestamp resolved later by the fetcher");
    }

    #[test]
    fn decode_roundtrips_the_sol_encoder() {
        let event = BetSettled {
            player: PLAYER,
            amount: U256::from(42u64),
            choice: 1,
            outcome: 0,
            win: false,
        };
        let log = Log {
            inner: alloy::primitives::Log {
                address: Network::BscMainnet.addresses().coinflip,
                data: event.encode_log_data(),
            },
            block_number: Some(99),
            transaction_hash: Some(TX),
            ..Default::default()
        };

        let bet = BetEvent::decode(&log, GameKind::CoinFlip).expect("encoder output decodes");
        assert_eq!(bet.amount, U256::from(42u64), "amount survives the roundtrip");
        assert_eq!(bet.outcome, 0, "outcome survives the roundtrip");
        assert!(!bet.win, "win flag survives the roundtrip");
    }

    #[test]
    fn decode_rejects_foreign_logs() {
        let log = Log {
            inner: alloy::primitives::Log {
                address: Network::BscMainnet.addresses().dice,
                data: LogData::new_unchecked(
                    vec![B256::ZERO],
                    Bytes::from(vec![0u8; 32]),
                ),
            },
            block_number: Some(1),
            transaction_hash: Some(TX),
            ..Default::default()
        };

        assert!(
            matches!(
                BetEvent::decode(&log, GameKind::Dice),
                Err(BetError::Decode(_))
            ),
            "a log with the wrong topic0 must not decode"
        );
    }

    #[test]
    fn decode_requires_log_metadata() {
        let mut log = raw_log(U256::from(1u64), 2, 5, false);
        log.block_number = None;

        assert!(
            matches!(
                BetEvent::decode(&log, GameKind::Dice),
                Err(BetError::MissingField("blockNumber"))
            ),
            "pending logs without a block number are rejected"
        );
    }

    #[test]
    fn game_kind_parses_cli_spellings() {
        assert_eq!("dice".parse::<GameKind>().ok(), Some(GameKind::Dice), "dice");
        assert_eq!(
            "Coin-Flip".parse::<GameKind>().ok(),
            Some(GameKind::CoinFlip),
            "case-insensitive"
        );
        assert!("roulette".parse::<GameKind>().is_err(), "unknown kind");
    }

    #[test]
    fn code_labels_cover_valid_and_garbage_codes() {
        assert_eq!(GameKind::Dice.code_label(6), "6", "dice face");
        assert_eq!(GameKind::Dice.code_label(0), "?", "dice faces start at 1");
        assert_eq!(GameKind::CoinFlip.code_label(0), "heads", "heads code");
        assert_eq!(GameKind::CoinFlip.code_label(1), "tails", "tails code");
        assert_eq!(GameKind::CoinFlip.code_label(7), "?", "garbage code");
    }
}
