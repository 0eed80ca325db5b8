//! Typed errors for decoding and parsing.

use thiserror::Error;

/// Errors produced by the core SDK.
#[derive(Debug, Error)]
pub enum BetError {
    /// The log payload does not match the `BetSettled` signature.
    #[error("log decode failed: {0}")]
    Decode(#[from] alloy::sol_types::Error),

    /// The provider returned a log without a required field.
    #[error("log missing `{0}`")]
    MissingField(&'static str),

    /// A game-kind string was not recognized.
    #[error("unknown game kind `{0}` (expected `dice` or `coin-flip`)")]
    UnknownGameKind(String),
}
