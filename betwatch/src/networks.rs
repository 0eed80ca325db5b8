//! Pre-configured network definitions with known contract addresses.
//!
//! The game contracts are deployed via CREATE2 deterministic deployment,
//! so each network tier shares one address pair.

use alloy::primitives::{Address, address};

/// Known game contract addresses for a specific network deployment.
#[derive(Debug, Clone, Copy)]
pub struct GameAddresses {
    /// The dice game contract address.
    pub dice: Address,
    /// The coin-flip game contract address.
    pub coinflip: Address,
}

/// Pre-defined network configurations for Betwatch deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Network {
    /// BNB Smart Chain Mainnet (chain ID 56).
    BscMainnet,
    /// BNB Smart Chain Testnet (chain ID 97).
    BscTestnet,
}

/// Mainnet deployment (CREATE2 deterministic).
const MAINNET_DICE: Address = address!("d1ce5f0db1fe254701d09f4adfd1eb6b6f3e8c44");
const MAINNET_COINFLIP: Address = address!("c01f11bd4a2c5e7b9f83ab61d20c95dca7e4f2a9");

/// Testnet deployment (CREATE2 deterministic).
const TESTNET_DICE: Address = address!("d1ce7e8b06f3a44c92d85fb1e06c4a9d13b7f255");
const TESTNET_COINFLIP: Address = address!("c01f93ac5217ddeb08b2e64f7a85c10db94e3f66");

impl Network {
    /// Returns the known game contract addresses for this network.
    #[must_use]
    pub const fn addresses(self) -> GameAddresses {
        match self {
            Self::BscMainnet => GameAddresses {
                dice: MAINNET_DICE,
                coinflip: MAINNET_COINFLIP,
            },
            Self::BscTestnet => GameAddresses {
                dice: TESTNET_DICE,
                coinflip: TESTNET_COINFLIP,
            },
        }
    }

    /// Returns the EIP-155 chain ID for this network.
    #[must_use]
    pub const fn chain_id(self) -> u64 {
        match self {
            Self::BscMainnet => 56,
            Self::BscTestnet => 97,
        }
    }
}
