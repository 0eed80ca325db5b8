//! Static chain configuration for the known game deployments.
//!
//! Each entry pairs a [`betwatch::Network`] variant with operational
//! metadata (deployment block, default public RPC) that the SDK itself
//! does not track.

use betwatch::Network;

/// Operational metadata for a single game deployment.
#[derive(Debug, Clone, Copy)]
pub struct ChainConfig {
    /// The [`betwatch::Network`] variant (provides chain ID and contract addresses).
    pub network: Network,
    /// Block at which the game contracts were deployed. Lookback windows
    /// are clamped here; there are no bets to show below it.
    pub deployment_block: u64,
    /// Suggested public RPC endpoint.
    pub default_rpc: &'static str,
    /// Whether this is a testnet deployment.
    pub is_testnet: bool,
}

impl ChainConfig {
    /// Convenience: the EIP-155 chain ID.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.network.chain_id()
    }
}

/// All known game deployments (single source of truth).
pub const ALL: &[ChainConfig] = &[
    ChainConfig {
        network: Network::BscMainnet,
        deployment_block: 36_218_004,
        default_rpc: "https://bsc-rpc.publicnode.com",
        is_testnet: false,
    },
    ChainConfig {
        network: Network::BscTestnet,
        deployment_block: 39_402_117,
        default_rpc: "https://bsc-testnet-rpc.publicnode.com",
        is_testnet: true,
    },
];

/// Look up a [`ChainConfig`] by chain ID.
#[must_use]
pub fn by_chain_id(chain_id: u64) -> Option<&'static ChainConfig> {
    ALL.iter().find(|c| c.chain_id() == chain_id)
}
