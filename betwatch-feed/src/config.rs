//! Runtime configuration loaded from `config.toml`.
//!
//! Provides the fetch-cycle knobs and per-chain RPC endpoint lists. The
//! endpoint lists rotate at cycle granularity: when a fetch cycle fails,
//! the next tick connects to the next endpoint in order.
//!
//! When no config file is present the built-in defaults from
//! [`crate::chains::ChainConfig::default_rpc`] and [`FetchSettings`] are
//! used.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Fetch-cycle tuning.
    #[serde(default)]
    pub fetch: FetchSettings,
    /// Per-chain RPC overrides, keyed by chain ID.
    #[serde(default)]
    pub chains: HashMap<u64, ChainRpcs>,
}

/// Fetch-cycle tuning knobs.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Maximum block span a single log query may cover.
    pub max_span: u64,
    /// Display cap: at most this many bets are kept per cycle.
    pub max_results: usize,
    /// Seconds between poll cycles in `watch`.
    pub poll_secs: u64,
    /// How many blocks behind the tip a cycle looks.
    pub lookback: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_span: 450,
            max_results: 50,
            poll_secs: 15,
            lookback: 5_000,
        }
    }
}

/// RPC endpoint list for a single chain.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainRpcs {
    /// Ordered list of RPC URLs (best first).
    pub rpcs: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Returns [`Config::default`] if the file does not exist, allowing
    /// the binary to work without any config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Return the RPC URL list for a chain, falling back to the built-in
    /// default if the config has no entry for this chain.
    #[must_use]
    pub fn rpcs_for(&self, chain_id: u64, default_rpc: &str) -> Vec<String> {
        match self.chains.get(&chain_id) {
            Some(c) if !c.rpcs.is_empty() => c.rpcs.clone(),
            _ => vec![default_rpc.to_owned()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = Config::default();
        assert_eq!(config.fetch.max_span, 450, "default query span");
        assert_eq!(config.fetch.max_results, 50, "default display cap");
        assert_eq!(
            config.rpcs_for(56, "https://fallback.example"),
            vec!["https://fallback.example".to_owned()],
            "built-in RPC used when no entry exists"
        );
    }

    #[test]
    fn partial_files_keep_the_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [fetch]
            max_span = 999

            [chains.56]
            rpcs = ["https://a.example", "https://b.example"]
            "#,
        )
        .expect("valid config");

        assert_eq!(config.fetch.max_span, 999, "overridden knob");
        assert_eq!(config.fetch.poll_secs, 15, "untouched knob keeps default");
        assert_eq!(
            config.rpcs_for(56, "https://fallback.example"),
            vec!["https://a.example".to_owned(), "https://b.example".to_owned()],
            "configured endpoints win, in order"
        );
        assert_eq!(
            config.rpcs_for(97, "https://fallback.example"),
            vec!["https://fallback.example".to_owned()],
            "other chains still fall back"
        );
    }

    #[test]
    fn empty_rpc_list_falls_back() {
        let config: Config = toml::from_str("[chains.56]\nrpcs = []\n").expect("valid config");
        assert_eq!(
            config.rpcs_for(56, "https://fallback.example"),
            vec!["https://fallback.example".to_owned()],
            "an empty list must not leave the chain unreachable"
        );
    }
}
