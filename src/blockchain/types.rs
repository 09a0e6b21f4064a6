// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use std::{fmt, str::FromStr};

use alloy::primitives::{address, Address, Bytes, B256};

/// Ethereum network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// Infura endpoint prefix; the project id is appended as the last path segment
    pub infura_base_url: &'static str,
}

impl NetworkConfig {
    /// Build the Infura JSON-RPC URL for a project id.
    pub fn infura_url(&self, project_id: &str) -> String {
        format!("{}/{}", self.infura_base_url, project_id)
    }
}

/// Ethereum Mainnet configuration.
pub const ETHEREUM_MAINNET: NetworkConfig = NetworkConfig {
    name: "Ethereum Mainnet",
    chain_id: 1,
    infura_base_url: "https://mainnet.infura.io/v3",
};

// =============================================================================
// Chains
// =============================================================================

/// Chains accepted by the `chain` discriminator of a wallet query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Ethereum,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a request names a chain this deployment does not serve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported chain")]
pub struct UnsupportedChain;

impl FromStr for Chain {
    type Err = UnsupportedChain;

    /// Exact match only: `"Ethereum"` and `" ethereum"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ethereum" => Ok(Chain::Ethereum),
            _ => Err(UnsupportedChain),
        }
    }
}

// =============================================================================
// Assets
// =============================================================================

/// An asset whose balance and transfer volume are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// Symbol used as the key in balance and volume reports
    pub symbol: &'static str,
    /// ERC-20 contract address (None for the native coin)
    pub contract_address: Option<Address>,
    /// Number of decimals used to scale raw amounts
    pub decimals: u8,
}

/// Where an asset's balance and transfers live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Native,
    Token(Address),
}

impl AssetDescriptor {
    pub const fn native(symbol: &'static str, decimals: u8) -> Self {
        Self {
            symbol,
            contract_address: None,
            decimals,
        }
    }

    pub const fn token(symbol: &'static str, contract_address: Address, decimals: u8) -> Self {
        Self {
            symbol,
            contract_address: Some(contract_address),
            decimals,
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self.contract_address {
            Some(address) => AssetKind::Token(address),
            None => AssetKind::Native,
        }
    }
}

/// Native ether.
pub const ETH_ASSET: AssetDescriptor = AssetDescriptor::native("ETH", 18);

/// Circle's USDC on Ethereum mainnet.
pub const USDC_ASSET: AssetDescriptor = AssetDescriptor::token(
    "USDC",
    address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
    6,
);

/// Tether's USDT on Ethereum mainnet.
pub const USDT_ASSET: AssetDescriptor = AssetDescriptor::token(
    "USDT",
    address!("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
    6,
);

/// Immutable mapping from a supported chain to the assets reported for it.
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    chain: Chain,
    assets: Vec<AssetDescriptor>,
}

impl AssetRegistry {
    /// Registry for the given chain, with preloaded token precisions.
    pub fn for_chain(chain: Chain) -> Self {
        let assets = match chain {
            Chain::Ethereum => vec![ETH_ASSET, USDC_ASSET, USDT_ASSET],
        };
        Self { chain, assets }
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn assets(&self) -> &[AssetDescriptor] {
        &self.assets
    }

    /// Consume the registry and return one with each asset mapped through `f`.
    pub(crate) fn map_assets(self, f: impl FnMut(AssetDescriptor) -> AssetDescriptor) -> Self {
        Self {
            chain: self.chain,
            assets: self.assets.into_iter().map(f).collect(),
        }
    }
}

// =============================================================================
// Log scanning
// =============================================================================

/// Inclusive block range `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub from: u64,
    pub to: u64,
}

impl BlockRange {
    pub const fn new(from: u64, to: u64) -> Self {
        Self { from, to }
    }
}

/// Parameters of one `eth_getLogs` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Emitting address the logs are scoped to
    pub address: Address,
    /// topic0
    pub event_signature: B256,
    /// topic1 constraint (indexed `from` of a Transfer), wildcard when None
    pub sender: Option<B256>,
    pub range: BlockRange,
}

/// A Transfer log as returned by the RPC provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferLogEvent {
    pub block_number: Option<u64>,
    pub transaction_index: Option<u64>,
    /// Non-indexed data; for a Transfer this is the uint256 value
    pub data: Bytes,
    pub topics: Vec<B256>,
}

impl From<&alloy::rpc::types::Log> for TransferLogEvent {
    fn from(log: &alloy::rpc::types::Log) -> Self {
        Self {
            block_number: log.block_number,
            transaction_index: log.transaction_index,
            data: log.data().data.clone(),
            topics: log.topics().to_vec(),
        }
    }
}
