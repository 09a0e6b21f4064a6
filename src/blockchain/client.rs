// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ethereum JSON-RPC client.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{Filter, TransactionRequest},
};
use async_trait::async_trait;

use super::types::*;

/// Remote calls the balance reader and volume aggregator depend on.
///
/// Every call is a single request with no retry; transport failures surface
/// as [`RpcClientError::Network`].
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Native balance in wei.
    async fn get_balance(&self, address: Address) -> Result<U256, RpcClientError>;

    /// Latest block number.
    async fn get_block_number(&self) -> Result<u64, RpcClientError>;

    /// `eth_call` against `contract` at the latest block.
    async fn call_contract_view(
        &self,
        contract: Address,
        calldata: Bytes,
    ) -> Result<Bytes, RpcClientError>;

    /// `eth_getLogs` for a single query.
    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<TransferLogEvent>, RpcClientError>;
}

/// Ethereum client backed by an alloy HTTP provider.
pub struct EthClient {
    /// Network configuration
    network: NetworkConfig,
    /// Alloy HTTP provider
    provider: DynProvider,
}

impl EthClient {
    /// Create a new client for the specified network and RPC endpoint.
    pub fn new(network: NetworkConfig, rpc_url: &str) -> Result<Self, RpcClientError> {
        let url: url::Url = rpc_url.parse().map_err(|e: url::ParseError| {
            RpcClientError::InvalidRpcUrl(e.to_string())
        })?;

        let provider = ProviderBuilder::new().connect_http(url).erased();

        Ok(Self { network, provider })
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

#[async_trait]
impl ChainRpc for EthClient {
    async fn get_balance(&self, address: Address) -> Result<U256, RpcClientError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| RpcClientError::Network(e.to_string()))
    }

    async fn get_block_number(&self) -> Result<u64, RpcClientError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| RpcClientError::Network(e.to_string()))
    }

    async fn call_contract_view(
        &self,
        contract: Address,
        calldata: Bytes,
    ) -> Result<Bytes, RpcClientError> {
        let tx = TransactionRequest::default()
            .with_to(contract)
            .with_input(calldata);

        self.provider
            .call(tx)
            .await
            .map_err(|e| RpcClientError::Network(e.to_string()))
    }

    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<TransferLogEvent>, RpcClientError> {
        let mut filter = Filter::new()
            .address(query.address)
            .event_signature(query.event_signature)
            .from_block(query.range.from)
            .to_block(query.range.to);
        if let Some(sender) = query.sender {
            filter = filter.topic1(sender);
        }

        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| RpcClientError::Network(e.to_string()))?;

        Ok(logs.iter().map(TransferLogEvent::from).collect())
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    /// Transport failure, error status, or malformed JSON-RPC response.
    #[error("RPC error: {0}")]
    Network(String),

    /// Returned data could not be interpreted.
    #[error("Decode error: {0}")]
    Decode(String),
}
