// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Balance Reader
//!
//! Reads the current balance of an asset for a wallet and renders it in
//! decimal units using the asset's precision.
//!
//! - Native ETH uses `eth_getBalance`.
//! - ERC-20 tokens use an `eth_call` of `balanceOf(address)`.

use alloy::primitives::{Address, U256};

use crate::blockchain::{
    erc20, format_balance, units::MAX_DECIMALS, AssetDescriptor, AssetKind, AssetRegistry,
    ChainRpc, RpcClientError,
};

/// Raw balance of `asset` held by `wallet`, in the asset's smallest unit.
pub async fn read_balance(
    rpc: &dyn ChainRpc,
    asset: &AssetDescriptor,
    wallet: Address,
) -> Result<U256, RpcClientError> {
    match asset.kind() {
        AssetKind::Native => rpc.get_balance(wallet).await,
        AssetKind::Token(contract) => {
            let output = rpc
                .call_contract_view(contract, erc20::balance_of_calldata(wallet))
                .await?;
            erc20::decode_balance_of(&output)
        }
    }
}

/// Balance of `asset` held by `wallet`, as a decimal string.
pub async fn read_balance_formatted(
    rpc: &dyn ChainRpc,
    asset: &AssetDescriptor,
    wallet: Address,
) -> Result<String, RpcClientError> {
    let raw = read_balance(rpc, asset, wallet).await?;
    tracing::debug!(
        symbol = asset.symbol,
        wallet = %wallet,
        raw = %raw,
        "Read balance"
    );
    Ok(format_balance(raw, asset.decimals))
}

/// Query `decimals()` once for every token in the registry.
///
/// A token whose call fails, or which reports an unusable precision, keeps
/// its preloaded value.
pub async fn resolve_token_decimals(registry: AssetRegistry, rpc: &dyn ChainRpc) -> AssetRegistry {
    let mut resolved = Vec::with_capacity(registry.assets().len());
    for asset in registry.assets() {
        let decimals = match asset.kind() {
            AssetKind::Native => asset.decimals,
            AssetKind::Token(contract) => match query_decimals(rpc, contract).await {
                Ok(decimals) if decimals <= MAX_DECIMALS => {
                    if decimals != asset.decimals {
                        tracing::info!(
                            symbol = asset.symbol,
                            preloaded = asset.decimals,
                            on_chain = decimals,
                            "Token precision differs from preloaded value"
                        );
                    }
                    decimals
                }
                Ok(decimals) => {
                    tracing::warn!(
                        symbol = asset.symbol,
                        decimals,
                        "Token reports unusable precision, keeping preloaded value"
                    );
                    asset.decimals
                }
                Err(e) => {
                    tracing::warn!(
                        symbol = asset.symbol,
                        error = %e,
                        "Failed to query token decimals, keeping preloaded value"
                    );
                    asset.decimals
                }
            },
        };
        resolved.push(decimals);
    }

    let mut resolved = resolved.into_iter();
    registry.map_assets(|asset| AssetDescriptor {
        decimals: resolved.next().unwrap_or(asset.decimals),
        ..asset
    })
}

async fn query_decimals(rpc: &dyn ChainRpc, contract: Address) -> Result<u8, RpcClientError> {
    let output = rpc
        .call_contract_view(contract, erc20::decimals_calldata())
        .await?;
    erc20::decode_decimals(&output)
}
