// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet balance and transfer volume endpoint.

use alloy::primitives::Address;
use axum::{body::Bytes, extract::State, Json};
use futures::future::try_join_all;

use crate::{
    balance::read_balance_formatted,
    blockchain::{AssetDescriptor, ChainRpc, RpcClientError, UnsupportedChain},
    error::ApiError,
    models::{BalanceReport, VolumeReport, WalletInfoRequest, WalletInfoResponse, WalletQuery},
    state::AppState,
    volume::VolumeAggregator,
};

/// Report balances (and optionally 24h transfer volume) for a wallet.
///
/// The body is read as JSON whatever its `Content-Type`, so every rejection
/// carries the `{"error": ...}` shape. Lookups for the different assets run
/// concurrently. The first failure fails the whole request; no partial
/// report is returned.
#[utoipa::path(
    post,
    path = "/wallet-info",
    request_body = WalletInfoRequest,
    tag = "Wallet",
    responses(
        (status = 200, description = "Balances retrieved", body = WalletInfoResponse),
        (status = 400, description = "Unsupported chain, invalid wallet address or malformed JSON"),
        (status = 500, description = "RPC provider failure or malformed chain data")
    )
)]
pub async fn wallet_info(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WalletInfoResponse>, ApiError> {
    let request = WalletInfoRequest::from_body(&body)?;
    let query = WalletQuery::try_from(&request).inspect_err(|e| {
        tracing::info!(chain = ?request.chain, error = %e.message, "Rejected wallet info request");
    })?;
    if query.chain != state.assets.chain() {
        return Err(UnsupportedChain.into());
    }

    let rpc = state.rpc.as_ref();
    let assets = state.assets.assets();
    let wallet = query.wallet_address;

    let volumes = async {
        if state.expose_transfer_volume {
            collect_volumes(rpc, &state, assets, wallet).await.map(Some)
        } else {
            Ok(None)
        }
    };

    let (balances, transfer_volume_last_24h) =
        tokio::try_join!(collect_balances(rpc, assets, wallet), volumes).map_err(|e| {
            tracing::error!(
                chain = %query.chain,
                wallet = %wallet,
                error = %e,
                "Wallet info lookup failed"
            );
            ApiError::from(e)
        })?;

    Ok(Json(WalletInfoResponse {
        balances,
        transfer_volume_last_24h,
    }))
}

async fn collect_balances(
    rpc: &dyn ChainRpc,
    assets: &[AssetDescriptor],
    wallet: Address,
) -> Result<BalanceReport, RpcClientError> {
    let values = try_join_all(
        assets
            .iter()
            .map(|asset| read_balance_formatted(rpc, asset, wallet)),
    )
    .await?;

    Ok(assets
        .iter()
        .map(|asset| asset.symbol.to_string())
        .zip(values)
        .collect())
}

async fn collect_volumes(
    rpc: &dyn ChainRpc,
    state: &AppState,
    assets: &[AssetDescriptor],
    wallet: Address,
) -> Result<VolumeReport, RpcClientError> {
    let aggregator = VolumeAggregator::new(rpc, state.volume);
    let values = try_join_all(
        assets
            .iter()
            .map(|asset| aggregator.transfer_volume_formatted(asset, wallet)),
    )
    .await?;

    Ok(assets
        .iter()
        .map(|asset| asset.symbol.to_string())
        .zip(values)
        .collect())
}
