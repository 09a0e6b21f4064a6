// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{process, sync::Arc};

use wallet_info_server::{
    api::router,
    balance::resolve_token_decimals,
    blockchain::{AssetRegistry, Chain, ChainRpc, EthClient, ETHEREUM_MAINNET},
    config::AppConfig,
    logging::{self, LogFormat},
    state::AppState,
};

#[tokio::main]
async fn main() {
    logging::init(LogFormat::from_env());

    let config = match AppConfig::from_env(&ETHEREUM_MAINNET) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            process::exit(1);
        }
    };

    let client = match EthClient::new(ETHEREUM_MAINNET, &config.rpc_url) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create RPC client");
            process::exit(1);
        }
    };
    tracing::info!(
        network = client.network().name,
        chain_id = client.network().chain_id,
        rpc_url = %config.redacted_rpc_url(),
        "RPC client ready"
    );
    let rpc: Arc<dyn ChainRpc> = Arc::new(client);

    let mut assets = AssetRegistry::for_chain(Chain::Ethereum);
    if config.resolve_token_decimals {
        assets = resolve_token_decimals(assets, rpc.as_ref()).await;
    }

    let state = AppState::new(rpc, assets).with_config(&config);
    let app = router(state);

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "Invalid bind address");
            process::exit(1);
        }
    };
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind listener");
            process::exit(1);
        }
    };

    tracing::info!(
        %addr,
        expose_transfer_volume = config.expose_transfer_volume,
        window_blocks = config.volume.window_blocks,
        batch_size = config.volume.batch_size,
        "Wallet info server listening"
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "HTTP server failed");
        process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
