// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::post, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{
    models::{WalletInfoRequest, WalletInfoResponse},
    state::AppState,
};

pub mod wallet_info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/wallet-info", post(wallet_info::wallet_info))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(wallet_info::wallet_info),
    components(schemas(WalletInfoRequest, WalletInfoResponse)),
    tags(
        (name = "Wallet", description = "Wallet balances and transfer volume")
    )
)]
pub struct ApiDoc;
