// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of `POST /wallet-info`, and the validated
//! [`WalletQuery`] built from a request.
//!
//! Reports are `BTreeMap`s keyed by asset symbol so the JSON output has a
//! stable key order (`ETH`, `USDC`, `USDT`).

use std::collections::BTreeMap;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    blockchain::{Chain, UnsupportedChain},
    error::ApiError,
};

/// Asset symbol to decimal-string balance.
pub type BalanceReport = BTreeMap<String, String>;

/// Asset symbol to decimal-string transfer volume.
pub type VolumeReport = BTreeMap<String, String>;

/// Body of `POST /wallet-info`.
///
/// Fields are kept as raw JSON values: a missing or non-string `chain` is
/// reported as an unsupported chain rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfoRequest {
    /// Chain identifier. Only `ethereum` is supported.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "ethereum")]
    pub chain: Option<Value>,
    /// 0x-prefixed, 40 hex character address.
    #[serde(default)]
    #[schema(
        value_type = Option<String>,
        example = "0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12"
    )]
    pub wallet_address: Option<Value>,
}

impl WalletInfoRequest {
    /// Read a request body without regard to `Content-Type`.
    ///
    /// An empty body or a JSON value that is not an object reads as `{}`;
    /// only unparseable JSON is rejected.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value)
                .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}"))),
            Ok(_) => Ok(Self::default()),
            Err(e) => Err(ApiError::bad_request(format!("Invalid JSON body: {e}"))),
        }
    }
}

/// Successful response of `POST /wallet-info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfoResponse {
    pub balances: BalanceReport,
    /// Only present when transfer volume reporting is enabled.
    #[serde(
        rename = "transferVolumeLast24h",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transfer_volume_last_24h: Option<VolumeReport>,
}

/// A validated wallet lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletQuery {
    pub chain: Chain,
    pub wallet_address: Address,
}

impl TryFrom<&WalletInfoRequest> for WalletQuery {
    type Error = ApiError;

    /// The chain is checked first, so an unsupported chain wins over a bad address.
    fn try_from(request: &WalletInfoRequest) -> Result<Self, Self::Error> {
        let chain: Chain = match &request.chain {
            Some(Value::String(raw)) => raw.parse()?,
            _ => return Err(UnsupportedChain.into()),
        };

        let wallet_address = match &request.wallet_address {
            Some(Value::String(raw)) => Some(raw.trim()),
            _ => None,
        }
        .filter(|raw| raw.len() == 42 && raw.starts_with("0x"))
        .and_then(|raw| raw.parse::<Address>().ok())
        .ok_or_else(|| ApiError::bad_request("Invalid wallet address"))?;

        Ok(Self {
            chain,
            wallet_address,
        })
    }
}
