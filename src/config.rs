// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `INFURA_PROJECT_ID` | Infura project id for the mainnet RPC URL | Required unless `ETH_RPC_URL` is set |
//! | `ETH_RPC_URL` | Explicit JSON-RPC URL, overrides Infura | unset |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3001` |
//! | `EXPOSE_TRANSFER_VOLUME` | Return `transferVolumeLast24h` | `false` |
//! | `BATCH_TOKEN_LOGS` | Batch token log scans like native scans | `false` |
//! | `RESOLVE_TOKEN_DECIMALS` | Query token `decimals()` once at startup | `false` |
//! | `VOLUME_WINDOW_BLOCKS` | Blocks in the volume window | `7200` |
//! | `LOG_BATCH_SIZE` | Blocks per `eth_getLogs` batch | `100` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;

use crate::{
    blockchain::NetworkConfig,
    volume::{TokenScan, VolumeSettings, DEFAULT_BATCH_SIZE, DEFAULT_WINDOW_BLOCKS},
};

/// Environment variable name for the Infura project identifier.
pub const INFURA_PROJECT_ID_ENV: &str = "INFURA_PROJECT_ID";

/// Environment variable name for an explicit RPC endpoint.
///
/// Takes precedence over `INFURA_PROJECT_ID`; useful for local nodes.
pub const ETH_RPC_URL_ENV: &str = "ETH_RPC_URL";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const EXPOSE_TRANSFER_VOLUME_ENV: &str = "EXPOSE_TRANSFER_VOLUME";
pub const BATCH_TOKEN_LOGS_ENV: &str = "BATCH_TOKEN_LOGS";
pub const RESOLVE_TOKEN_DECIMALS_ENV: &str = "RESOLVE_TOKEN_DECIMALS";
pub const VOLUME_WINDOW_BLOCKS_ENV: &str = "VOLUME_WINDOW_BLOCKS";
pub const LOG_BATCH_SIZE_ENV: &str = "LOG_BATCH_SIZE";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// Settings loaded from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rpc_url: String,
    /// Kept so the project id can be redacted from logged URLs
    infura_project_id: Option<String>,
    pub host: String,
    pub port: u16,
    pub expose_transfer_volume: bool,
    pub resolve_token_decimals: bool,
    pub volume: VolumeSettings,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env(network: &NetworkConfig) -> Result<Self, ConfigError> {
        Self::from_lookup(network, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(
        network: &NetworkConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let infura_project_id = get(INFURA_PROJECT_ID_ENV);
        let rpc_url = match (get(ETH_RPC_URL_ENV), &infura_project_id) {
            (Some(url), _) => url,
            (None, Some(project_id)) => network.infura_url(project_id),
            (None, None) => return Err(ConfigError::Missing(INFURA_PROJECT_ID_ENV)),
        };

        let port = match get(PORT_ENV) {
            Some(raw) => parse_value(PORT_ENV, &raw)?,
            None => DEFAULT_PORT,
        };

        let window_blocks = match get(VOLUME_WINDOW_BLOCKS_ENV) {
            Some(raw) => parse_value(VOLUME_WINDOW_BLOCKS_ENV, &raw)?,
            None => DEFAULT_WINDOW_BLOCKS,
        };

        let batch_size = match get(LOG_BATCH_SIZE_ENV) {
            Some(raw) => match parse_value::<u64>(LOG_BATCH_SIZE_ENV, &raw)? {
                0 => return Err(ConfigError::invalid(LOG_BATCH_SIZE_ENV, &raw)),
                n => n,
            },
            None => DEFAULT_BATCH_SIZE,
        };

        let token_scan = if parse_flag(BATCH_TOKEN_LOGS_ENV, get(BATCH_TOKEN_LOGS_ENV))? {
            TokenScan::Batched
        } else {
            TokenScan::SingleQuery
        };

        Ok(Self {
            rpc_url,
            infura_project_id,
            host: get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            expose_transfer_volume: parse_flag(
                EXPOSE_TRANSFER_VOLUME_ENV,
                get(EXPOSE_TRANSFER_VOLUME_ENV),
            )?,
            resolve_token_decimals: parse_flag(
                RESOLVE_TOKEN_DECIMALS_ENV,
                get(RESOLVE_TOKEN_DECIMALS_ENV),
            )?,
            volume: VolumeSettings {
                window_blocks,
                batch_size,
                token_scan,
            },
        })
    }

    /// Socket address to bind the HTTP server to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| ConfigError::invalid(HOST_ENV, &self.host))
    }

    /// RPC URL safe for logging: the Infura project id is masked.
    pub fn redacted_rpc_url(&self) -> String {
        match &self.infura_project_id {
            Some(project_id) => self.rpc_url.replace(project_id.as_str(), "***"),
            None => self.rpc_url.clone(),
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::invalid(key, raw))
}

fn parse_flag(key: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::invalid(key, raw.as_deref().unwrap_or_default())),
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
        }
    }
}
