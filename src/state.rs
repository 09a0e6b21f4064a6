// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    blockchain::{AssetRegistry, ChainRpc},
    config::AppConfig,
    volume::VolumeSettings,
};

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub rpc: Arc<dyn ChainRpc>,
    pub assets: Arc<AssetRegistry>,
    pub volume: VolumeSettings,
    /// Compute and return `transferVolumeLast24h`
    pub expose_transfer_volume: bool,
}

impl AppState {
    pub fn new(rpc: Arc<dyn ChainRpc>, assets: AssetRegistry) -> Self {
        Self {
            rpc,
            assets: Arc::new(assets),
            volume: VolumeSettings::default(),
            expose_transfer_volume: false,
        }
    }

    /// Apply the reporting options from the loaded configuration.
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.volume = config.volume;
        self.expose_transfer_volume = config.expose_transfer_volume;
        self
    }
}
