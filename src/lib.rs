// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet Info Server - Ethereum balance and transfer volume service
//!
//! Serves `POST /wallet-info`, reporting a wallet's ETH, USDC and USDT
//! balances and, optionally, the volume of Transfer logs over the trailing
//! ~24 hours.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `balance` - Native and ERC-20 balance reads
//! - `blockchain` - Ethereum JSON-RPC integration
//! - `volume` - Batched Transfer log scanning and summation

pub mod api;
pub mod balance;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod volume;

#[cfg(test)]
pub(crate) mod test_support;
