// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for Ethereum.
//!
//! This module provides functionality for:
//! - Querying native ETH balances
//! - Encoding ERC-20 `balanceOf` / `decimals` reads
//! - Fetching Transfer logs over block ranges

pub mod client;
pub mod erc20;
pub mod types;
pub mod units;

pub use client::{ChainRpc, EthClient, RpcClientError};
pub use types::*;
pub use units::{format_balance, format_units, parse_units};
