// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory [`ChainRpc`] used by unit tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use alloy::{
    primitives::{Address, Bytes, B256, U256},
    sol_types::SolCall,
};
use async_trait::async_trait;

use crate::blockchain::{
    erc20::IERC20, ChainRpc, LogQuery, RpcClientError, TransferLogEvent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    GetBalance,
    GetBlockNumber,
    CallContractView,
    GetLogs,
}

/// A log stored by the mock, keyed by emitting address.
struct StoredLog {
    address: Address,
    block_number: u64,
    topics: Vec<B256>,
    data: Bytes,
}

#[derive(Default)]
pub struct MockRpc {
    native_balances: HashMap<Address, U256>,
    token_balances: HashMap<(Address, Address), U256>,
    token_decimals: HashMap<Address, u8>,
    latest_block: u64,
    logs: Vec<StoredLog>,
    fail_on: Option<MockCall>,
    calls: AtomicUsize,
    log_queries: Mutex<Vec<LogQuery>>,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_native_balance(mut self, wallet: Address, balance: U256) -> Self {
        self.native_balances.insert(wallet, balance);
        self
    }

    pub fn with_token_balance(mut self, token: Address, wallet: Address, balance: U256) -> Self {
        self.token_balances.insert((token, wallet), balance);
        self
    }

    pub fn with_token_decimals(mut self, token: Address, decimals: u8) -> Self {
        self.token_decimals.insert(token, decimals);
        self
    }

    pub fn with_latest_block(mut self, block: u64) -> Self {
        self.latest_block = block;
        self
    }

    pub fn with_log(
        mut self,
        address: Address,
        block_number: u64,
        topics: Vec<B256>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.logs.push(StoredLog {
            address,
            block_number,
            topics,
            data: data.into(),
        });
        self
    }

    /// Make every call of the given kind fail with a network error.
    pub fn failing_on(mut self, call: MockCall) -> Self {
        self.fail_on = Some(call);
        self
    }

    /// Total number of remote calls made, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn log_queries(&self) -> Vec<LogQuery> {
        self.log_queries.lock().unwrap().clone()
    }

    fn enter(&self, call: MockCall) -> Result<(), RpcClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some(call) {
            return Err(RpcClientError::Network(format!(
                "mock {call:?} unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainRpc for MockRpc {
    async fn get_balance(&self, address: Address) -> Result<U256, RpcClientError> {
        self.enter(MockCall::GetBalance)?;
        Ok(self
            .native_balances
            .get(&address)
            .copied()
            .unwrap_or_default())
    }

    async fn get_block_number(&self) -> Result<u64, RpcClientError> {
        self.enter(MockCall::GetBlockNumber)?;
        Ok(self.latest_block)
    }

    async fn call_contract_view(
        &self,
        contract: Address,
        calldata: Bytes,
    ) -> Result<Bytes, RpcClientError> {
        self.enter(MockCall::CallContractView)?;

        let word = if calldata.starts_with(&IERC20::balanceOfCall::SELECTOR) {
            let call = IERC20::balanceOfCall::abi_decode(&calldata)
                .map_err(|e| RpcClientError::Decode(e.to_string()))?;
            self.token_balances
                .get(&(contract, call.account))
                .copied()
                .unwrap_or_default()
        } else if calldata.starts_with(&IERC20::decimalsCall::SELECTOR) {
            match self.token_decimals.get(&contract) {
                Some(decimals) => U256::from(*decimals),
                None => return Err(RpcClientError::Network("execution reverted".into())),
            }
        } else {
            return Err(RpcClientError::Network("unknown selector".into()));
        };

        Ok(Bytes::from(word.to_be_bytes::<32>().to_vec()))
    }

    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<TransferLogEvent>, RpcClientError> {
        self.enter(MockCall::GetLogs)?;
        self.log_queries.lock().unwrap().push(query.clone());

        Ok(self
            .logs
            .iter()
            .filter(|log| log.address == query.address)
            .filter(|log| log.block_number >= query.range.from && log.block_number <= query.range.to)
            .filter(|log| log.topics.first() == Some(&query.event_signature))
            .filter(|log| match query.sender {
                Some(sender) => log.topics.get(1) == Some(&sender),
                None => true,
            })
            .map(|log| TransferLogEvent {
                block_number: Some(log.block_number),
                transaction_index: Some(0),
                data: log.data.clone(),
                topics: log.topics.clone(),
            })
            .collect())
    }
}
