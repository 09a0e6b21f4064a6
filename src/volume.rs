// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Transfer Volume Aggregator
//!
//! Sums the values of ERC-20 `Transfer` logs over the trailing block window
//! (~24 hours on Ethereum at 12 s per block).
//!
//! ## Strategy
//!
//! 1. **Token assets**: one `eth_getLogs` on the token contract, topic0 =
//!    Transfer and topic1 = the wallet padded to 32 bytes, so only transfers
//!    sent by the wallet match. Optionally batched like the native path.
//! 2. **Native ETH**: ether transfers emit no logs, so Transfer logs emitted
//!    at the wallet address itself are scanned in fixed-size block batches.
//!
//! Every value is parsed as a big-endian `uint256` and summed without
//! precision loss. A malformed log or any RPC failure aborts the whole scan.

use alloy::primitives::{Address, U256};

use crate::blockchain::{
    erc20::TRANSFER_TOPIC, format_units, AssetDescriptor, AssetKind, BlockRange, ChainRpc,
    LogQuery, RpcClientError, TransferLogEvent,
};

/// Blocks in the trailing window (~24h at 12 s per block).
pub const DEFAULT_WINDOW_BLOCKS: u64 = 7200;

/// Blocks per `eth_getLogs` request on batched scans.
pub const DEFAULT_BATCH_SIZE: u64 = 100;

/// How token-path logs are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenScan {
    /// One request over the whole window.
    #[default]
    SingleQuery,
    /// Same batching as the native path.
    Batched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeSettings {
    pub window_blocks: u64,
    pub batch_size: u64,
    pub token_scan: TokenScan,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            window_blocks: DEFAULT_WINDOW_BLOCKS,
            batch_size: DEFAULT_BATCH_SIZE,
            token_scan: TokenScan::default(),
        }
    }
}

/// Split `[from, to]` into contiguous, non-overlapping ranges of at most
/// `batch_size` blocks. Empty when `from > to`.
pub fn batch_ranges(from: u64, to: u64, batch_size: u64) -> Vec<BlockRange> {
    let batch_size = batch_size.max(1);
    let mut ranges = Vec::new();
    if from > to {
        return ranges;
    }

    let mut start = from;
    loop {
        let end = start.saturating_add(batch_size - 1).min(to);
        ranges.push(BlockRange::new(start, end));
        if end == to {
            break;
        }
        start = end + 1;
    }
    ranges
}

/// Sum the `uint256` values carried in the data of each Transfer log.
pub fn sum_transfer_values(events: &[TransferLogEvent]) -> Result<U256, RpcClientError> {
    events.iter().try_fold(U256::ZERO, |total, event| {
        let value = transfer_value(event)?;
        total
            .checked_add(value)
            .ok_or_else(|| RpcClientError::Decode("transfer volume overflows uint256".into()))
    })
}

fn transfer_value(event: &TransferLogEvent) -> Result<U256, RpcClientError> {
    if event.data.is_empty() {
        return Err(RpcClientError::Decode(format!(
            "empty log data at block {}",
            display_block(event)
        )));
    }
    U256::try_from_be_slice(&event.data).ok_or_else(|| {
        RpcClientError::Decode(format!(
            "log data of {} bytes at block {} is not a uint256",
            event.data.len(),
            display_block(event)
        ))
    })
}

fn display_block(event: &TransferLogEvent) -> String {
    event
        .block_number
        .map(|b| b.to_string())
        .unwrap_or_else(|| "pending".to_string())
}

/// Transfer volume scanner bound to an RPC handle.
pub struct VolumeAggregator<'a> {
    rpc: &'a dyn ChainRpc,
    settings: VolumeSettings,
}

impl<'a> VolumeAggregator<'a> {
    pub fn new(rpc: &'a dyn ChainRpc, settings: VolumeSettings) -> Self {
        Self { rpc, settings }
    }

    /// Raw transfer volume of `asset` for `wallet` over the trailing window.
    pub async fn transfer_volume(
        &self,
        asset: &AssetDescriptor,
        wallet: Address,
    ) -> Result<U256, RpcClientError> {
        let latest = self.rpc.get_block_number().await?;
        let window = BlockRange::new(latest.saturating_sub(self.settings.window_blocks), latest);

        let events = match asset.kind() {
            AssetKind::Token(contract) => {
                let sender = Some(wallet.into_word());
                match self.settings.token_scan {
                    TokenScan::SingleQuery => {
                        self.rpc
                            .get_logs(&LogQuery {
                                address: contract,
                                event_signature: TRANSFER_TOPIC,
                                sender,
                                range: window,
                            })
                            .await?
                    }
                    TokenScan::Batched => self.scan_batched(contract, sender, window).await?,
                }
            }
            AssetKind::Native => self.scan_batched(wallet, None, window).await?,
        };

        let total = sum_transfer_values(&events)?;
        tracing::debug!(
            symbol = asset.symbol,
            wallet = %wallet,
            from_block = window.from,
            to_block = window.to,
            events = events.len(),
            total = %total,
            "Computed transfer volume"
        );
        Ok(total)
    }

    /// Transfer volume as a decimal string scaled by the asset precision.
    pub async fn transfer_volume_formatted(
        &self,
        asset: &AssetDescriptor,
        wallet: Address,
    ) -> Result<String, RpcClientError> {
        let total = self.transfer_volume(asset, wallet).await?;
        Ok(format_units(total, asset.decimals))
    }

    async fn scan_batched(
        &self,
        address: Address,
        sender: Option<alloy::primitives::B256>,
        window: BlockRange,
    ) -> Result<Vec<TransferLogEvent>, RpcClientError> {
        let mut events = Vec::new();
        for range in batch_ranges(window.from, window.to, self.settings.batch_size) {
            let batch = self
                .rpc
                .get_logs(&LogQuery {
                    address,
                    event_signature: TRANSFER_TOPIC,
                    sender,
                    range,
                })
                .await?;
            tracing::debug!(
                from_block = range.from,
                to_block = range.to,
                events = batch.len(),
                "Scanned log batch"
            );
            events.extend(batch);
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        blockchain::{ETH_ASSET, USDC_ASSET},
        test_support::{MockCall, MockRpc},
    };
    use alloy::primitives::{address, Bytes, B256};

    const WALLET: Address = address!("0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12");
    const OTHER: Address = address!("0x00000000000000000000000000000000000000aa");

    fn usdc() -> Address {
        USDC_ASSET.contract_address.unwrap()
    }

    fn word(value: U256) -> Bytes {
        Bytes::from(value.to_be_bytes::<32>().to_vec())
    }

    fn transfer_topics(from: Address, to: Address) -> Vec<B256> {
        vec![TRANSFER_TOPIC, from.into_word(), to.into_word()]
    }

    fn event(data: impl Into<Bytes>) -> TransferLogEvent {
        TransferLogEvent {
            block_number: Some(1),
            transaction_index: Some(0),
            data: data.into(),
            topics: vec![TRANSFER_TOPIC],
        }
    }

    #[test]
    fn batch_ranges_are_contiguous_and_cover_the_window() {
        assert_eq!(
            batch_ranges(100, 349, 100),
            vec![
                BlockRange::new(100, 199),
                BlockRange::new(200, 299),
                BlockRange::new(300, 349),
            ]
        );
    }

    #[test]
    fn batch_ranges_edge_cases() {
        assert_eq!(batch_ranges(5, 5, 100), vec![BlockRange::new(5, 5)]);
        assert!(batch_ranges(10, 9, 100).is_empty());
        assert_eq!(
            batch_ranges(0, 199, 100),
            vec![BlockRange::new(0, 99), BlockRange::new(100, 199)]
        );
        // Zero batch size degrades to single-block batches.
        assert_eq!(batch_ranges(1, 2, 0).len(), 2);
        assert_eq!(
            batch_ranges(u64::MAX - 1, u64::MAX, 100),
            vec![BlockRange::new(u64::MAX - 1, u64::MAX)]
        );
    }

    #[test]
    fn sum_of_no_events_is_zero() {
        assert_eq!(sum_transfer_values(&[]).unwrap(), U256::ZERO);
    }

    #[test]
    fn sum_is_exact_beyond_f64_precision() {
        let big = U256::from(1u64 << 53) + U256::from(1u64);
        let huge = U256::from(u128::MAX);
        let events = vec![event(word(big)), event(word(huge)), event(word(U256::from(7u64)))];

        let expected = big + huge + U256::from(7u64);
        assert_eq!(sum_transfer_values(&events).unwrap(), expected);
    }

    #[test]
    fn short_data_is_read_big_endian() {
        let events = vec![event(vec![0x01, 0x00])];
        assert_eq!(sum_transfer_values(&events).unwrap(), U256::from(256u64));
    }

    #[test]
    fn malformed_data_fails_the_sum() {
        let empty = sum_transfer_values(&[event(word(U256::from(1u64))), event(Vec::<u8>::new())]);
        assert!(matches!(empty, Err(RpcClientError::Decode(_))));

        let too_long = sum_transfer_values(&[event(vec![0x01; 33])]);
        assert!(matches!(too_long, Err(RpcClientError::Decode(_))));
    }

    #[test]
    fn overflowing_sum_fails() {
        let events = vec![event(word(U256::MAX)), event(word(U256::from(1u64)))];
        assert!(matches!(
            sum_transfer_values(&events),
            Err(RpcClientError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn token_volume_sums_outgoing_transfers_in_window() {
        let rpc = MockRpc::new()
            .with_latest_block(10_000)
            .with_log(usdc(), 9_000, transfer_topics(WALLET, OTHER), word(U256::from(1_500_000u64)))
            .with_log(usdc(), 10_000, transfer_topics(WALLET, OTHER), word(U256::from(250_000u64)))
            // Before the window.
            .with_log(usdc(), 2_799, transfer_topics(WALLET, OTHER), word(U256::from(9_000_000u64)))
            // Incoming, not matched by the sender topic.
            .with_log(usdc(), 9_500, transfer_topics(OTHER, WALLET), word(U256::from(3_000_000u64)));

        let aggregator = VolumeAggregator::new(&rpc, VolumeSettings::default());
        let volume = aggregator
            .transfer_volume_formatted(&USDC_ASSET, WALLET)
            .await
            .unwrap();

        assert_eq!(volume, "1.75");
        let queries = rpc.log_queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].address, usdc());
        assert_eq!(queries[0].sender, Some(WALLET.into_word()));
        assert_eq!(queries[0].range, BlockRange::new(2_800, 10_000));
    }

    #[tokio::test]
    async fn token_volume_can_be_batched() {
        let rpc = MockRpc::new()
            .with_latest_block(349)
            .with_log(usdc(), 150, transfer_topics(WALLET, OTHER), word(U256::from(1u64)))
            .with_log(usdc(), 320, transfer_topics(WALLET, OTHER), word(U256::from(2u64)));
        let settings = VolumeSettings {
            window_blocks: 249,
            token_scan: TokenScan::Batched,
            ..VolumeSettings::default()
        };

        let total = VolumeAggregator::new(&rpc, settings)
            .transfer_volume(&USDC_ASSET, WALLET)
            .await
            .unwrap();

        assert_eq!(total, U256::from(3u64));
        let ranges: Vec<_> = rpc.log_queries().iter().map(|q| q.range).collect();
        assert_eq!(
            ranges,
            vec![
                BlockRange::new(100, 199),
                BlockRange::new(200, 299),
                BlockRange::new(300, 349),
            ]
        );
    }

    #[tokio::test]
    async fn native_volume_scans_wallet_logs_in_batches() {
        let one_eth = U256::from(1_000_000_000_000_000_000u64);
        let rpc = MockRpc::new()
            .with_latest_block(349)
            .with_log(WALLET, 100, transfer_topics(OTHER, OTHER), word(one_eth))
            .with_log(WALLET, 299, transfer_topics(OTHER, OTHER), word(one_eth / U256::from(2u64)))
            .with_log(WALLET, 300, transfer_topics(OTHER, OTHER), word(U256::from(1u64)));
        let settings = VolumeSettings {
            window_blocks: 249,
            ..VolumeSettings::default()
        };

        let volume = VolumeAggregator::new(&rpc, settings)
            .transfer_volume_formatted(&ETH_ASSET, WALLET)
            .await
            .unwrap();

        assert_eq!(volume, "1.500000000000000001");
        let queries = rpc.log_queries();
        assert_eq!(queries.len(), 3);
        assert!(queries.iter().all(|q| q.address == WALLET && q.sender.is_none()));
        // 1 block number + 3 batches
        assert_eq!(rpc.call_count(), 4);
    }

    #[tokio::test]
    async fn empty_window_reports_zero() {
        let rpc = MockRpc::new().with_latest_block(50);

        let aggregator = VolumeAggregator::new(&rpc, VolumeSettings::default());
        assert_eq!(
            aggregator.transfer_volume_formatted(&USDC_ASSET, WALLET).await.unwrap(),
            "0.0"
        );
        assert_eq!(
            aggregator.transfer_volume_formatted(&ETH_ASSET, WALLET).await.unwrap(),
            "0.0"
        );
        // Window saturates at genesis: [0, 50] is a single native batch.
        let native = &rpc.log_queries()[1];
        assert_eq!(native.range, BlockRange::new(0, 50));
    }

    #[tokio::test]
    async fn rpc_failure_aborts_the_scan() {
        let rpc = MockRpc::new().with_latest_block(1_000).failing_on(MockCall::GetLogs);

        let err = VolumeAggregator::new(&rpc, VolumeSettings::default())
            .transfer_volume(&ETH_ASSET, WALLET)
            .await
            .unwrap_err();

        assert!(matches!(err, RpcClientError::Network(_)));
        // Stops at the first failing batch.
        assert_eq!(rpc.call_count(), 2);
    }

    #[tokio::test]
    async fn malformed_log_aborts_the_scan() {
        let rpc = MockRpc::new()
            .with_latest_block(100)
            .with_log(usdc(), 90, transfer_topics(WALLET, OTHER), Vec::<u8>::new());

        let err = VolumeAggregator::new(&rpc, VolumeSettings::default())
            .transfer_volume(&USDC_ASSET, WALLET)
            .await
            .unwrap_err();
        assert!(matches!(err, RpcClientError::Decode(_)));
    }
}
