// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ERC-20 calldata encoding and return decoding.

use alloy::{
    primitives::{Address, Bytes, FixedBytes, U256},
    sol,
    sol_types::SolCall,
};

use super::client::RpcClientError;

// Define the ERC-20 interface using alloy's sol! macro
sol! {
    interface IERC20 {
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);

        event Transfer(address indexed from, address indexed to, uint256 value);
    }
}

/// keccak256("Transfer(address,address,uint256)")
pub const TRANSFER_TOPIC: FixedBytes<32> = FixedBytes::new([
    0xdd, 0xf2, 0x52, 0xad, 0x1b, 0xe2, 0xc8, 0x9b, 0x69, 0xc2, 0xb0, 0x68, 0xfc, 0x37, 0x8d, 0xaa,
    0x95, 0x2b, 0xa7, 0xf1, 0x63, 0xc4, 0xa1, 0x16, 0x28, 0xf5, 0x5a, 0x4d, 0xf5, 0x23, 0xb3, 0xef,
]);

/// Calldata for `balanceOf(owner)`.
pub fn balance_of_calldata(owner: Address) -> Bytes {
    IERC20::balanceOfCall { account: owner }.abi_encode().into()
}

/// Decode the `uint256` returned by `balanceOf`.
pub fn decode_balance_of(data: &[u8]) -> Result<U256, RpcClientError> {
    IERC20::balanceOfCall::abi_decode_returns(data)
        .map_err(|e| RpcClientError::Decode(format!("balanceOf return: {e}")))
}

/// Calldata for `decimals()`.
pub fn decimals_calldata() -> Bytes {
    IERC20::decimalsCall {}.abi_encode().into()
}

/// Decode the `uint8` returned by `decimals`.
pub fn decode_decimals(data: &[u8]) -> Result<u8, RpcClientError> {
    IERC20::decimalsCall::abi_decode_returns(data)
        .map_err(|e| RpcClientError::Decode(format!("decimals return: {e}")))
}
