//! Calldata for the oracle's request and fulfillment entry points.
//!
//! Built from `sol!` bindings so no compiled contract artifacts are needed.

use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use alloy_sol_types::{sol, SolCall};
use bon::Builder;

use super::RunRequest;
use crate::config::DEFAULT_DATA_VERSION;

sol! {
    /// Oracle entry point reached through `LinkToken.transferAndCall`.
    #[derive(Debug, PartialEq, Eq)]
    function oracleRequest(
        address sender,
        uint256 payment,
        bytes32 specId,
        address callbackAddress,
        bytes4 callbackFunctionId,
        uint256 nonce,
        uint256 dataVersion,
        bytes data
    );

    /// Oracle entry point a node calls to answer a request.
    #[derive(Debug, PartialEq, Eq)]
    function fulfillOracleRequest(
        bytes32 requestId,
        uint256 payment,
        address callbackAddress,
        bytes4 callbackFunctionId,
        uint256 expiration,
        bytes32 data
    );
}

/// Arguments of an `oracleRequest` call.
///
/// `sender` and `payment` are overwritten by the LINK token when the call is relayed through
/// `transferAndCall`, so they default to zero.
#[derive(Debug, Clone, Builder)]
pub struct OracleRequestArgs {
    #[builder(default)]
    sender: Address,
    #[builder(default)]
    payment: U256,
    spec_id: B256,
    callback_address: Address,
    callback_function_id: FixedBytes<4>,
    nonce: U256,
    #[builder(default = U256::from(DEFAULT_DATA_VERSION))]
    data_version: U256,
    /// Parameter block, usually diet CBOR.
    #[builder(default, into)]
    data: Bytes,
}

/// Encode `oracleRequest(...)` calldata: selector followed by the ABI-encoded arguments.
pub fn encode_oracle_request(args: &OracleRequestArgs) -> Bytes {
    let call = oracleRequestCall {
        sender: args.sender,
        payment: args.payment,
        specId: args.spec_id,
        callbackAddress: args.callback_address,
        callbackFunctionId: args.callback_function_id,
        nonce: args.nonce,
        dataVersion: args.data_version,
        data: args.data.clone(),
    };
    Bytes::from(call.abi_encode())
}

/// Encode `fulfillOracleRequest(...)` calldata answering `request` with `response`.
pub fn encode_fulfillment(request: &RunRequest, response: B256) -> Bytes {
    let call = fulfillOracleRequestCall {
        requestId: request.id,
        payment: request.payment,
        callbackAddress: request.callback_addr,
        callbackFunctionId: request.callback_func,
        expiration: request.expiration,
        data: response,
    };
    Bytes::from(call.abi_encode())
}
