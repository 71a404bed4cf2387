//! Oracle run requests.
//!
//! A consumer contract asks for data by sending LINK to the oracle with `transferAndCall`. The
//! oracle records the request and emits an `OracleRequest` event, which the node turns into a
//! [`RunRequest`]. Once the job has run, [`RunRequest::fulfillment_calldata`] builds the call
//! that hands the answer back.

pub mod encode;
pub mod parse;

use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cbor::{self, CborError, CborMap};

pub use encode::{encode_fulfillment, encode_oracle_request, OracleRequestArgs};
pub use parse::{decode_run_abi, decode_run_request, RunAbi};

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("no log found to decode")]
    MissingLog,
    #[error("log has no topic at slot {0}")]
    MissingTopic(usize),
    #[error("failed to decode log data: {0}")]
    Abi(#[from] alloy_sol_types::Error),
    #[error("data version {0} does not fit in a u64")]
    DataVersionOverflow(U256),
}

/// A raw event log: indexed topics plus the ABI-encoded data body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLog {
    pub topics: Vec<B256>,
    pub data: Bytes,
}

impl RawLog {
    pub fn new(topics: Vec<B256>, data: impl Into<Bytes>) -> Self {
        Self { topics, data: data.into() }
    }

    /// Topic at `slot`, if the log has one.
    #[inline]
    pub fn topic(&self, slot: usize) -> Option<B256> {
        self.topics.get(slot).copied()
    }
}

/// A decoded oracle job invocation.
///
/// `job_id` and `topic` come from the log's topic slots; every other field is decoded from the
/// data body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub requester: Address,
    pub id: B256,
    pub payment: U256,
    pub callback_addr: Address,
    pub callback_func: FixedBytes<4>,
    pub expiration: U256,
    pub data_version: u64,
    /// CBOR parameter map, with its delimiters restored.
    pub data: Bytes,
    pub job_id: B256,
    pub topic: B256,
}

impl RunRequest {
    /// Decode a request from an `OracleRequest` event log.
    #[inline]
    pub fn from_log(log: &RawLog) -> Result<Self, RequestError> {
        parse::from_log(log)
    }

    /// Decode the first `OracleRequest` log among a transaction's receipt logs.
    pub fn from_receipt_logs(logs: &[RawLog]) -> Result<Self, RequestError> {
        parse::from_receipt_logs(logs)
    }

    /// Parse the job parameters carried in [`data`](Self::data).
    pub fn params(&self) -> Result<CborMap, CborError> {
        cbor::parse_params(&self.data)
    }

    /// Calldata for `fulfillOracleRequest`, answering this request with `response`.
    #[inline]
    pub fn fulfillment_calldata(&self, response: B256) -> Bytes {
        encode::encode_fulfillment(self, response)
    }
}
