//! Parsing logic for `OracleRequest` events.

use alloy_primitives::{Address, Bytes, FixedBytes, B256};
use alloy_sol_types::{sol, SolEvent, SolType};

use super::{RawLog, RequestError, RunRequest};
use crate::{cbor::add_cbor_map_delimiters, config::ORACLE_REQUEST_TOPIC};

sol! {
    /// The `OracleRequest` event emitted by the oracle contract.
    #[derive(Debug)]
    event OracleRequest(
        bytes32 indexed specId,
        address requester,
        bytes32 requestId,
        uint256 payment,
        address callbackAddr,
        bytes4 callbackFunctionId,
        uint256 cancelExpiration,
        uint256 dataVersion,
        bytes data
    );
}

/// Data body of the older run log: `(bytes32 jobId, address callbackAddr, bytes4 callbackFunc,
/// bytes data)`.
type RunAbiData = (
    alloy_sol_types::sol_data::FixedBytes<32>,
    alloy_sol_types::sol_data::Address,
    alloy_sol_types::sol_data::FixedBytes<4>,
    alloy_sol_types::sol_data::Bytes,
);

/// Decoded body of the older run log layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunAbi {
    pub job_id: B256,
    pub callback_addr: Address,
    pub callback_func: FixedBytes<4>,
    /// Raw parameter bytes, delimiters not restored.
    pub data: Bytes,
}

/// Decode an optional log, failing with [`RequestError::MissingLog`] when there is none.
pub fn decode_run_request(log: Option<&RawLog>) -> Result<RunRequest, RequestError> {
    log.ok_or(RequestError::MissingLog).and_then(from_log)
}

/// Parse an `OracleRequest` log into a [`RunRequest`].
///
/// Topic 0 is taken as-is and not checked against the event signature, so logs from
/// contracts that re-declare the event under another name still decode.
pub fn from_log(log: &RawLog) -> Result<RunRequest, RequestError> {
    let topic = log.topic(0).ok_or(RequestError::MissingTopic(0))?;
    let job_id = log.topic(1).ok_or(RequestError::MissingTopic(1))?;

    // data layout, one 32-byte head word per field:
    // [0]  requester          address
    // [1]  requestId          bytes32
    // [2]  payment            uint256
    // [3]  callbackAddr       address
    // [4]  callbackFunctionId bytes4
    // [5]  cancelExpiration   uint256
    // [6]  dataVersion        uint256
    // [7]  data               offset of the trailing `bytes`
    let (requester, id, payment, callback_addr, callback_func, expiration, version, data) =
        OracleRequest::abi_decode_data(&log.data)?;

    let data_version =
        u64::try_from(version).map_err(|_| RequestError::DataVersionOverflow(version))?;

    let data = Bytes::from(add_cbor_map_delimiters(&data).into_owned());

    tracing::debug!(
        target: "runlog::request",
        %id,
        %job_id,
        %payment,
        data_version,
        data_len = data.len(),
        "decoded run request"
    );

    Ok(RunRequest {
        requester,
        id,
        payment,
        callback_addr,
        callback_func,
        expiration,
        data_version,
        data,
        job_id,
        topic,
    })
}

/// Decode the first log whose topic 0 is the `OracleRequest` event hash.
pub fn from_receipt_logs(logs: &[RawLog]) -> Result<RunRequest, RequestError> {
    let log = logs.iter().find(|log| log.topic(0) == Some(ORACLE_REQUEST_TOPIC));
    if log.is_none() {
        tracing::debug!(target: "runlog::request", logs = logs.len(), "no OracleRequest log");
    }
    decode_run_request(log)
}

/// Decode the body of the older four-field run log.
pub fn decode_run_abi(log: &RawLog) -> Result<RunAbi, RequestError> {
    let (job_id, callback_addr, callback_func, data) =
        <RunAbiData as SolType>::abi_decode_params(&log.data)?;

    Ok(RunAbi { job_id, callback_addr, callback_func, data })
}
