use crate::request::{
    encode::{fulfillOracleRequestCall, oracleRequestCall},
    encode_oracle_request,
    parse::OracleRequest,
    OracleRequestArgs, RawLog, RunRequest,
};
use crate::config::ORACLE_REQUEST_TOPIC;
use alloy_primitives::{b256, fixed_bytes, Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolEvent};

const SPEC_ID: B256 = b256!("4c7b7ffb66b344fbaa64995af81e355a00000000000000000000000000000000");

#[test]
fn test_selectors() {
    assert_eq!(oracleRequestCall::SELECTOR, [0x40, 0x42, 0x99, 0x46]);
    assert_eq!(fulfillOracleRequestCall::SELECTOR, [0x4a, 0xb0, 0xd1, 0x90]);
}

#[test]
fn test_encode_oracle_request_defaults() {
    let args = OracleRequestArgs::builder()
        .spec_id(SPEC_ID)
        .callback_address(Address::repeat_byte(0x22))
        .callback_function_id(fixed_bytes!("ed53e511"))
        .nonce(U256::from(42))
        .build();

    let calldata = encode_oracle_request(&args);

    assert_eq!(&calldata[..4], &oracleRequestCall::SELECTOR);
    // selector + 8 head words + empty `bytes` length word
    assert_eq!(calldata.len(), 4 + 9 * 32);

    let call = oracleRequestCall::abi_decode(&calldata).unwrap();
    assert_eq!(call.sender, Address::ZERO);
    assert_eq!(call.payment, U256::ZERO);
    assert_eq!(call.specId, SPEC_ID);
    assert_eq!(call.callbackAddress, Address::repeat_byte(0x22));
    assert_eq!(call.callbackFunctionId, fixed_bytes!("ed53e511"));
    assert_eq!(call.nonce, U256::from(42));
    assert_eq!(call.dataVersion, U256::from(1));
    assert!(call.data.is_empty());
}

#[test]
fn test_encode_oracle_request_with_data() {
    let data = Bytes::from_static(&[0x64, b'p', b'a', b't', b'h', 0x63, b'U', b'S', b'D']);
    let args = OracleRequestArgs::builder()
        .payment(U256::from(1_000_000_000_000_000_000u128))
        .spec_id(SPEC_ID)
        .callback_address(Address::repeat_byte(0x22))
        .callback_function_id(fixed_bytes!("ed53e511"))
        .nonce(U256::from(1))
        .data(data.clone())
        .build();

    let call = oracleRequestCall::abi_decode(&encode_oracle_request(&args)).unwrap();

    assert_eq!(call.payment, U256::from(1_000_000_000_000_000_000u128));
    assert_eq!(call.data, data);
}

#[test]
fn test_fulfillment_echoes_request() {
    let event = OracleRequest {
        specId: SPEC_ID,
        requester: Address::repeat_byte(0xAA),
        requestId: B256::repeat_byte(0xBB),
        payment: U256::from(1000),
        callbackAddr: Address::repeat_byte(0xCC),
        callbackFunctionId: fixed_bytes!("ed53e511"),
        cancelExpiration: U256::from(1_700_000_300u64),
        dataVersion: U256::from(1),
        data: Bytes::new(),
    };
    let log = RawLog::new(vec![ORACLE_REQUEST_TOPIC, SPEC_ID], event.encode_data());
    let request = RunRequest::from_log(&log).unwrap();
    let response = B256::right_padding_from(b"hi mom!");

    let calldata = request.fulfillment_calldata(response);
    assert_eq!(calldata.len(), 4 + 6 * 32);

    let call = fulfillOracleRequestCall::abi_decode(&calldata).unwrap();
    assert_eq!(call.requestId, request.id);
    assert_eq!(call.payment, request.payment);
    assert_eq!(call.callbackAddress, request.callback_addr);
    assert_eq!(call.callbackFunctionId, request.callback_func);
    assert_eq!(call.expiration, request.expiration);
    assert_eq!(call.data, response);
}
