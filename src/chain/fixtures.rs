// Signed transaction builders shared by unit tests

use alloy::consensus::{SignableTransaction, TxEip1559, TxEnvelope, TxLegacy};
use alloy::primitives::{Address, Bytes, TxKind, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

pub(crate) fn test_signer() -> PrivateKeySigner {
    PrivateKeySigner::random()
}

fn kind(to: Option<Address>) -> TxKind {
    match to {
        Some(addr) => TxKind::Call(addr),
        None => TxKind::Create,
    }
}

pub(crate) fn signed_eip1559(
    signer: &PrivateKeySigner,
    chain_id: u64,
    to: Option<Address>,
    value: U256,
    input: Bytes,
) -> TxEnvelope {
    let tx = TxEip1559 {
        chain_id,
        nonce: 7,
        gas_limit: 250_000,
        max_fee_per_gas: 30_000_000_000,
        max_priority_fee_per_gas: 1_000_000_000,
        to: kind(to),
        value,
        input,
        ..Default::default()
    };
    let signature = signer.sign_hash_sync(&tx.signature_hash()).unwrap();
    tx.into_signed(signature).into()
}

pub(crate) fn signed_legacy(signer: &PrivateKeySigner, chain_id: Option<u64>) -> TxEnvelope {
    let tx = TxLegacy {
        chain_id,
        nonce: 1,
        gas_price: 20_000_000_000,
        gas_limit: 21_000,
        to: TxKind::Call(Address::ZERO),
        value: U256::from(1u64),
        input: Bytes::new(),
    };
    let signature = signer.sign_hash_sync(&tx.signature_hash()).unwrap();
    tx.into_signed(signature).into()
}
