//! # Signature Gate
//!
//! Transaction admission for signerless registrations. A transaction that
//! carries exactly one signerless registration, signed as the derived
//! address and with that address already funded to the protocol minimum,
//! skips signature verification; everything else goes to the underlying
//! verifier.

use crate::algorithms::derive_forwarding_address;
use crate::domain::{AccountKey, ForwardingEngine, ForwardingError};
use std::sync::Arc;
use tracing::debug;

/// Gas charged for verifying a secp256k1 signature.
const SECP256K1_VERIFY_GAS: u64 = 1_000;

/// Messages a transaction can carry, as seen by the gate.
#[derive(Clone, Debug)]
pub enum TxMessage {
    /// Signed registration.
    RegisterAccount(crate::ports::inbound::MsgRegisterAccount),
    /// Signerless registration.
    RegisterAccountSignerlessly(crate::ports::inbound::MsgRegisterAccountSignerlessly),
    /// Clearing request.
    ClearAccount(crate::ports::inbound::MsgClearAccount),
}

/// A decoded transaction.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Messages in execution order.
    pub messages: Vec<TxMessage>,
}

/// Signature verification stage, implemented by the host.
pub trait TxVerifier: Send + Sync {
    /// Verify the transaction's signatures.
    fn verify(&self, tx: &Tx) -> Result<(), ForwardingError>;
}

/// Signature verifier that admits funded signerless registrations without
/// a signature check.
pub struct SignerlessGate<V: TxVerifier> {
    engine: Arc<ForwardingEngine>,
    underlying: V,
}

impl<V: TxVerifier> SignerlessGate<V> {
    /// Wrap an underlying verifier.
    pub fn new(engine: Arc<ForwardingEngine>, underlying: V) -> Self {
        Self { engine, underlying }
    }

    /// Verify a transaction, bypassing the underlying verifier when the
    /// signerless criteria hold.
    pub fn verify(&self, tx: &Tx) -> Result<(), ForwardingError> {
        if self.is_eligible_for_bypass(tx) {
            debug!("[autoforward] admitting funded signerless registration");
            return Ok(());
        }

        self.underlying.verify(tx)
    }

    /// The bypass applies only to a transaction that is exactly one
    /// signerless registration, self-signed by the derived address, with
    /// that address funded to at least the protocol minimum.
    fn is_eligible_for_bypass(&self, tx: &Tx) -> bool {
        let [TxMessage::RegisterAccountSignerlessly(msg)] = tx.messages.as_slice() else {
            return false;
        };

        let derived = derive_forwarding_address(&msg.account_properties());
        if msg.signer != self.engine.native_address(&derived) {
            return false;
        }

        self.engine.canonical_balance(&derived) >= self.engine.minimum_transfer_amount()
    }
}

/// Gas cost of verifying a signature made with the given key.
///
/// Forwarding marker keys never verify, so they never cost gas.
pub fn signature_gas(key: &AccountKey) -> u64 {
    match key {
        AccountKey::Marker(_) => 0,
        AccountKey::Secp256k1(_) => SECP256K1_VERIFY_GAS,
    }
}
