//! # Inbound Ports
//!
//! Typed messages and queries dispatched by the host, and the service
//! trait the forwarding engine implements to handle them.

use crate::domain::{AccountProperties, DomainStats, ForwardingError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Register a new forwarding account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRegisterAccount {
    /// Transaction signer (any funded account).
    pub signer: String,
    /// Target domain identifier.
    pub destination_domain: u32,
    /// Destination-chain mint recipient (32 bytes).
    pub mint_recipient: Vec<u8>,
    /// Native fallback recipient.
    pub fallback_recipient: String,
    /// Optional destination caller restriction.
    pub destination_caller: Vec<u8>,
}

impl MsgRegisterAccount {
    /// Account properties carried by this message.
    pub fn account_properties(&self) -> AccountProperties {
        AccountProperties {
            destination_domain: self.destination_domain,
            mint_recipient: self.mint_recipient.clone(),
            fallback_recipient: self.fallback_recipient.clone(),
            destination_caller: self.destination_caller.clone(),
        }
    }
}

/// Register a forwarding account without a signature.
///
/// The signer must be the derived address itself; the signature-bypass
/// verifier admits the transaction only once the address is funded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRegisterAccountSignerlessly {
    /// Must equal the address derived from the other fields.
    pub signer: String,
    /// Target domain identifier.
    pub destination_domain: u32,
    /// Destination-chain mint recipient (32 bytes).
    pub mint_recipient: Vec<u8>,
    /// Native fallback recipient.
    pub fallback_recipient: String,
    /// Optional destination caller restriction.
    pub destination_caller: Vec<u8>,
}

impl MsgRegisterAccountSignerlessly {
    /// Account properties carried by this message.
    pub fn account_properties(&self) -> AccountProperties {
        AccountProperties {
            destination_domain: self.destination_domain,
            mint_recipient: self.mint_recipient.clone(),
            fallback_recipient: self.fallback_recipient.clone(),
            destination_caller: self.destination_caller.clone(),
        }
    }
}

/// Response to either registration message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRegisterAccountResponse {
    /// Native address of the forwarding account.
    pub address: String,
}

/// Recover a forwarding account whose settlement failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgClearAccount {
    /// Transaction signer.
    pub signer: String,
    /// Native address of the forwarding account to clear.
    pub address: String,
    /// When true, route the balance straight to the fallback recipient;
    /// when false, re-queue the account for settlement this block.
    pub fallback: bool,
}

/// Query the derived address for a set of properties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAddress {
    /// Target domain identifier.
    pub destination_domain: u32,
    /// Destination-chain mint recipient (32 bytes).
    pub mint_recipient: Vec<u8>,
    /// Native fallback recipient.
    pub fallback_recipient: String,
    /// Optional destination caller restriction.
    pub destination_caller: Vec<u8>,
}

impl QueryAddress {
    /// Account properties carried by this query.
    pub fn account_properties(&self) -> AccountProperties {
        AccountProperties {
            destination_domain: self.destination_domain,
            mint_recipient: self.mint_recipient.clone(),
            fallback_recipient: self.fallback_recipient.clone(),
            destination_caller: self.destination_caller.clone(),
        }
    }
}

/// Response to [`QueryAddress`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAddressResponse {
    /// Deterministically derived native address.
    pub address: String,
    /// Whether a forwarding account already exists there.
    pub exists: bool,
}

/// Forwarding service - inbound port.
pub trait ForwardingService: Send + Sync {
    /// Handle a signed registration.
    fn register_account(
        &self,
        msg: &MsgRegisterAccount,
    ) -> Result<MsgRegisterAccountResponse, ForwardingError>;

    /// Handle a signerless registration.
    fn register_account_signerlessly(
        &self,
        msg: &MsgRegisterAccountSignerlessly,
    ) -> Result<MsgRegisterAccountResponse, ForwardingError>;

    /// Handle a clearing request.
    fn clear_account(&self, msg: &MsgClearAccount) -> Result<(), ForwardingError>;

    /// Derive the address for a set of properties.
    fn address(&self, query: &QueryAddress) -> Result<QueryAddressResponse, ForwardingError>;

    /// Statistics for every destination domain with registered accounts.
    fn stats(&self) -> BTreeMap<u32, DomainStats>;

    /// Statistics for a single destination domain, zero-filled if absent.
    fn stats_by_destination_domain(&self, destination_domain: u32) -> DomainStats;
}
