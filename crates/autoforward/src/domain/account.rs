//! # Account Model
//!
//! Account kinds handled by the forwarding engine and the rules governing
//! the upgrade of a plain ledger account into an auto-forwarding account.

use super::errors::{Address, ForwardingError};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// Required length of a mint recipient, in bytes.
pub const MINT_RECIPIENT_LEN: usize = 32;

/// Required length of a non-empty destination caller, in bytes.
pub const DESTINATION_CALLER_LEN: usize = 32;

/// Properties configuring a cross-chain forwarding account.
///
/// Immutable once the account is created: the full set of properties is
/// hashed into the account address, so two property sets with identical
/// bytes always derive the same account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProperties {
    /// Target domain identifier for cross-chain transfers.
    pub destination_domain: u32,
    /// Address where tokens will be minted on the destination chain.
    pub mint_recipient: Vec<u8>,
    /// Native address receiving manually cleared funds.
    pub fallback_recipient: String,
    /// Optional address allowed to finalize transfers on the destination
    /// chain. Empty means anyone can finalize.
    pub destination_caller: Vec<u8>,
}

/// Public-key slot of a ledger account.
///
/// `Marker` is not a cryptographic key: it tags an address as a forwarding
/// account that was never spendable. Signature verification against it is
/// unreachable by construction.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKey {
    /// Non-cryptographic placeholder bound 1:1 to the account address.
    Marker(#[serde_as(as = "Bytes")] Address),
    /// A real signing key, opaque to this module.
    Secp256k1(Vec<u8>),
}

impl AccountKey {
    /// Signature verification entry point of the key slot.
    ///
    /// # Panics
    ///
    /// Always panics for `Marker`: the marker key is a state tag, never a
    /// credential, and no execution path may verify against it.
    pub fn verify_signature(&self, _msg: &[u8], _sig: &[u8]) -> bool {
        match self {
            AccountKey::Marker(_) => {
                panic!("verify_signature must never be invoked on a forwarding marker key")
            }
            // Real key verification belongs to the host's auth layer.
            AccountKey::Secp256k1(_) => false,
        }
    }

    /// Whether this is the marker key bound to `address`.
    pub fn is_marker_for(&self, address: &Address) -> bool {
        matches!(self, AccountKey::Marker(key) if key == address)
    }
}

/// Generic ledger account: identity, sequence number and public-key slot.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAccount {
    /// Account address.
    #[serde_as(as = "Bytes")]
    pub address: Address,
    /// Public key, unset until the account first signs.
    pub pub_key: Option<AccountKey>,
    /// Directory-assigned account number.
    pub account_number: u64,
    /// Transaction sequence number.
    pub sequence: u64,
}

impl BaseAccount {
    /// Create a fresh account with no key and a zero sequence.
    pub fn new(address: Address, account_number: u64) -> Self {
        Self {
            address,
            pub_key: None,
            account_number,
            sequence: 0,
        }
    }

    /// Whether this plain account may be upgraded into a forwarding account.
    ///
    /// Eligible accounts are either pristine (no key ever set and a zero
    /// sequence) or already tagged with the marker key bound to `address`.
    /// Any self-initiated activity makes the upgrade fail permanently.
    pub fn is_eligible_for_upgrade(&self, address: &Address) -> bool {
        let is_pristine = self.pub_key.is_none() && self.sequence == 0;
        let is_marked = self
            .pub_key
            .as_ref()
            .is_some_and(|key| key.is_marker_for(address));

        is_pristine || is_marked
    }
}

/// Auto-forwarding account: a plain account upgraded in place with the
/// forwarding properties. Terminal state in the account lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingAccount {
    /// Underlying ledger account, always carrying the marker key.
    pub base: BaseAccount,
    /// Target domain identifier.
    pub destination_domain: u32,
    /// Destination-chain mint recipient (32 bytes).
    pub mint_recipient: Vec<u8>,
    /// Native fallback recipient for manual clearing.
    pub fallback_recipient: String,
    /// Optional destination caller restriction (32 bytes or empty).
    pub destination_caller: Vec<u8>,
}

impl ForwardingAccount {
    /// Upgrade `base` with the given properties, binding the marker key to
    /// the account address.
    pub fn new(mut base: BaseAccount, properties: AccountProperties) -> Self {
        base.pub_key = Some(AccountKey::Marker(base.address));

        Self {
            base,
            destination_domain: properties.destination_domain,
            mint_recipient: properties.mint_recipient,
            fallback_recipient: properties.fallback_recipient,
            destination_caller: properties.destination_caller,
        }
    }

    /// Account address.
    pub fn address(&self) -> Address {
        self.base.address
    }
}

/// Tagged union over the account kinds known to the account directory.
///
/// `Module` stands in for any specialized, non-upgradable account type a
/// host ledger may store at an address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRecord {
    /// Plain ledger account.
    Base(BaseAccount),
    /// Auto-forwarding account (terminal).
    Forwarding(ForwardingAccount),
    /// Specialized module-owned account, never upgradable.
    Module(BaseAccount),
}

impl AccountRecord {
    /// Address of the underlying account.
    pub fn address(&self) -> Address {
        match self {
            AccountRecord::Base(account) | AccountRecord::Module(account) => account.address,
            AccountRecord::Forwarding(account) => account.base.address,
        }
    }
}

/// Validate a mint recipient: exactly 32 bytes, not all-zero.
pub fn validate_mint_recipient(recipient: &[u8]) -> Result<(), ForwardingError> {
    if recipient.len() != MINT_RECIPIENT_LEN || recipient.iter().all(|b| *b == 0) {
        return Err(ForwardingError::InvalidMintRecipient(
            "must be 32 bytes different than the zero address".to_string(),
        ));
    }
    Ok(())
}

/// Validate a destination caller: empty, or exactly 32 bytes and not
/// all-zero.
pub fn validate_destination_caller(caller: &[u8]) -> Result<(), ForwardingError> {
    if !caller.is_empty()
        && (caller.len() != DESTINATION_CALLER_LEN || caller.iter().all(|b| *b == 0))
    {
        return Err(ForwardingError::InvalidDestinationCaller(
            "must be 32 bytes different than the zero address".to_string(),
        ));
    }
    Ok(())
}
