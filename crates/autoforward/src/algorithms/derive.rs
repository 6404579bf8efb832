//! # Address Derivation
//!
//! Pure derivation of forwarding account addresses, synthetic packet
//! senders, and the module holding address. No validation happens here;
//! the registrar validates properties before deriving.

use crate::domain::{AccountProperties, Address};
use sha2::{Digest, Sha256};

/// Module name used as the derivation domain for forwarding addresses.
pub const MODULE_NAME: &str = "autoforward";

/// Domain-separated hash: `sha256(sha256(tag) || key)`.
fn derive(tag: &[u8], key: &[u8]) -> [u8; 32] {
    let tag_hash = Sha256::digest(tag);

    let mut hasher = Sha256::new();
    hasher.update(tag_hash);
    hasher.update(key);

    hasher.finalize().into()
}

/// Slice a 32-byte digest down to the ledger's native 20-byte width.
fn truncate(digest: [u8; 32]) -> Address {
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    address
}

/// Derive the forwarding account address for a set of properties.
///
/// The derivation payload is `bigEndian(destination_domain) ||
/// mint_recipient || fallback_recipient || destination_caller`, where an
/// absent destination caller contributes nothing (and therefore derives a
/// different address than a zero-filled one would).
///
/// Referentially transparent and independent of any key material: no
/// private key can ever correspond to the returned address.
pub fn derive_forwarding_address(properties: &AccountProperties) -> Address {
    let mut payload =
        Vec::with_capacity(4 + properties.mint_recipient.len() + properties.fallback_recipient.len());
    payload.extend_from_slice(&properties.destination_domain.to_be_bytes());
    payload.extend_from_slice(&properties.mint_recipient);
    payload.extend_from_slice(properties.fallback_recipient.as_bytes());
    if !properties.destination_caller.is_empty() {
        payload.extend_from_slice(&properties.destination_caller);
    }

    truncate(derive(MODULE_NAME.as_bytes(), &payload))
}

/// Derive the synthetic sender for an inbound packet, keyed on the
/// destination channel and the original sender string.
///
/// Same primitive as forwarding addresses, distinct derivation domain.
pub fn derive_packet_sender(destination_channel: &str, sender: &str) -> Address {
    truncate(derive(destination_channel.as_bytes(), sender.as_bytes()))
}

/// The module's own holding account address.
pub fn module_address() -> Address {
    let digest = Sha256::digest(MODULE_NAME.as_bytes());
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[..20]);
    address
}
