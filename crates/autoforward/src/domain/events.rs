//! Events emitted by the forwarding engine.

use serde::{Deserialize, Serialize};

/// Typed events surfaced to the host's event manager.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForwardingEvent {
    /// A forwarding account was registered.
    AccountRegistered {
        /// Native address of the new account.
        address: String,
        /// Target domain identifier.
        destination_domain: u32,
        /// Destination-chain mint recipient.
        mint_recipient: Vec<u8>,
        /// Native fallback recipient.
        fallback_recipient: String,
        /// Optional destination caller restriction.
        destination_caller: Vec<u8>,
        /// Whether registration went through the signerless path.
        signerlessly: bool,
    },
    /// An account balance was manually cleared to its fallback recipient.
    AccountCleared {
        /// Native address of the cleared account.
        address: String,
        /// Native address that received the funds.
        receiver: String,
    },
}
