//! # AutoForward
//!
//! Address-activated cross-chain forwarding for a token ledger.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Deterministically derived, keyless forwarding accounts that relay every
//! canonical-denom deposit to a destination chain through an external
//! burn-and-mint protocol:
//! - Double-SHA-256 address derivation from the forwarding properties
//! - Deposit interception at the bank layer
//! - End-of-block settlement with per-domain counters
//! - Memo-driven forwarding of inbound transfer packets
//! - Signature bypass for funded signerless registrations
//!
//! ## Module Structure
//!
//! ```text
//! autoforward/
//! ├── domain/          # Accounts, engine, routing, memo, errors
//! ├── algorithms/      # Address derivation
//! ├── ports/           # Inbound messages, outbound host services
//! ├── adapters/        # In-memory port implementations
//! ├── middleware.rs    # Transfer packet middleware
//! └── ante.rs          # Signerless signature gate
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod ante;
pub mod domain;
pub mod middleware;
pub mod ports;

// Re-exports
pub use algorithms::{
    derive_forwarding_address, derive_packet_sender, module_address, MODULE_NAME,
};
pub use ante::{signature_gas, SignerlessGate, Tx, TxMessage, TxVerifier};
pub use domain::{
    AccountKey, AccountProperties, AccountRecord, Address, BaseAccount, Coin, Domain, DomainStats,
    ForwardingAccount, ForwardingConfig, ForwardingDeps, ForwardingEngine, ForwardingError,
    ForwardingEvent, GenesisState, Memo, MemoInstruction, PendingTransfer, PendingTransfers,
};
pub use middleware::{
    Acknowledgement, FungibleTokenPacketData, Packet, PacketMiddleware, PacketModule,
    PassthroughPacketModule,
};
pub use ports::inbound::{
    ForwardingService, MsgClearAccount, MsgRegisterAccount, MsgRegisterAccountResponse,
    MsgRegisterAccountSignerlessly, QueryAddress, QueryAddressResponse,
};
pub use ports::outbound::{
    AccountDirectory, AddressCodec, Bank, BurnRouter, DenomSource, DepositForBurnRequest,
    EventSink, SendRestriction,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
