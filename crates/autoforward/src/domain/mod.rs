//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Account model (base, forwarding, module accounts)
//! - The forwarding engine (registration, interception, execution)
//! - Destination-domain routing and recipient parsing
//! - Transfer memo decoding
//! - Per-block pending-transfer ledger
//! - Genesis import/export state
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod account;
pub mod engine;
pub mod errors;
pub mod events;
pub mod genesis;
pub mod memo;
pub mod pending;
pub mod router;
pub mod value_objects;

pub use account::{
    validate_destination_caller, validate_mint_recipient, AccountKey, AccountProperties,
    AccountRecord, BaseAccount, ForwardingAccount, DESTINATION_CALLER_LEN, MINT_RECIPIENT_LEN,
};
pub use engine::{ForwardingConfig, ForwardingDeps, ForwardingEngine};
pub use errors::{Address, ForwardingError};
pub use events::ForwardingEvent;
pub use genesis::GenesisState;
pub use memo::{DepositForBurnMemo, DepositForBurnWithCallerMemo, Memo, MemoInstruction};
pub use pending::{PendingTransfer, PendingTransfers};
pub use router::{
    left_pad_32, validate_and_parse_account_fields, validate_destination_domain, Domain,
};
pub use value_objects::{Coin, DomainStats};
