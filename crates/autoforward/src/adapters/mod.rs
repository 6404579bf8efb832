//! Adapters - concrete implementations of the outbound ports.
//!
//! In-memory implementations suitable for tests and single-process
//! hosts. Production hosts supply their own backed by real state.

pub mod account_store;
pub mod bank;
pub mod burn_router;
pub mod codec;
pub mod denom;
pub mod events;

pub use account_store::InMemoryAccountDirectory;
pub use bank::InMemoryBank;
pub use burn_router::{MockBurnRouter, RecordedBurn};
pub use codec::HexAddressCodec;
pub use denom::FixedDenomSource;
pub use events::RecordingEventSink;
