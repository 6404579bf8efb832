//! Deterministic derivation algorithms.
//!
//! Double-SHA-256 module-scoped address derivation. Everything here is a
//! pure function of its inputs so every node derives the same addresses.

pub mod derive;

pub use derive::{
    derive_forwarding_address, derive_packet_sender, module_address, MODULE_NAME,
};
