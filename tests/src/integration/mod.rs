//! Cross-module flows: registration, deposits, settlement, clearing,
//! packet middleware and genesis.

mod clearing;
mod lifecycle;
mod signerless;
