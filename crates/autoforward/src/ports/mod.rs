//! Ports - interfaces between the engine and the outside world.
//!
//! Inbound ports are the message and query surface exposed to hosts;
//! outbound ports are the host services the engine depends on.

pub mod inbound;
pub mod outbound;

pub use inbound::{
    ForwardingService, MsgClearAccount, MsgRegisterAccount, MsgRegisterAccountResponse,
    MsgRegisterAccountSignerlessly, QueryAddress, QueryAddressResponse,
};
pub use outbound::{
    AccountDirectory, AddressCodec, Bank, BurnRouter, DenomSource, DepositForBurnRequest,
    EventSink, SendRestriction,
};
