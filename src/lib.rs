//! In-process typed message bus.
//!
//! Components subscribe to a message type; a sender delivers a message to
//! every handler declared for its type or for one of its supertypes. See
//! [`bus`] for the dispatch model, [`message`] for declaring messages and
//! their supertypes, and [`dispatch`] for running handlers on another
//! execution context.

pub mod bus;
pub mod dispatch;
mod error;
pub mod message;

pub use bus::{Bus, BusState, Handler, MarshalingBus, MessageBus};
pub use dispatch::{
    Dispatcher, DispatcherConfig, DispatcherStats, ImmediateDispatcher, Job, Priority,
    ThreadDispatcher, ThreadDispatcherHandle,
};
#[cfg(feature = "tokio")]
pub use dispatch::TokioDispatcher;
pub use error::BusError;
pub use message::{AsAny, Message, Supertype, TypeKey};
