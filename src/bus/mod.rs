//! Typed message bus.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Bus (contract)                           │
//! │  send / try_send / subscribe / unsubscribe / close           │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌───────────────────────────────┐  ┌──────────────────────────┐
//! │ MessageBus                    │  │ MarshalingBus<D>         │
//! │  - Registry: TypeKey → [H]    │◄─│  - wraps MessageBus      │
//! │  - Open / Closed              │  │  - runs batches on D     │
//! │  - delivers on caller thread  │  │    (Dispatcher)          │
//! └───────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! A send of `M` reaches handlers declared for `M`, for each supertype `M`
//! declares, and for `dyn Message`. A handler declared for a more specific
//! type than the message never runs.

mod bus;
mod handler;
mod marshaling_bus;
mod message_bus;
mod registry;

pub use bus::Bus;
pub(crate) use handler::Callback;
pub use handler::Handler;
pub use marshaling_bus::MarshalingBus;
pub use message_bus::{BusState, MessageBus};
