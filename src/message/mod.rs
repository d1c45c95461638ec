//! Message types and the type relations the bus dispatches on.
//!
//! A message is any `'static + Send` type implementing [`Message`]. Besides its
//! own concrete type, a message can be delivered as any of the supertypes it
//! declares, and always as `dyn Message`:
//!
//! ```text
//!            dyn Message               <- every message
//!                 │
//!          dyn OrderEvent              <- declared via message!(...: dyn OrderEvent)
//!           ┌─────┴──────┐
//!     OrderPlaced   OrderShipped       <- concrete message types
//! ```
//!
//! ## Declaring messages
//!
//! ```
//! use typed_bus::{message, Message};
//!
//! pub trait OrderEvent: Message {
//!     fn order_id(&self) -> u64;
//! }
//!
//! pub struct OrderPlaced {
//!     pub id: u64,
//! }
//!
//! impl OrderEvent for OrderPlaced {
//!     fn order_id(&self) -> u64 {
//!         self.id
//!     }
//! }
//!
//! pub struct Heartbeat;
//!
//! message!(OrderPlaced: dyn OrderEvent);
//! message!(Heartbeat);
//! ```

mod message;
mod supertype;
mod type_key;

pub use message::{AsAny, Message};
pub use supertype::Supertype;
pub(crate) use supertype::{routes, DeliverFn};
pub use type_key::TypeKey;

/// Implements [`Message`] for a type, optionally declaring the supertypes
/// (usually trait objects the type implements) it is delivered as.
///
/// Supertypes are not followed transitively: for `trait Derived: Base`, a
/// type declared as `dyn Derived` only reaches `dyn Base` handlers if
/// `dyn Base` is listed as well, e.g. `message!(Leaf: dyn Derived, dyn Base)`.
///
/// ```
/// use typed_bus::{message, Message};
///
/// trait Audited: Message {}
///
/// struct UserCreated;
/// impl Audited for UserCreated {}
///
/// message!(UserCreated: dyn Audited);
/// assert_eq!(UserCreated::supertypes().len(), 1);
/// ```
#[macro_export]
macro_rules! message {
    ($ty:ty : $($supertype:ty),+ $(,)?) => {
        impl $crate::Message for $ty {
            fn supertypes() -> ::std::vec::Vec<$crate::Supertype> {
                ::std::vec![$($crate::Supertype::of::<$ty, $supertype>(|message| message)),+]
            }
        }
    };
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::Message for $ty {})+
    };
}
