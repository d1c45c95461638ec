//! The bus contract collaborators program against.

use super::Handler;
use crate::error::BusError;
use crate::message::Message;

/// Typed publish/subscribe contract.
///
/// Senders and subscribers only ever see this trait, so the same component
/// works with a plain [`MessageBus`](crate::MessageBus) or with a
/// [`MarshalingBus`](crate::MarshalingBus) that runs handlers elsewhere.
///
/// ## Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use typed_bus::{Bus, MessageBus};
///
/// struct Initialized;
/// typed_bus::message!(Initialized);
///
/// fn wire(bus: &impl Bus, ready: Arc<AtomicBool>) {
///     bus.subscribe::<Initialized>(move || ready.store(true, Ordering::SeqCst));
/// }
///
/// let bus = MessageBus::new();
/// let ready = Arc::new(AtomicBool::new(false));
/// wire(&bus, Arc::clone(&ready));
///
/// bus.send(Initialized).unwrap();
/// assert!(ready.load(Ordering::SeqCst));
/// ```
pub trait Bus {
    /// Deliver a message to every handler declared for its type or one of its
    /// supertypes.
    fn send<M: Message>(&self, message: M) -> Result<(), BusError>;

    /// Like [`send`](Bus::send), for a message that may be absent.
    fn try_send<M: Message>(&self, message: Option<M>) -> Result<(), BusError> {
        match message {
            Some(message) => self.send(message),
            None => Err(BusError::NullMessage {
                parameter: "message",
            }),
        }
    }

    /// Register `handler` for `M`. Registering the same handler twice yields
    /// two registrations. Ignored once the bus is closed.
    fn subscribe_handler<M: ?Sized + 'static>(&self, handler: &Handler<M>);

    /// Register an action that runs whenever an `M` is sent.
    fn subscribe<M: ?Sized + 'static>(
        &self,
        action: impl Fn() + Send + Sync + 'static,
    ) -> Handler<M> {
        let handler = Handler::new(action);
        self.subscribe_handler(&handler);
        handler
    }

    /// Register an action that receives every `M` sent.
    fn subscribe_with<M: ?Sized + 'static>(
        &self,
        action: impl Fn(&M) + Send + Sync + 'static,
    ) -> Handler<M> {
        let handler = Handler::with_message(action);
        self.subscribe_handler(&handler);
        handler
    }

    /// Remove one registration of `handler` under `M`. Unknown handlers are
    /// ignored.
    fn unsubscribe<M: ?Sized + 'static>(&self, handler: &Handler<M>);

    /// Like [`unsubscribe`](Bus::unsubscribe), for a handler that may be
    /// absent.
    fn try_unsubscribe<M: ?Sized + 'static>(
        &self,
        handler: Option<&Handler<M>>,
    ) -> Result<(), BusError> {
        match handler {
            Some(handler) => {
                self.unsubscribe(handler);
                Ok(())
            }
            None => Err(BusError::NullHandler {
                parameter: "handler",
            }),
        }
    }

    /// Drop every registration and refuse new ones, permanently.
    fn close(&self);

    fn is_closed(&self) -> bool;
}
