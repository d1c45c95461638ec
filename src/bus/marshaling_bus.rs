//! A bus that runs handlers on a dispatcher instead of the sending thread.

use std::any::type_name;
use std::fmt;

use tracing::{debug, trace};

use super::message_bus::deliver;
use super::{Bus, Handler, MessageBus};
use crate::dispatch::{Dispatcher, Priority};
use crate::error::BusError;
use crate::message::Message;

/// Message bus that marshals every delivery onto a [`Dispatcher`].
///
/// Handlers are resolved on the sending thread exactly as
/// [`MessageBus`] resolves them. If any matched, the whole batch is
/// scheduled as one background-priority job; `send` returns as soon as the
/// job is queued. Subscriptions, unsubscriptions and `close` take effect
/// immediately on the wrapped bus.
///
/// ## Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use typed_bus::{Bus, MarshalingBus, ThreadDispatcher};
///
/// struct Redraw;
/// typed_bus::message!(Redraw);
///
/// let ui = ThreadDispatcher::spawn().unwrap();
/// let bus = MarshalingBus::new(ui.handle());
///
/// let on_ui = Arc::new(AtomicBool::new(false));
/// let (flag, ui_thread) = (Arc::clone(&on_ui), ui.handle());
/// bus.subscribe::<Redraw>(move || {
///     flag.store(ui_thread.is_dispatcher_thread(), Ordering::SeqCst);
/// });
///
/// bus.send(Redraw).unwrap();
/// ui.stop();
/// assert!(on_ui.load(Ordering::SeqCst));
/// ```
pub struct MarshalingBus<D> {
    bus: MessageBus,
    dispatcher: D,
}

impl<D> fmt::Debug for MarshalingBus<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarshalingBus")
            .field("state", &self.bus.state())
            .field("len", &self.bus.len())
            .finish()
    }
}

impl<D: Dispatcher> MarshalingBus<D> {
    pub fn new(dispatcher: D) -> Self {
        Self::with_bus(MessageBus::new(), dispatcher)
    }

    /// Wrap an existing bus, keeping its registrations and state.
    pub fn with_bus(bus: MessageBus, dispatcher: D) -> Self {
        Self { bus, dispatcher }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// The wrapped bus, for introspection.
    pub fn inner(&self) -> &MessageBus {
        &self.bus
    }

    pub fn into_parts(self) -> (MessageBus, D) {
        (self.bus, self.dispatcher)
    }
}

impl<D: Dispatcher> Bus for MarshalingBus<D> {
    fn send<M: Message>(&self, message: M) -> Result<(), BusError> {
        let deliveries = self.bus.resolve::<M>();
        if deliveries.is_empty() {
            trace!(message_type = type_name::<M>(), "no handlers, nothing to marshal");
            return Ok(());
        }

        debug!(
            message_type = type_name::<M>(),
            handlers = deliveries.len(),
            "marshaling message"
        );
        self.dispatcher.dispatch(
            Priority::Background,
            Box::new(move || deliver(&message, &deliveries)),
        )
    }

    fn subscribe_handler<M: ?Sized + 'static>(&self, handler: &Handler<M>) {
        self.bus.subscribe_handler(handler);
    }

    fn unsubscribe<M: ?Sized + 'static>(&self, handler: &Handler<M>) {
        self.bus.unsubscribe(handler);
    }

    fn close(&self) {
        self.bus.close();
    }

    fn is_closed(&self) -> bool {
        self.bus.is_closed()
    }
}
