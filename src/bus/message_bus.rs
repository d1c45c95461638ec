//! The core in-process bus.

use std::any::type_name;
use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::registry::{Delivery, Registry};
use super::{Bus, Handler};
use crate::error::BusError;
use crate::message::Message;

/// Lifecycle of a bus. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusState {
    #[default]
    Open,
    Closed,
}

struct Inner {
    state: BusState,
    registry: Registry,
}

/// In-process message bus with covariant, synchronous delivery.
///
/// Handlers run on the sending thread, in order: handlers declared for the
/// message's own type first, then its declared supertypes, then
/// `dyn Message`; each group in subscription order.
///
/// The registry sits behind a lock that is never held while handlers run.
/// The matched handlers are captured before the first one is invoked, so a
/// handler may send, subscribe, unsubscribe or close reentrantly without
/// changing who receives the message in flight.
///
/// A process typically constructs one bus at startup and shares it (by
/// reference or `Arc`) with every component that talks over it.
///
/// ## Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use typed_bus::{message, Bus, Message, MessageBus};
///
/// trait Audited: Message {
///     fn actor(&self) -> &str;
/// }
///
/// struct UserCreated {
///     actor: String,
/// }
///
/// impl Audited for UserCreated {
///     fn actor(&self) -> &str {
///         &self.actor
///     }
/// }
///
/// message!(UserCreated: dyn Audited);
///
/// let bus = MessageBus::new();
/// let audit = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&audit);
/// bus.subscribe_with::<dyn Audited>(move |event| {
///     sink.lock().unwrap().push(event.actor().to_string());
/// });
///
/// bus.send(UserCreated { actor: "alice".into() }).unwrap();
/// assert_eq!(*audit.lock().unwrap(), vec!["alice"]);
/// ```
pub struct MessageBus {
    inner: Mutex<Inner>,
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("MessageBus")
            .field("state", &inner.state)
            .field("len", &inner.registry.len())
            .finish()
    }
}

impl MessageBus {
    /// Create an open bus with no handlers.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: BusState::Open,
                registry: Registry::default(),
            }),
        }
    }

    pub fn state(&self) -> BusState {
        self.inner.lock().state
    }

    /// Number of registrations declared for exactly `M`.
    pub fn handler_count<M: ?Sized + 'static>(&self) -> usize {
        self.inner.lock().registry.count::<M>()
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.inner.lock().registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn resolve<M: Message>(&self) -> Vec<Delivery> {
        self.inner.lock().registry.resolve::<M>()
    }
}

/// Run a resolved batch against one message.
pub(crate) fn deliver<M: Message>(message: &M, deliveries: &[Delivery]) {
    for delivery in deliveries {
        delivery.run(message);
    }
}

impl Bus for MessageBus {
    fn send<M: Message>(&self, message: M) -> Result<(), BusError> {
        let deliveries = self.resolve::<M>();
        debug!(
            message_type = type_name::<M>(),
            handlers = deliveries.len(),
            "sending message"
        );
        deliver(&message, &deliveries);
        Ok(())
    }

    fn subscribe_handler<M: ?Sized + 'static>(&self, handler: &Handler<M>) {
        let mut inner = self.inner.lock();
        if inner.state == BusState::Closed {
            trace!(message_type = type_name::<M>(), "bus closed, subscription ignored");
            return;
        }
        inner.registry.insert(handler);
        trace!(message_type = type_name::<M>(), "handler subscribed");
    }

    fn unsubscribe<M: ?Sized + 'static>(&self, handler: &Handler<M>) {
        let removed = self.inner.lock().registry.remove(handler);
        trace!(message_type = type_name::<M>(), removed, "handler unsubscribed");
    }

    fn close(&self) {
        let mut inner = self.inner.lock();
        inner.state = BusState::Closed;
        let dropped = inner.registry.clear();
        debug!(dropped, "bus closed");
    }

    fn is_closed(&self) -> bool {
        self.state() == BusState::Closed
    }
}
