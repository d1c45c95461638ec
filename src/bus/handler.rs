//! Handler identities.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The callback behind a [`Handler`]: either a plain action or one that
/// receives the message.
pub(crate) enum Callback<M: ?Sized> {
    Action(Box<dyn Fn() + Send + Sync>),
    WithMessage(Box<dyn Fn(&M) + Send + Sync>),
}

impl<M: ?Sized> Callback<M> {
    pub(crate) fn call(&self, message: &M) {
        match self {
            Callback::Action(action) => action(),
            Callback::WithMessage(action) => action(message),
        }
    }
}

/// Type-erased handler as stored in the registry.
pub(crate) type ErasedHandler = Arc<dyn Any + Send + Sync>;

/// A callback registered, or registrable, for declared message type `M`.
///
/// A `Handler` is an identity: clones refer to the same callback, and
/// [`Bus::unsubscribe`](crate::Bus::unsubscribe) removes a registration only
/// if it was made with this handler (or a clone of it). Two handlers built
/// from identical closures are different handlers.
///
/// ```
/// use typed_bus::{Bus, Handler, MessageBus};
///
/// struct Tick;
/// typed_bus::message!(Tick);
///
/// let bus = MessageBus::new();
/// let handler = Handler::<Tick>::new(|| println!("tick"));
///
/// bus.subscribe_handler(&handler);
/// bus.subscribe_handler(&handler);
/// assert_eq!(bus.handler_count::<Tick>(), 2);
///
/// bus.unsubscribe(&handler);
/// assert_eq!(bus.handler_count::<Tick>(), 1);
/// ```
pub struct Handler<M: ?Sized + 'static> {
    callback: Arc<Callback<M>>,
}

impl<M: ?Sized + 'static> Handler<M> {
    /// A handler that ignores the message.
    pub fn new(action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(Callback::Action(Box::new(action))),
        }
    }

    /// A handler that receives the message.
    pub fn with_message(action: impl Fn(&M) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(Callback::WithMessage(Box::new(action))),
        }
    }

    /// Returns `true` if the handler takes the message as an argument.
    pub fn receives_message(&self) -> bool {
        matches!(*self.callback, Callback::WithMessage(_))
    }

    /// Returns `true` if both handlers are the same callback.
    pub fn same_as(&self, other: &Handler<M>) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }

    pub(crate) fn erased(&self) -> ErasedHandler {
        self.callback.clone()
    }

    pub(crate) fn is(&self, erased: &ErasedHandler) -> bool {
        Arc::as_ptr(erased) as *const () == Arc::as_ptr(&self.callback) as *const ()
    }
}

impl<M: ?Sized + 'static> Clone for Handler<M> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<M: ?Sized + 'static> fmt::Debug for Handler<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("message", &std::any::type_name::<M>())
            .field("receives_message", &self.receives_message())
            .finish()
    }
}
