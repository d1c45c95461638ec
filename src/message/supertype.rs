use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::{Message, TypeKey};
use crate::bus::Callback;

/// Invokes one erased handler with one erased message.
pub(crate) type DeliverFn = Arc<dyn Fn(&dyn Any, &(dyn Any + Send + Sync)) + Send + Sync>;

/// One "is-a" edge from a concrete message type to a type it can be
/// delivered as.
///
/// Built with [`Supertype::of`], usually through [`message!`](crate::message!).
/// The edge carries the conversion from the message to the supertype, so
/// handlers declared for `S` receive an `&S` view of the message.
///
/// ```
/// use typed_bus::{Message, Supertype};
///
/// trait Named: Message {
///     fn name(&self) -> &str;
/// }
///
/// struct Greeting(String);
///
/// impl Named for Greeting {
///     fn name(&self) -> &str {
///         &self.0
///     }
/// }
///
/// impl Message for Greeting {
///     fn supertypes() -> Vec<Supertype> {
///         vec![Supertype::of::<Greeting, dyn Named>(|greeting| greeting)]
///     }
/// }
/// ```
///
/// The view does not have to be an unsizing coercion. A message embedding a
/// shared header struct can be delivered as that header:
///
/// ```
/// use typed_bus::{Message, Supertype};
///
/// struct Header {
///     correlation_id: u64,
/// }
///
/// struct Shipped {
///     header: Header,
/// }
///
/// impl Message for Shipped {
///     fn supertypes() -> Vec<Supertype> {
///         vec![Supertype::of::<Shipped, Header>(|shipped| &shipped.header)]
///     }
/// }
/// ```
#[derive(Clone)]
pub struct Supertype {
    key: TypeKey,
    deliver: DeliverFn,
}

impl Supertype {
    /// Declares that `M` is delivered as `S`, viewed through `upcast`.
    pub fn of<M, S>(upcast: fn(&M) -> &S) -> Self
    where
        M: Message,
        S: ?Sized + 'static,
    {
        Self {
            key: TypeKey::of::<S>(),
            deliver: Arc::new(
                move |message: &dyn Any, handler: &(dyn Any + Send + Sync)| {
                    deliver_as(message, handler, upcast)
                },
            ),
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub(crate) fn deliver(&self) -> &DeliverFn {
        &self.deliver
    }
}

impl fmt::Debug for Supertype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supertype").field("key", &self.key).finish()
    }
}

fn deliver_as<M, S>(message: &dyn Any, handler: &(dyn Any + Send + Sync), upcast: fn(&M) -> &S)
where
    M: 'static,
    S: ?Sized + 'static,
{
    let (Some(message), Some(callback)) = (
        message.downcast_ref::<M>(),
        handler.downcast_ref::<Callback<S>>(),
    ) else {
        return;
    };
    callback.call(upcast(message));
}

/// Every declared type a message of type `M` is delivered as, most specific
/// first: `M` itself, its declared supertypes, then `dyn Message`. Each key
/// appears once.
pub(crate) fn routes<M: Message>() -> Vec<Supertype> {
    let mut routes = Vec::new();
    routes.push(Supertype::of::<M, M>(|message| message));
    routes.extend(M::supertypes());
    routes.push(Supertype::of::<M, dyn Message>(|message| message));

    let mut seen = Vec::with_capacity(routes.len());
    routes.retain(|route| {
        if seen.contains(&route.key) {
            false
        } else {
            seen.push(route.key);
            true
        }
    });
    routes
}
