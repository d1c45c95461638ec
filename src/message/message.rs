use std::any::{type_name, Any};

use super::Supertype;

/// Access to a value as `&dyn Any`, blanket-implemented for every `'static`
/// type so that `dyn Message` can be downcast.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Marker trait for anything that can be sent over a bus.
///
/// Implement it directly for a message without supertypes, or use the
/// [`message!`](crate::message!) macro. `Send` is required so the message can
/// be handed to a marshaling dispatcher.
pub trait Message: AsAny + Send {
    /// Declared supertypes this message is also delivered as, in order.
    ///
    /// The message's own type and `dyn Message` are implied; listing them
    /// again has no effect. Nothing else is inferred: a supertype's own
    /// supertypes must be listed here too.
    fn supertypes() -> Vec<Supertype>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// Name of the concrete message type.
    fn message_name(&self) -> &'static str {
        type_name::<Self>()
    }
}

impl dyn Message {
    /// Returns `true` if the message is of concrete type `M`.
    pub fn is<M: Message>(&self) -> bool {
        self.as_any().is::<M>()
    }

    pub fn downcast_ref<M: Message>(&self) -> Option<&M> {
        self.as_any().downcast_ref::<M>()
    }
}
