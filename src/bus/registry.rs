//! Declared type → handlers.

use std::any::Any;
use std::collections::HashMap;

use super::handler::{ErasedHandler, Handler};
use crate::message::{routes, DeliverFn, Message, TypeKey};

/// One matched handler, detached from the registry.
pub(crate) struct Delivery {
    handler: ErasedHandler,
    deliver: DeliverFn,
}

impl Delivery {
    pub(crate) fn run(&self, message: &dyn Any) {
        (self.deliver)(message, &*self.handler);
    }
}

/// Handlers grouped by declared type, each group in subscription order.
#[derive(Default)]
pub(crate) struct Registry {
    groups: HashMap<TypeKey, Vec<ErasedHandler>>,
}

impl Registry {
    pub(crate) fn insert<M: ?Sized + 'static>(&mut self, handler: &Handler<M>) {
        self.groups
            .entry(TypeKey::of::<M>())
            .or_default()
            .push(handler.erased());
    }

    /// Removes the first registration of `handler` under `M`.
    pub(crate) fn remove<M: ?Sized + 'static>(&mut self, handler: &Handler<M>) -> bool {
        let key = TypeKey::of::<M>();
        let Some(group) = self.groups.get_mut(&key) else {
            return false;
        };
        let Some(index) = group.iter().position(|entry| handler.is(entry)) else {
            return false;
        };
        group.remove(index);
        if group.is_empty() {
            self.groups.remove(&key);
        }
        true
    }

    /// Snapshot of every handler a message of type `M` is delivered to.
    pub(crate) fn resolve<M: Message>(&self) -> Vec<Delivery> {
        let mut deliveries = Vec::new();
        for route in routes::<M>() {
            if let Some(group) = self.groups.get(&route.key()) {
                deliveries.extend(group.iter().map(|handler| Delivery {
                    handler: handler.clone(),
                    deliver: route.deliver().clone(),
                }));
            }
        }
        deliveries
    }

    /// Drops every registration, returning how many there were.
    pub(crate) fn clear(&mut self) -> usize {
        let count = self.len();
        self.groups.clear();
        count
    }

    pub(crate) fn count<M: ?Sized + 'static>(&self) -> usize {
        self.groups
            .get(&TypeKey::of::<M>())
            .map_or(0, |group| group.len())
    }

    pub(crate) fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
