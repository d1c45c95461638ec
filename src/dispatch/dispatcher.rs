use std::sync::Arc;

use crate::error::BusError;

/// A unit of work scheduled on a dispatcher.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Scheduling priority. Background jobs run only when no normal job is
/// waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Normal,
    Background,
}

/// An execution context that accepts jobs.
///
/// `dispatch` returns once the job is accepted; it does not wait for it to
/// run.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, priority: Priority, job: Job) -> Result<(), BusError>;
}

impl<D: Dispatcher + ?Sized> Dispatcher for Arc<D> {
    fn dispatch(&self, priority: Priority, job: Job) -> Result<(), BusError> {
        (**self).dispatch(priority, job)
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for &D {
    fn dispatch(&self, priority: Priority, job: Job) -> Result<(), BusError> {
        (**self).dispatch(priority, job)
    }
}

/// Runs every job on the calling thread before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateDispatcher;

impl Dispatcher for ImmediateDispatcher {
    fn dispatch(&self, _priority: Priority, job: Job) -> Result<(), BusError> {
        job();
        Ok(())
    }
}
