//! Execution contexts a [`MarshalingBus`](crate::MarshalingBus) can run
//! handler batches on.
//!
//! - [`ImmediateDispatcher`] - runs every job inline on the caller
//! - [`ThreadDispatcher`] - a dedicated thread, e.g. the UI thread of an app
//! - `TokioDispatcher` - a task on a tokio runtime (feature `tokio`)

mod config;
mod dispatcher;
mod thread;
#[cfg(feature = "tokio")]
mod tokio_task;

pub use config::DispatcherConfig;
pub use dispatcher::{Dispatcher, ImmediateDispatcher, Job, Priority};
pub use thread::{DispatcherStats, ThreadDispatcher, ThreadDispatcherHandle};
#[cfg(feature = "tokio")]
pub use tokio_task::TokioDispatcher;
