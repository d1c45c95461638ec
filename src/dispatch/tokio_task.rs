//! Dispatcher backed by a tokio task.

use std::panic::{self, AssertUnwindSafe};

use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::{debug, error};

use super::{Dispatcher, Job, Priority};
use crate::error::BusError;

/// Runs jobs one at a time, in submission order, on a single task spawned on
/// a tokio runtime. Priorities are accepted but not distinguished.
///
/// The task ends once every clone of the dispatcher is dropped.
#[derive(Clone)]
pub struct TokioDispatcher {
    tx: UnboundedSender<Job>,
}

impl TokioDispatcher {
    pub fn spawn(runtime: &Handle) -> Self {
        let (tx, mut rx) = unbounded_channel::<Job>();

        runtime.spawn(async move {
            debug!("tokio dispatcher started");
            while let Some(job) = rx.recv().await {
                if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                    error!("dispatched batch panicked");
                }
            }
            debug!("tokio dispatcher stopped");
        });

        Self { tx }
    }
}

impl Dispatcher for TokioDispatcher {
    fn dispatch(&self, _priority: Priority, job: Job) -> Result<(), BusError> {
        self.tx.send(job).map_err(|_| BusError::DispatcherStopped)
    }
}
