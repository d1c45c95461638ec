//! Dedicated dispatcher thread.
//!
//! `ThreadDispatcher` owns one thread that runs queued jobs in priority order
//! (FIFO within a priority), the way a UI toolkit's main-thread dispatcher
//! does. Jobs are queued through cloneable `ThreadDispatcherHandle`s.

use std::any::Any;
use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle, ThreadId};

use tracing::{debug, error};

use super::{Dispatcher, DispatcherConfig, Job, Priority};
use crate::error::BusError;

/// Statistics from the dispatcher thread.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatcherStats {
    /// Number of jobs that ran to completion.
    pub batches_run: usize,
    /// Number of jobs that panicked.
    pub batches_panicked: usize,
    /// Number of jobs discarded at stop because draining was disabled.
    pub batches_dropped: usize,
}

enum Command {
    Run(Priority, Job),
    Stop,
}

/// A background thread that runs dispatched jobs.
///
/// ## Example
///
/// ```
/// use typed_bus::{Dispatcher, Priority, ThreadDispatcher};
///
/// let dispatcher = ThreadDispatcher::spawn().unwrap();
/// let handle = dispatcher.handle();
///
/// handle
///     .dispatch(Priority::Normal, Box::new(|| println!("on the dispatcher")))
///     .unwrap();
///
/// let stats = dispatcher.stop();
/// assert_eq!(stats.batches_run, 1);
/// ```
pub struct ThreadDispatcher {
    handle: ThreadDispatcherHandle,
    thread: Option<JoinHandle<DispatcherStats>>,
}

/// Cloneable entry point for queueing jobs on a [`ThreadDispatcher`].
#[derive(Clone)]
pub struct ThreadDispatcherHandle {
    tx: Sender<Command>,
    thread_id: ThreadId,
}

impl ThreadDispatcher {
    /// Spawn a dispatcher thread with the default configuration.
    pub fn spawn() -> io::Result<Self> {
        Self::spawn_with_config(DispatcherConfig::default())
    }

    pub fn spawn_with_config(config: DispatcherConfig) -> io::Result<Self> {
        let (tx, rx) = channel();
        let drain_on_stop = config.drain_on_stop;

        let thread = thread::Builder::new()
            .name(config.thread_name)
            .spawn(move || run(rx, drain_on_stop))?;
        let thread_id = thread.thread().id();

        Ok(Self {
            handle: ThreadDispatcherHandle { tx, thread_id },
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> ThreadDispatcherHandle {
        self.handle.clone()
    }

    /// Signal the thread to stop and wait for it to finish.
    /// Returns the dispatcher statistics.
    pub fn stop(mut self) -> DispatcherStats {
        self.shutdown()
    }

    fn shutdown(&mut self) -> DispatcherStats {
        let _ = self.handle.tx.send(Command::Stop);
        match self.thread.take() {
            // A thread cannot join itself; it exits on its own after `Stop`.
            Some(_) if self.handle.is_dispatcher_thread() => DispatcherStats::default(),
            Some(thread) => thread.join().unwrap_or_default(),
            None => DispatcherStats::default(),
        }
    }
}

impl Drop for ThreadDispatcher {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.shutdown();
        }
    }
}

impl ThreadDispatcherHandle {
    /// Returns `true` when called from the dispatcher thread itself.
    pub fn is_dispatcher_thread(&self) -> bool {
        thread::current().id() == self.thread_id
    }
}

impl Dispatcher for ThreadDispatcherHandle {
    fn dispatch(&self, priority: Priority, job: Job) -> Result<(), BusError> {
        self.tx
            .send(Command::Run(priority, job))
            .map_err(|_| BusError::DispatcherStopped)
    }
}

impl Dispatcher for ThreadDispatcher {
    fn dispatch(&self, priority: Priority, job: Job) -> Result<(), BusError> {
        self.handle.dispatch(priority, job)
    }
}

#[derive(Default)]
struct Queue {
    normal: VecDeque<Job>,
    background: VecDeque<Job>,
}

impl Queue {
    /// Returns `true` for a stop request.
    fn accept(&mut self, command: Command) -> bool {
        match command {
            Command::Run(Priority::Normal, job) => self.normal.push_back(job),
            Command::Run(Priority::Background, job) => self.background.push_back(job),
            Command::Stop => return true,
        }
        false
    }

    fn pop(&mut self) -> Option<Job> {
        self.normal
            .pop_front()
            .or_else(|| self.background.pop_front())
    }

    fn len(&self) -> usize {
        self.normal.len() + self.background.len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn run(rx: Receiver<Command>, drain_on_stop: bool) -> DispatcherStats {
    let mut stats = DispatcherStats::default();
    let mut queue = Queue::default();
    let mut stopping = false;

    debug!(thread = ?thread::current().name(), "dispatcher started");

    loop {
        // Block only when idle
        if queue.is_empty() && !stopping {
            match rx.recv() {
                Ok(command) => stopping |= queue.accept(command),
                Err(_) => break,
            }
        }

        while let Ok(command) = rx.try_recv() {
            stopping |= queue.accept(command);
        }

        if stopping && !drain_on_stop {
            stats.batches_dropped = queue.len();
            break;
        }

        match queue.pop() {
            Some(job) => run_job(job, &mut stats),
            None if stopping => break,
            None => {}
        }
    }

    debug!(
        batches_run = stats.batches_run,
        batches_panicked = stats.batches_panicked,
        batches_dropped = stats.batches_dropped,
        "dispatcher stopped"
    );
    stats
}

fn run_job(job: Job, stats: &mut DispatcherStats) {
    match panic::catch_unwind(AssertUnwindSafe(job)) {
        Ok(()) => stats.batches_run += 1,
        Err(payload) => {
            stats.batches_panicked += 1;
            error!(panic = panic_message(payload.as_ref()), "dispatched batch panicked");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
