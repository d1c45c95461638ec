use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use typed_bus::Bus;

use super::messages::ProgramInitialized;

/// Terminates the program, but only after it has been initialized.
///
/// Knows nothing about `ProgramInitializer`; it only listens for
/// `ProgramInitialized` on the bus.
pub struct ProgramTerminator {
    initialized: Arc<AtomicBool>,
}

impl ProgramTerminator {
    pub fn new(bus: &impl Bus) -> Self {
        let initialized = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&initialized);
        bus.subscribe::<ProgramInitialized>(move || {
            println!("ProgramTerminator received a ProgramInitialized message");
            flag.store(true, Ordering::SeqCst);
        });
        Self { initialized }
    }

    /// Returns `true` if the program could be terminated.
    pub fn try_terminate(&self) -> bool {
        if self.initialized.load(Ordering::SeqCst) {
            println!("Terminate program");
            true
        } else {
            println!("Could not terminate program, because it wasn't initialized");
            false
        }
    }
}
