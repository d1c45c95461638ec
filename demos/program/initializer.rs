use typed_bus::{Bus, BusError};

use super::messages::ProgramInitialized;

/// Initializes the program and announces it on the bus.
pub struct ProgramInitializer<'a, B: Bus> {
    bus: &'a B,
}

impl<'a, B: Bus> ProgramInitializer<'a, B> {
    pub fn new(bus: &'a B) -> Self {
        Self { bus }
    }

    pub fn initialize(&self) -> Result<(), BusError> {
        println!("Initializing and sending message...");
        self.bus.send(ProgramInitialized)
    }
}
