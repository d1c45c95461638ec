//! A simple program demonstrating the message bus.
//!
//! The initializer and the terminator don't know each other; they only share
//! the bus.

mod program;

use program::initializer::ProgramInitializer;
use program::terminator::ProgramTerminator;
use typed_bus::MessageBus;

fn main() -> Result<(), typed_bus::BusError> {
    let bus = MessageBus::new();
    let initializer = ProgramInitializer::new(&bus);
    let terminator = ProgramTerminator::new(&bus);

    // Not initialized yet
    terminator.try_terminate();

    initializer.initialize()?;

    terminator.try_terminate();
    Ok(())
}
