//! The sample program's components, wired through one shared bus.

#[path = "../../demos/program/mod.rs"]
mod program;

use program::initializer::ProgramInitializer;
use program::terminator::ProgramTerminator;
use typed_bus::{Bus, ImmediateDispatcher, MarshalingBus, MessageBus};

#[test]
fn terminator_needs_the_initializer_message() {
    let bus = MessageBus::new();
    let initializer = ProgramInitializer::new(&bus);
    let terminator = ProgramTerminator::new(&bus);

    assert!(!terminator.try_terminate());

    initializer.initialize().unwrap();

    assert!(terminator.try_terminate());
}

#[test]
fn components_work_over_a_marshaling_bus() {
    let bus = MarshalingBus::new(ImmediateDispatcher);
    let initializer = ProgramInitializer::new(&bus);
    let terminator = ProgramTerminator::new(&bus);

    initializer.initialize().unwrap();

    assert!(terminator.try_terminate());
}

#[test]
fn closed_bus_never_initializes_the_terminator() {
    let bus = MessageBus::new();
    let terminator = ProgramTerminator::new(&bus);
    bus.close();

    ProgramInitializer::new(&bus).initialize().unwrap();

    assert!(!terminator.try_terminate());
}
