/// Sent once the program finished initializing.
pub struct ProgramInitialized;

typed_bus::message!(ProgramInitialized);
