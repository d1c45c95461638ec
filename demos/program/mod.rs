pub mod initializer;
pub mod messages;
pub mod terminator;
