use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// A send was attempted without a message.
    NullMessage { parameter: &'static str },
    /// An unsubscribe was attempted without a handler.
    NullHandler { parameter: &'static str },
    /// The dispatcher a marshaling bus schedules onto is no longer running.
    DispatcherStopped,
}

impl BusError {
    /// Name of the offending parameter, for the two validation failures.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            BusError::NullMessage { parameter } | BusError::NullHandler { parameter } => {
                Some(parameter)
            }
            BusError::DispatcherStopped => None,
        }
    }
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::NullMessage { parameter } => {
                write!(f, "value cannot be null (parameter '{}')", parameter)
            }
            BusError::NullHandler { parameter } => {
                write!(f, "value cannot be null (parameter '{}')", parameter)
            }
            BusError::DispatcherStopped => write!(f, "dispatcher is no longer running"),
        }
    }
}

impl std::error::Error for BusError {}
