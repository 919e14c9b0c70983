//! Driver error type

use regiface::errors::Error as RegifaceError;

use crate::state::State;

/// Errors reported by the [`Transceiver`](crate::Transceiver).
///
/// A rejected state change is recoverable: the driver state is left exactly
/// as it was and the caller may retry or re-read [`state`](crate::Transceiver::state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A GPIO line of the serial link could not be driven or sampled
    Bus,
    /// The requested state is not reachable from the current one
    InvalidTransition {
        /// State the driver was (and still is) in
        from: State,
        /// State that was requested
        to: State,
    },
}

impl From<RegifaceError> for Error {
    fn from(_: RegifaceError) -> Self {
        Error::Bus
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus => f.write_str("serial link pin failure"),
            Error::InvalidTransition { from, to } => {
                write!(f, "invalid transition {:?} -> {:?}", from, to)
            }
        }
    }
}
