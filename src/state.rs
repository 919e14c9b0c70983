//! Transceiver protocol states
//!
//! The driver walks the radio through eight states:
//!
//! ```text
//! Idle -> Listen -> Rx -> Idle (or Listen with auto-relisten)
//! Idle -> TxSync0 -> TxSync1 -> Tx -> TxEnd -> Idle
//!                                  \-> TxResync -> TxSync0 -> ...
//! ```
//!
//! Only the edges accepted by [`State::can_enter_from`] are legal. Idle and
//! Listen may be entered from anywhere, which is how a transmission or a
//! reception is abandoned.

/// Base protocol state of the transceiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Receiver and transmitter off, no interrupts expected
    #[default]
    Idle,
    /// Receiver on, FIFO fill armed on sync-pattern detection
    Listen,
    /// A packet is being received byte by byte
    Rx,
    /// First lead-in dummy byte queued in the transmit register
    TxSync0,
    /// First sync-word half (0x2D) queued
    TxSync1,
    /// Second sync-word half (0xD4) queued, payload bytes follow
    Tx,
    /// Trailing dummy byte queued, transmitter shuts down once it drains
    TxEnd,
    /// Trailing dummy byte queued, a new sync preamble follows
    TxResync,
}

impl State {
    /// All states, in protocol order.
    pub const ALL: [State; 8] = [
        State::Idle,
        State::Listen,
        State::Rx,
        State::TxSync0,
        State::TxSync1,
        State::Tx,
        State::TxEnd,
        State::TxResync,
    ];

    /// Returns `true` if `self` may be entered directly from `from`.
    ///
    /// Staying in the same state is always allowed and is a no-op.
    pub const fn can_enter_from(self, from: State) -> bool {
        if self as u8 == from as u8 {
            return true;
        }
        match self {
            State::Idle | State::Listen => true,
            State::Rx => matches!(from, State::Listen),
            State::TxSync0 => matches!(from, State::Idle | State::Listen | State::TxResync),
            State::TxSync1 => matches!(from, State::TxSync0),
            State::Tx => matches!(from, State::TxSync1),
            State::TxEnd | State::TxResync => matches!(from, State::Tx),
        }
    }

    /// Returns `true` while the transmitter owns the radio.
    pub const fn is_transmitting(self) -> bool {
        matches!(
            self,
            State::TxSync0 | State::TxSync1 | State::Tx | State::TxEnd | State::TxResync
        )
    }
}
