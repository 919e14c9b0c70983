//! Status commands
//!
//! This module contains the status read command and the decoding of the
//! 16-bit status word:
//! - FIFO readiness (receive data available / transmit space available)
//! - One-shot interrupt sources (power-on reset, overflow, wake-up, external)
//! - Level conditions (low battery, FIFO empty, signal strength, data quality,
//!   clock recovery lock)
//! - AFC toggle and the measured 5-bit frequency offset
//!
//! # Latching
//! The chip clears its interrupt sources as soon as the status word has been
//! read. The driver therefore keeps the one-shot ("transient") flags in
//! software until they are explicitly cleared, see [`StatusFlags::latch`].

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::FromByteArray;

use crate::{Command, NoParameters};

bitflags! {
    /// Decoded status word
    ///
    /// Some bits change meaning with the direction the chip is configured for
    /// (receiver enabled or transmitter enabled). Those are named after the
    /// condition they report in either direction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u16 {
        /// RX: FIFO holds at least the configured number of bits (FFIT)
        /// TX: transmit register is ready for the next byte (RGIT)
        const FIFO_READY = 1 << 15;
        /// Power-on reset occurred
        const POWER_ON_RESET = 1 << 14;
        /// RX: FIFO overflow (FFOV)
        /// TX: transmit register underrun (RGUR)
        const FIFO_OVERFLOW = 1 << 13;
        /// Wake-up timer overflow
        const WAKE_UP = 1 << 12;
        /// Logic level interrupt on the external nINT pin
        const EXTERNAL = 1 << 11;
        /// Supply voltage below the programmed threshold
        const LOW_BATTERY = 1 << 10;
        /// FIFO is empty
        const FIFO_EMPTY = 1 << 9;
        /// RX: incoming signal above the RSSI threshold
        /// TX: strong RF signal detected at the antenna (ATS)
        const SIGNAL_STRENGTH = 1 << 8;
        /// Data quality detector output
        const DATA_QUALITY = 1 << 7;
        /// Clock recovery locked
        const CLOCK_LOCKED = 1 << 6;
        /// Toggles once per AFC cycle
        const AFC_TOGGLE = 1 << 5;
        /// Measured frequency offset, 5-bit two's complement
        const OFFSET = 0x1F;

        /// One-shot sources that the chip clears on read
        const TRANSIENT = Self::POWER_ON_RESET.bits()
            | Self::FIFO_OVERFLOW.bits()
            | Self::WAKE_UP.bits()
            | Self::EXTERNAL.bits();
    }
}

impl StatusFlags {
    /// Merges a freshly read status word into previously stored flags.
    ///
    /// Transient flags stay set once observed; every other flag reflects
    /// only the latest read.
    pub fn latch(self, raw: StatusFlags) -> StatusFlags {
        (self & StatusFlags::TRANSIENT) | raw
    }

    /// Frequency offset measured by the AFC, in synthesizer steps.
    pub fn frequency_offset(self) -> i8 {
        let raw = (self.bits() & StatusFlags::OFFSET.bits()) as i8;
        if raw & 0x10 != 0 {
            raw - 0x20
        } else {
            raw
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "StatusFlags({=u16:#x})", self.bits())
    }
}

impl FromByteArray for StatusFlags {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self::from_bits_retain(u16::from_be_bytes(bytes)))
    }
}

/// Status read command (0x0000)
///
/// Returns the full status word. Has no effect on the chip besides clearing
/// the interrupt sources that were reported.
///
/// # Important Notes
/// - Transient sources are cleared by the read itself
/// - nIRQ is released once no enabled source is pending
#[derive(Debug, Clone)]
pub struct StatusRead;

impl Command for StatusRead {
    type IdType = u16;
    type CommandParameters = NoParameters;
    type ResponseParameters = StatusFlags;

    fn id() -> Self::IdType {
        0x0000
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}
