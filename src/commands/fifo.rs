//! FIFO commands
//!
//! This module contains the commands moving payload bytes in and out of the chip:
//! - Reading one byte from the receive FIFO
//! - Writing one byte into the transmit register
//!
//! The sync preamble bytes ([`DUMMY_BYTE`], [`SYNC_WORD`]) are part of the
//! over-the-air convention and must match the receiver's configuration.

use core::convert::Infallible;

use regiface::{FromByteArray, ToByteArray};

use crate::Command;

/// Lead-in and trailing dummy byte (alternating bits for clock recovery)
pub const DUMMY_BYTE: u8 = 0xAA;

/// Sync pattern expected by the receiver, in transmit order
pub const SYNC_WORD: [u8; 2] = [0x2D, 0xD4];

/// A single payload byte travelling through the FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataByte(pub u8);

impl ToByteArray for DataByte {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.0])
    }
}

impl FromByteArray for DataByte {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self(bytes[0]))
    }
}

/// Receiver FIFO read command (0xB000)
///
/// Returns the oldest byte in the receive FIFO in the low 8 bits of the
/// response word.
///
/// # Important Notes
/// - Only meaningful while the FIFO-ready status bit is set
/// - Reading an empty FIFO returns garbage
#[derive(Debug, Clone)]
pub struct FifoRead;

impl Command for FifoRead {
    type IdType = u16;
    type CommandParameters = crate::NoParameters;
    type ResponseParameters = DataByte;

    fn id() -> Self::IdType {
        0xB000
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        crate::NoParameters::default()
    }
}

/// Transmitter register write command (0xB800)
///
/// Queues one byte for transmission.
///
/// # Important Notes
/// - The register holds two bytes; writes must be paced by the
///   FIFO-space-available status bit once the transmitter runs
/// - Bytes written while the transmitter is off are sent first when it starts
#[derive(Debug, Clone)]
pub struct TransmitWrite {
    /// Byte to transmit
    pub byte: u8,
}

impl Command for TransmitWrite {
    type IdType = u16;
    type CommandParameters = DataByte;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0xB800
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        DataByte(self.byte)
    }
}
