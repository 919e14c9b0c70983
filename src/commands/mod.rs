//! Radio command implementations
//!
//! The RFM12 is driven entirely through 16-bit command words clocked over the
//! serial link. Every word carries an opcode in its upper bits and the command
//! parameters in the remaining low bits. While a word is being clocked in, the
//! chip clocks a 16-bit response word out.
//!
//! Each command is a type implementing [`Command`](crate::Command) with:
//! - `id()`: the opcode, already shifted into place (e.g. `0xA000`)
//! - `CommandParameters`: serialized big-endian and OR-ed into the low bits
//! - `ResponseParameters`: deserialized from the low bytes of the response
//!
//! # Command Categories
//! - `config`: Configuration commands issued during initialization
//!   - Band, crystal load, carrier frequency and data rate
//!   - Receiver bandwidth, LNA gain, RSSI threshold and data filter
//!   - FIFO and sync-pattern behavior
//!   - AFC, transmitter deviation and output power
//!   - Wake-up timer, duty cycling and clock output
//!
//! - `fifo`: Receive FIFO reads and transmit register writes
//!
//! - `status`: Status word read and flag decoding
//!
//! # Important Notes
//! - Configuration commands are write-only, their response is ignored
//! - The status word is clocked out during *every* command, but only the
//!   all-zero status read command has no other side effect
//! - Reading the status word clears the latched interrupt sources in the chip

use core::convert::Infallible;

use regiface::{ByteArray, Command, ToByteArray};

mod config;
mod fifo;
mod status;

pub use config::*;
pub use fifo::*;
pub use status::*;

/// Serializes a command into the 16-bit word clocked into the chip.
pub fn encode<C>(command: C) -> u16
where
    C: Command<IdType = u16>,
    C::CommandParameters: ToByteArray<Error = Infallible>,
{
    let parameters = match command.invoking_parameters().to_bytes() {
        Ok(bytes) => bytes,
        Err(never) => match never {},
    };
    let low = parameters
        .as_ref()
        .iter()
        .fold(0u16, |word, &byte| (word << 8) | u16::from(byte));

    C::id() | low
}
