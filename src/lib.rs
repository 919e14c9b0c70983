#![cfg_attr(not(test), no_std)]
//! RFM12 Radio Driver
//!
//! This crate provides an interrupt-driven packet interface for the HopeRF
//! RFM12/RFM12B sub-GHz FSK transceivers. The chip is byte oriented and half
//! duplex: it exposes a receive FIFO, a two-byte transmit register and a
//! 16-bit status word over a simple synchronous serial link.
//!
//! # Features
//! - Frequency bands: 315 (RFM12B), 433, 868 and 915 MHz
//! - (G)FSK data rates from 0.6 to 115.2 kbps
//! - Bit-banged serial link over any embedded-hal GPIO lines
//! - Latched status decoding for one-shot interrupt sources
//! - Eight-state protocol engine with sync preamble generation
//! - Automatic return to listening after each packet (auto-relisten)
//! - Blocking and async polling of the nIRQ line
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`link`]: Software serial link exchanging 16-bit command words
//!
//! - [`commands`]: Command interface for radio control
//!   - Configuration commands (band, frequency, data rate, receiver, FIFO...)
//!   - FIFO read and transmit register write
//!   - Status read and flag decoding
//!
//! - [`config`]: Chip configuration issued at initialization
//!
//! - [`state`]: Protocol states and the transition table
//!
//! - [`handler`]: Byte-level callbacks into the application
//!
//! - [`device`]: The [`Transceiver`] tying everything together
//!   - Guarded state transitions
//!   - nIRQ dispatcher
//!   - Listen/send/stop operations
//!
//! # Usage
//! Commands use the `regiface` crate's [`Command`] trait. Each command type
//! carries its opcode and serializes its parameters into the low bits of the
//! command word, which keeps every word sent to the chip typed.
//!
//! Operation follows a specific sequence:
//!
//! 1. Bundle the six chip lines into [`Pins`]
//! 2. Create a [`Transceiver`] with a [`PacketHandler`] and a [`Config`]
//! 3. Call [`Transceiver::initialize`]
//! 4. Call [`Transceiver::listen`] to receive, [`Transceiver::send_packet`] to transmit
//! 5. Call [`Transceiver::handle_interrupt`] on every nIRQ falling edge
//!    (or loop on [`Transceiver::poll_wait`])
//!
//! # Important Notes
//! - nIRQ is level triggered; the dispatcher drains it completely
//! - The dispatcher is not reentrant; mask nIRQ around calls from thread context
//! - The handler callbacks run in interrupt context and must not block
//! - FIFO overflow and low battery are reported through [`Transceiver::status`]
//!   only; they do not change the protocol state
//!
//! # Example
//! ```no_run
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use rfm12::{Callbacks, Error, Outgoing, Pins, ReadEvent, Transceiver};
//!
//! fn run<SEL, SCK, SDI, SDO, DATA, NIRQ>(
//!     pins: Pins<SEL, SCK, SDI, SDO, DATA, NIRQ>,
//! ) -> Result<(), Error>
//! where
//!     SEL: OutputPin,
//!     SCK: OutputPin,
//!     SDI: OutputPin,
//!     SDO: InputPin,
//!     DATA: OutputPin,
//!     NIRQ: InputPin,
//! {
//!     let payload = *b"hello";
//!     let mut sent = 0;
//!     let handler = Callbacks::new(
//!         |_event: ReadEvent, _byte: u8| true,
//!         move || match payload.get(sent) {
//!             Some(&byte) => {
//!                 sent += 1;
//!                 Outgoing::Byte(byte)
//!             }
//!             None => Outgoing::EndOfTransfer,
//!         },
//!     );
//!
//!     let mut radio = Transceiver::with_default_config(pins, handler);
//!     radio.initialize()?;
//!     radio.send_packet()?;
//!
//!     loop {
//!         radio.poll_wait()?;
//!     }
//! }
//! ```

pub use regiface::errors::Error as LinkError;
use regiface::*;

mod fmt;

pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod handler;
pub mod link;
pub mod state;

pub use commands::*;
pub use config::Config;
pub use device::{Pins, Transceiver};
pub use error::Error;
pub use handler::{Callbacks, Outgoing, PacketHandler, ReadEvent};
pub use link::Link;
pub use state::State;
