//! Bit-banged serial link
//!
//! The RFM12 speaks a 16-bit synchronous serial protocol over four GPIO lines:
//!
//! - `SEL` (nSEL): active-low select, framing one command word
//! - `SCK`: clock, idles low
//! - `SDI`: data into the chip, set up before the rising clock edge
//! - `SDO`: data out of the chip, sampled after the rising clock edge
//!
//! Words are exchanged most significant bit first. Every exchange is full
//! duplex: while a command word is clocked in, the chip clocks a response out.
//!
//! # Example
//! ```no_run
//! # fn demo<SEL, SCK, SDI, SDO>(sel: SEL, sck: SCK, sdi: SDI, sdo: SDO) -> Result<(), rfm12::LinkError>
//! # where
//! #     SEL: embedded_hal::digital::OutputPin,
//! #     SCK: embedded_hal::digital::OutputPin,
//! #     SDI: embedded_hal::digital::OutputPin,
//! #     SDO: embedded_hal::digital::InputPin,
//! # {
//! use rfm12::{Link, StatusRead};
//!
//! let mut link = Link::new(sel, sck, sdi, sdo);
//! link.init()?;
//! let status = link.execute_command(StatusRead)?;
//! # Ok(())
//! # }
//! ```

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin};
use regiface::{errors::Error as RegifaceError, ByteArray, Command, FromByteArray, ToByteArray};

use crate::commands::encode;
use crate::fmt::trace;

/// Software serial link to one chip.
///
/// Owns the four link lines exclusively; two chips need two links.
pub struct Link<SEL, SCK, SDI, SDO> {
    sel: SEL,
    sck: SCK,
    sdi: SDI,
    sdo: SDO,
}

impl<SEL, SCK, SDI, SDO> Link<SEL, SCK, SDI, SDO> {
    /// Creates a link over the given lines without touching them.
    pub fn new(sel: SEL, sck: SCK, sdi: SDI, sdo: SDO) -> Self {
        Self { sel, sck, sdi, sdo }
    }

    /// Releases the underlying lines.
    pub fn release(self) -> (SEL, SCK, SDI, SDO) {
        (self.sel, self.sck, self.sdi, self.sdo)
    }
}

impl<SEL, SCK, SDI, SDO> Link<SEL, SCK, SDI, SDO>
where
    SEL: OutputPin,
    SCK: OutputPin,
    SDI: OutputPin,
    SDO: InputPin,
{
    /// Drives the lines to their idle levels: deselected, clock low, SDI high.
    ///
    /// # Errors
    /// * `RegifaceError::BusError` - A line could not be driven
    pub fn init(&mut self) -> Result<(), RegifaceError> {
        self.sel.set_high().map_err(|_| RegifaceError::BusError)?;
        self.sdi.set_high().map_err(|_| RegifaceError::BusError)?;
        self.sck.set_low().map_err(|_| RegifaceError::BusError)
    }

    /// Clocks one command word in and returns the word clocked out.
    ///
    /// # Errors
    /// * `RegifaceError::BusError` - A line could not be driven or sampled
    pub fn exchange(&mut self, command: u16) -> Result<u16, RegifaceError> {
        self.sck.set_low().map_err(|_| RegifaceError::BusError)?;
        self.sel.set_low().map_err(|_| RegifaceError::BusError)?;

        let mut response = 0u16;
        for bit in (0..16).rev() {
            let driven = if command & (1 << bit) != 0 {
                self.sdi.set_high()
            } else {
                self.sdi.set_low()
            };
            driven.map_err(|_| RegifaceError::BusError)?;

            self.sck.set_high().map_err(|_| RegifaceError::BusError)?;
            response <<= 1;
            if self.sdo.is_high().map_err(|_| RegifaceError::BusError)? {
                response |= 1;
            }
            self.sck.set_low().map_err(|_| RegifaceError::BusError)?;
        }

        self.sel.set_high().map_err(|_| RegifaceError::BusError)?;
        trace!("rfm12 {=u16:#x} -> {=u16:#x}", command, response);

        Ok(response)
    }

    /// Executes a command on the chip.
    ///
    /// The response parameters are decoded from the low bytes of the response
    /// word.
    ///
    /// # Errors
    /// * `RegifaceError::BusError` - A line could not be driven or sampled
    /// * `RegifaceError::DeserializationError` - Failed to parse the response
    pub fn execute_command<C>(&mut self, command: C) -> Result<C::ResponseParameters, RegifaceError>
    where
        C: Command<IdType = u16>,
        C::CommandParameters: ToByteArray<Error = Infallible>,
    {
        let response = self.exchange(encode(command))?.to_be_bytes();

        let mut raw_response = <C::ResponseParameters as FromByteArray>::Array::new();
        let raw = raw_response.as_mut();
        let len = raw.len();
        if len > response.len() {
            return Err(RegifaceError::DeserializationError);
        }
        raw.copy_from_slice(&response[response.len() - len..]);

        C::ResponseParameters::from_bytes(raw_response)
            .map_err(|_| RegifaceError::DeserializationError)
    }
}
