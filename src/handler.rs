//! Application packet callbacks
//!
//! The driver moves exactly one byte at a time between the radio and the
//! application. Framing, buffering, CRC and retransmission live above this
//! interface in a [`PacketHandler`].
//!
//! Both callbacks run from the interrupt dispatcher and must not block.

/// Position of a received byte within the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadEvent {
    /// First byte after the sync pattern
    Start,
    /// A byte in the middle of the packet
    Continue,
    /// Last byte, the data quality detector has dropped
    End,
}

/// What the transmitter should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outgoing {
    /// Transmit this payload byte
    Byte(u8),
    /// Packet complete, send the trailer and shut the transmitter down
    EndOfTransfer,
    /// Send the trailer followed by a fresh sync preamble
    Resync,
}

impl From<u8> for Outgoing {
    fn from(byte: u8) -> Self {
        Outgoing::Byte(byte)
    }
}

/// Byte-level packet source and sink.
pub trait PacketHandler {
    /// Called for every received byte.
    ///
    /// Returning `false` aborts the reception; the driver then behaves as if
    /// `byte` had been the last one.
    fn on_receive(&mut self, event: ReadEvent, byte: u8) -> bool;

    /// Called whenever the transmitter has room for another byte.
    fn next_byte(&mut self) -> Outgoing;
}

impl<T: PacketHandler + ?Sized> PacketHandler for &mut T {
    fn on_receive(&mut self, event: ReadEvent, byte: u8) -> bool {
        (**self).on_receive(event, byte)
    }

    fn next_byte(&mut self) -> Outgoing {
        (**self).next_byte()
    }
}

/// Adapter serving a pair of closures as a [`PacketHandler`].
///
/// ```
/// use rfm12::{Callbacks, Outgoing, PacketHandler, ReadEvent};
///
/// let mut remaining = 2u8;
/// let mut handler = Callbacks::new(
///     |_event: ReadEvent, _byte: u8| true,
///     move || match remaining {
///         0 => Outgoing::EndOfTransfer,
///         n => {
///             remaining -= 1;
///             Outgoing::Byte(n)
///         }
///     },
/// );
/// assert_eq!(handler.next_byte(), Outgoing::Byte(2));
/// ```
pub struct Callbacks<R, W> {
    read: R,
    write: W,
}

impl<R, W> Callbacks<R, W>
where
    R: FnMut(ReadEvent, u8) -> bool,
    W: FnMut() -> Outgoing,
{
    /// Binds a read and a write closure.
    pub fn new(read: R, write: W) -> Self {
        Self { read, write }
    }

    /// Releases the closures.
    pub fn release(self) -> (R, W) {
        (self.read, self.write)
    }
}

impl<R, W> PacketHandler for Callbacks<R, W>
where
    R: FnMut(ReadEvent, u8) -> bool,
    W: FnMut() -> Outgoing,
{
    fn on_receive(&mut self, event: ReadEvent, byte: u8) -> bool {
        (self.read)(event, byte)
    }

    fn next_byte(&mut self) -> Outgoing {
        (self.write)()
    }
}
