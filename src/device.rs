//! RFM12 Transceiver Interface
//!
//! This module turns the byte-oriented, half-duplex FIFO radio into a packet
//! transmit/receive service driven from the chip's nIRQ line.
//!
//! The interface is built around the [`Transceiver`] struct which owns the
//! [`Pins`] of one chip and a [`PacketHandler`], and provides:
//! - Chip initialization from a [`Config`]
//! - Guarded protocol state transitions (see [`State`])
//! - The interrupt dispatcher moving bytes between FIFO and handler
//! - Listen, send and abort operations
//!
//! # Interrupt handling
//! nIRQ is level-triggered and active low. [`Transceiver::handle_interrupt`]
//! keeps reading the status word until the line is released, so it must be
//! called once per falling edge (or from [`poll_wait`](Transceiver::poll_wait)
//! on boards without a usable interrupt controller).
//!
//! The dispatcher is not reentrant. Mask the nIRQ interrupt around any call
//! made from thread context, including [`send_packet`](Transceiver::send_packet),
//! which runs the dispatcher itself.
//!
//! # Example
//! ```no_run
//! # use embedded_hal::digital::{InputPin, OutputPin};
//! # fn demo<SEL, SCK, SDI, SDO, DATA, NIRQ>(pins: rfm12::Pins<SEL, SCK, SDI, SDO, DATA, NIRQ>) -> Result<(), rfm12::Error>
//! # where
//! #     SEL: OutputPin, SCK: OutputPin, SDI: OutputPin, SDO: InputPin, DATA: OutputPin, NIRQ: InputPin,
//! # {
//! use rfm12::{Callbacks, Config, Outgoing, ReadEvent, Transceiver};
//!
//! let handler = Callbacks::new(
//!     |_event: ReadEvent, _byte: u8| true,
//!     || Outgoing::EndOfTransfer,
//! );
//! let mut radio = Transceiver::new(pins, handler, Config::default());
//! radio.initialize()?;
//! radio.listen(true)?;
//!
//! loop {
//!     radio.poll_wait()?;
//! }
//! # }
//! ```

use embedded_hal::digital::{InputPin, OutputPin};

use crate::commands::{
    FifoRead, PowerFlags, PowerManagement, SetFifoMode, StatusFlags, StatusRead, TransmitWrite,
    DUMMY_BYTE, SYNC_WORD,
};
use crate::config::Config;
use crate::error::Error;
use crate::fmt::{debug, trace, warn};
use crate::handler::{Outgoing, PacketHandler, ReadEvent};
use crate::link::Link;
use crate::state::State;

/// The six GPIO lines wired to one chip.
pub struct Pins<SEL, SCK, SDI, SDO, DATA, NIRQ> {
    /// nSEL, chip select (output)
    pub sel: SEL,
    /// SCK, serial clock (output)
    pub sck: SCK,
    /// SDI, serial data into the chip (output)
    pub sdi: SDI,
    /// SDO, serial data out of the chip (input)
    pub sdo: SDO,
    /// FSK/DATA/nFFS, held high for FIFO operation (output)
    pub data: DATA,
    /// nIRQ, interrupt request, active low (input)
    pub nirq: NIRQ,
}

/// Interrupt-driven packet service for one RFM12 chip.
pub struct Transceiver<SEL, SCK, SDI, SDO, DATA, NIRQ, H> {
    link: Link<SEL, SCK, SDI, SDO>,
    data: DATA,
    nirq: NIRQ,
    handler: H,
    config: Config,
    status: StatusFlags,
    state: State,
    auto_relisten: bool,
}

impl<SEL, SCK, SDI, SDO, DATA, NIRQ, H> Transceiver<SEL, SCK, SDI, SDO, DATA, NIRQ, H> {
    /// Creates a transceiver without touching the hardware.
    ///
    /// Call [`initialize`](Self::initialize) before anything else.
    pub fn new(pins: Pins<SEL, SCK, SDI, SDO, DATA, NIRQ>, handler: H, config: Config) -> Self {
        Self {
            link: Link::new(pins.sel, pins.sck, pins.sdi, pins.sdo),
            data: pins.data,
            nirq: pins.nirq,
            handler,
            config,
            status: StatusFlags::empty(),
            state: State::Idle,
            auto_relisten: false,
        }
    }

    /// Creates a transceiver using [`Config::default`].
    pub fn with_default_config(pins: Pins<SEL, SCK, SDI, SDO, DATA, NIRQ>, handler: H) -> Self {
        Self::new(pins, handler, Config::default())
    }

    /// Releases the pins and the packet handler.
    pub fn release(self) -> (Pins<SEL, SCK, SDI, SDO, DATA, NIRQ>, H) {
        let (sel, sck, sdi, sdo) = self.link.release();
        let pins = Pins {
            sel,
            sck,
            sdi,
            sdo,
            data: self.data,
            nirq: self.nirq,
        };
        (pins, self.handler)
    }

    /// Current protocol state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the driver falls back to Listen instead of Idle.
    pub fn auto_relisten(&self) -> bool {
        self.auto_relisten
    }

    /// Last observed status, including transient flags latched since the
    /// last [`clear_interrupts`](Self::clear_interrupts).
    pub fn status(&self) -> StatusFlags {
        self.status
    }

    /// Configuration applied by [`initialize`](Self::initialize).
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared access to the packet handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Exclusive access to the packet handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Forgets all latched status flags.
    ///
    /// The chip is not read; the next dispatcher pass starts from a clean slate.
    pub fn clear_interrupts(&mut self) {
        self.status = StatusFlags::empty();
    }

    /// Idle, or Listen when auto-relisten is on.
    fn resting_state(&self) -> State {
        if self.auto_relisten {
            State::Listen
        } else {
            State::Idle
        }
    }
}

impl<SEL, SCK, SDI, SDO, DATA, NIRQ, H> Transceiver<SEL, SCK, SDI, SDO, DATA, NIRQ, H>
where
    SEL: OutputPin,
    SCK: OutputPin,
    SDI: OutputPin,
    SDO: InputPin,
    DATA: OutputPin,
    NIRQ: InputPin,
    H: PacketHandler,
{
    /// Puts the lines in their idle levels and writes the configuration.
    ///
    /// Leaves the driver in [`State::Idle`] with no latched status and
    /// auto-relisten off, also when called again on a running radio.
    ///
    /// # Errors
    /// * `Error::Bus` - A line could not be driven
    pub fn initialize(&mut self) -> Result<(), Error> {
        self.link.init()?;
        self.data.set_high().map_err(|_| Error::Bus)?;

        for word in self.config.init_sequence() {
            self.link.exchange(word)?;
        }

        self.status = StatusFlags::empty();
        self.state = State::Idle;
        self.auto_relisten = false;
        debug!("rfm12 initialized");
        Ok(())
    }

    /// Returns `true` while the chip asserts nIRQ.
    ///
    /// # Errors
    /// * `Error::Bus` - nIRQ could not be sampled
    pub fn is_interrupt_pending(&mut self) -> Result<bool, Error> {
        self.nirq.is_low().map_err(|_| Error::Bus)
    }

    /// Moves to `target`, issuing its entry commands.
    ///
    /// Requesting the current state succeeds without touching the chip.
    ///
    /// # Errors
    /// * `Error::InvalidTransition` - `target` cannot be entered from the
    ///   current state; nothing was sent and the state is unchanged
    /// * `Error::Bus` - A line could not be driven
    pub fn transition(&mut self, target: State) -> Result<(), Error> {
        let from = self.state;
        if from == target {
            return Ok(());
        }
        if !target.can_enter_from(from) {
            return Err(Error::InvalidTransition { from, to: target });
        }

        match target {
            State::Idle => {
                self.set_power(PowerFlags::IDLE)?;
                self.set_fifo_fill(false)?;
            }
            State::Listen => {
                if from == State::Rx {
                    // stop the running fill so the next sync pattern restarts it
                    self.set_fifo_fill(false)?;
                } else {
                    self.set_power(PowerFlags::LISTEN)?;
                }
                self.set_fifo_fill(true)?;
            }
            State::Rx => {}
            State::TxSync0 => {
                self.transmit(DUMMY_BYTE)?;
                if from != State::TxResync {
                    self.transmit(DUMMY_BYTE)?;
                    self.set_power(PowerFlags::TRANSMIT)?;
                }
            }
            State::TxSync1 => self.transmit(SYNC_WORD[0])?,
            State::Tx => self.transmit(SYNC_WORD[1])?,
            // the trailer must be queued before the transmitter goes away
            State::TxEnd | State::TxResync => self.transmit(DUMMY_BYTE)?,
        }

        debug!("rfm12 {} -> {}", from, target);
        self.state = target;
        Ok(())
    }

    /// Services nIRQ until the chip releases it.
    ///
    /// Each pass reads and latches the status word, then moves at most one
    /// byte between the FIFO and the handler and advances the state machine.
    /// Returns immediately in [`State::Idle`], where no interrupts are expected.
    /// A rejected transition is logged and the loop carries on.
    ///
    /// # Errors
    /// * `Error::Bus` - A line could not be driven or sampled
    pub fn handle_interrupt(&mut self) -> Result<(), Error> {
        while self.is_interrupt_pending()? {
            let raw = self.link.execute_command(StatusRead)?;
            self.status = self.status.latch(raw);
            trace!("rfm12 status {}", self.status);

            let ready = self.status.contains(StatusFlags::FIFO_READY);
            let mut target = match self.state {
                State::Idle => return Ok(()),
                State::Listen if ready => {
                    let byte = self.read_fifo()?;
                    let accepted = self.handler.on_receive(ReadEvent::Start, byte);
                    self.transition(State::Rx)?;
                    if accepted {
                        State::Rx
                    } else {
                        State::Idle
                    }
                }
                State::Rx if ready => {
                    let byte = self.read_fifo()?;
                    let (event, next) = if self.status.contains(StatusFlags::DATA_QUALITY) {
                        (ReadEvent::Continue, State::Rx)
                    } else {
                        (ReadEvent::End, State::Idle)
                    };
                    if self.handler.on_receive(event, byte) {
                        next
                    } else {
                        State::Idle
                    }
                }
                State::TxSync0 if ready => State::TxSync1,
                State::TxSync1 if ready => State::Tx,
                State::Tx if ready => match self.handler.next_byte() {
                    Outgoing::Byte(byte) => {
                        self.transmit(byte)?;
                        State::Tx
                    }
                    Outgoing::EndOfTransfer => State::TxEnd,
                    Outgoing::Resync => State::TxResync,
                },
                State::TxEnd if ready => State::Idle,
                State::TxResync if ready => State::TxSync0,
                unchanged => unchanged,
            };

            if target == State::Idle && self.auto_relisten {
                target = State::Listen;
            }

            if target != self.state {
                match self.transition(target) {
                    Ok(()) => {}
                    Err(Error::InvalidTransition { from, to }) => {
                        warn!("rfm12 rejected transition {} -> {}", from, to);
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(())
    }

    /// Enables or disables auto-relisten.
    ///
    /// Enabling from Idle starts listening right away; disabling while
    /// listening goes back to Idle. A reception or transmission in progress
    /// is left alone and picks up the new policy when it finishes.
    ///
    /// # Errors
    /// * `Error::Bus` - A line could not be driven
    pub fn listen(&mut self, enable: bool) -> Result<(), Error> {
        self.auto_relisten = enable;
        match (enable, self.state) {
            (true, State::Idle) => self.transition(State::Listen),
            (false, State::Listen) => self.transition(State::Idle),
            _ => Ok(()),
        }
    }

    /// Starts transmitting a packet pulled byte by byte from the handler.
    ///
    /// The first dispatcher pass runs immediately so the pipeline fills
    /// without waiting for an edge on nIRQ.
    ///
    /// # Errors
    /// * `Error::InvalidTransition` - A reception or transmission is in progress
    /// * `Error::Bus` - A line could not be driven or sampled
    pub fn send_packet(&mut self) -> Result<(), Error> {
        let started = self.transition(State::TxSync0);
        self.handle_interrupt()?;
        started
    }

    /// Abandons a transmission and returns to Idle or Listen.
    ///
    /// # Errors
    /// * `Error::Bus` - A line could not be driven
    pub fn stop_sending(&mut self) -> Result<(), Error> {
        self.transition(self.resting_state())
    }

    /// Abandons a reception and returns to Idle or Listen.
    ///
    /// Does nothing unless a packet is being received.
    ///
    /// # Errors
    /// * `Error::Bus` - A line could not be driven
    pub fn stop_receiving(&mut self) -> Result<(), Error> {
        if self.state == State::Rx {
            self.transition(self.resting_state())
        } else {
            Ok(())
        }
    }

    /// Spins until nIRQ is asserted, then runs the dispatcher once.
    ///
    /// # Errors
    /// * `Error::Bus` - A line could not be driven or sampled
    pub fn poll_wait(&mut self) -> Result<(), Error> {
        while !self.is_interrupt_pending()? {
            core::hint::spin_loop();
        }
        self.handle_interrupt()
    }

    fn read_fifo(&mut self) -> Result<u8, Error> {
        Ok(self.link.execute_command(FifoRead)?.0)
    }

    fn transmit(&mut self, byte: u8) -> Result<(), Error> {
        self.link.execute_command(TransmitWrite { byte })?;
        Ok(())
    }

    fn set_power(&mut self, config: PowerFlags) -> Result<(), Error> {
        self.link.execute_command(PowerManagement { config })?;
        Ok(())
    }

    fn set_fifo_fill(&mut self, fill: bool) -> Result<(), Error> {
        let config = self.config.fifo.with_fill(fill);
        self.link.execute_command(SetFifoMode { config })?;
        Ok(())
    }
}

impl<SEL, SCK, SDI, SDO, DATA, NIRQ, H> Transceiver<SEL, SCK, SDI, SDO, DATA, NIRQ, H>
where
    SEL: OutputPin,
    SCK: OutputPin,
    SDI: OutputPin,
    SDO: InputPin,
    DATA: OutputPin,
    NIRQ: InputPin + embedded_hal_async::digital::Wait,
    H: PacketHandler,
{
    /// Waits for nIRQ without spinning, then runs the dispatcher once.
    ///
    /// This is the async version of [`poll_wait`](Transceiver::poll_wait).
    pub async fn poll_wait_async(&mut self) -> Result<(), Error> {
        self.nirq.wait_for_low().await.map_err(|_| Error::Bus)?;
        self.handle_interrupt()
    }
}
