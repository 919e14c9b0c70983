//! Software model of an RFM12 on the far side of the bit-banged link.
//!
//! The model decodes clocked command words, answers with queued status words,
//! feeds the receive FIFO and records everything the driver sends. nIRQ is
//! asserted for as long as status words are queued; each status read retires
//! one of them.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::future::poll_fn;
use std::rc::Rc;
use std::task::Poll;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use rfm12::{Config, Outgoing, PacketHandler, Pins, ReadEvent, Transceiver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Sel,
    Sck,
    Sdi,
    Sdo,
    Data,
    Nirq,
}

#[derive(Debug, Default)]
pub struct Chip {
    selected: bool,
    clock: bool,
    sdi: bool,
    shift_in: u16,
    bits: u8,
    response: u16,
    /// Status words still to be reported, nIRQ is low while non-empty
    pub statuses: VecDeque<u16>,
    /// Bytes waiting in the receive FIFO
    pub rx_fifo: VecDeque<u8>,
    /// Every complete command word clocked in
    pub commands: Vec<u16>,
    /// Bytes written to the transmit register
    pub transmitted: Vec<u8>,
    /// Level of the FSK/DATA/nFFS line
    pub data_high: bool,
}

impl Chip {
    fn drive(&mut self, line: Line, high: bool) {
        match line {
            Line::Sel => {
                if !high && !self.selected {
                    self.selected = true;
                    self.bits = 0;
                    self.shift_in = 0;
                    self.response = self.statuses.front().copied().unwrap_or(0);
                } else if high && self.selected {
                    self.selected = false;
                    if self.bits == 16 {
                        self.complete(self.shift_in);
                    }
                }
            }
            Line::Sck => {
                if high && !self.clock && self.selected {
                    self.shift_in = (self.shift_in << 1) | u16::from(self.sdi);
                    self.bits += 1;
                    if self.bits == 8 && self.shift_in == 0xB0 {
                        let byte = self.rx_fifo.pop_front().unwrap_or(0);
                        self.response = (self.response & 0xFF00) | u16::from(byte);
                    }
                }
                self.clock = high;
            }
            Line::Sdi => self.sdi = high,
            Line::Data => self.data_high = high,
            Line::Sdo | Line::Nirq => panic!("{:?} is an input", line),
        }
    }

    fn sample(&self, line: Line) -> bool {
        match line {
            Line::Sdo => {
                self.selected
                    && (1..=16).contains(&self.bits)
                    && self.response & (1 << (16 - self.bits)) != 0
            }
            Line::Nirq => self.statuses.is_empty(),
            other => panic!("{:?} is an output", other),
        }
    }

    fn complete(&mut self, word: u16) {
        self.commands.push(word);
        if word == 0x0000 {
            self.statuses.pop_front();
        } else if word & 0xFF00 == 0xB800 {
            self.transmitted.push(word as u8);
        }
    }

    /// Commands received since the given count, for checking entry actions.
    pub fn commands_since(&self, count: usize) -> &[u16] {
        &self.commands[count..]
    }
}

pub struct SimPin {
    chip: Rc<RefCell<Chip>>,
    line: Line,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.chip.borrow_mut().drive(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.chip.borrow_mut().drive(self.line, true);
        Ok(())
    }
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.chip.borrow().sample(self.line))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.chip.borrow().sample(self.line))
    }
}

impl SimPin {
    /// Resolves once the line reads `high`; pending otherwise.
    async fn wait_for_level(&mut self, high: bool) -> Result<(), Infallible> {
        poll_fn(|_| {
            if self.chip.borrow().sample(self.line) == high {
                Poll::Ready(Ok(()))
            } else {
                Poll::Pending
            }
        })
        .await
    }
}

// The model has no edges of its own; an edge wait settles on the level it ends at.
impl embedded_hal_async::digital::Wait for SimPin {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        self.wait_for_level(true).await
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        self.wait_for_level(false).await
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        self.wait_for_level(true).await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.wait_for_level(false).await
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Handler recording received bytes and serving queued outgoing actions.
#[derive(Debug, Default)]
pub struct Recorder {
    pub received: Vec<(ReadEvent, u8)>,
    pub outgoing: VecDeque<Outgoing>,
    pub reject: Option<ReadEvent>,
}

impl PacketHandler for Recorder {
    fn on_receive(&mut self, event: ReadEvent, byte: u8) -> bool {
        self.received.push((event, byte));
        self.reject != Some(event)
    }

    fn next_byte(&mut self) -> Outgoing {
        self.outgoing.pop_front().unwrap_or(Outgoing::EndOfTransfer)
    }
}

pub type SimRadio = Transceiver<SimPin, SimPin, SimPin, SimPin, SimPin, SimPin, Recorder>;

pub const FIFO_READY: u16 = 0x8000;
pub const DATA_QUALITY: u16 = 0x0080;

/// An initialized radio wired to a fresh chip model.
pub fn radio() -> (SimRadio, Rc<RefCell<Chip>>) {
    let chip = Rc::new(RefCell::new(Chip::default()));
    let pin = |line| SimPin {
        chip: chip.clone(),
        line,
    };
    let pins = Pins {
        sel: pin(Line::Sel),
        sck: pin(Line::Sck),
        sdi: pin(Line::Sdi),
        sdo: pin(Line::Sdo),
        data: pin(Line::Data),
        nirq: pin(Line::Nirq),
    };

    let mut radio = Transceiver::new(pins, Recorder::default(), Config::default());
    radio.initialize().unwrap();
    (radio, chip)
}

/// Queues one status word, asserting nIRQ.
pub fn raise(chip: &Rc<RefCell<Chip>>, status: u16) {
    chip.borrow_mut().statuses.push_back(status);
}

/// Queues a received byte together with the status word announcing it.
pub fn deliver(chip: &Rc<RefCell<Chip>>, status: u16, byte: u8) {
    let mut chip = chip.borrow_mut();
    chip.rx_fifo.push_back(byte);
    chip.statuses.push_back(status);
}
