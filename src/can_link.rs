//! Small CAN bus exchanges between two nodes.
//!
//! Each frame carries a single payload byte.

use crate::error::LinkError;
use embedded_hal::can::{nb::Can, Frame, Id};
use heapless::Vec;

/// Default capacity of a [`TextReceiver`].
pub const TEXT_CAPACITY: usize = 20;

fn send_byte<C: Can>(can: &mut C, id: Id, byte: u8) -> Result<(), LinkError<C::Error>> {
    let frame = C::Frame::new(id, &[byte]).ok_or(LinkError::Frame)?;
    nb::block!(can.transmit(&frame)).map_err(LinkError::Bus)?;
    Ok(())
}

fn receive_byte<C: Can>(can: &mut C) -> Result<Option<u8>, LinkError<C::Error>> {
    match can.receive() {
        Ok(frame) => Ok(frame.data().first().copied()),
        Err(nb::Error::WouldBlock) => Ok(None),
        Err(nb::Error::Other(error)) => Err(LinkError::Bus(error)),
    }
}

/// Exchanges a running counter with another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterNode {
    id: Id,
    sent: u8,
    received: u8,
}

impl CounterNode {
    /// Returns a node transmitting its counter with identifier `id`.
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            sent: 0,
            received: 0,
        }
    }

    /// Increments and transmits the counter, then takes the other node's
    /// counter if a frame is pending.
    pub fn exchange<C: Can>(&mut self, can: &mut C) -> Result<(), LinkError<C::Error>> {
        self.sent = self.sent.wrapping_add(1);
        send_byte(can, self.id, self.sent)?;

        if let Some(byte) = receive_byte(can)? {
            log::debug!("can: counter {} received", byte);
            self.received = byte;
        }

        Ok(())
    }

    pub fn sent(&self) -> u8 {
        self.sent
    }

    pub fn received(&self) -> u8 {
        self.received
    }
}

/// Sends a message one character per frame, starting over after the last
/// character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSender<'a> {
    id: Id,
    message: &'a [u8],
    index: usize,
}

impl<'a> TextSender<'a> {
    pub fn new(id: impl Into<Id>, message: &'a [u8]) -> Self {
        Self {
            id: id.into(),
            message,
            index: 0,
        }
    }

    /// Transmits the next character and returns it. Once the whole message
    /// has been sent this returns `Ok(None)` without transmitting, and the
    /// next call starts again from the first character.
    pub fn send_next<C: Can>(&mut self, can: &mut C) -> Result<Option<u8>, LinkError<C::Error>> {
        let byte = match self.message.get(self.index) {
            Some(&byte) if byte != 0 => byte,
            _ => {
                self.index = 0;
                return Ok(None);
            }
        };

        send_byte(can, self.id, byte)?;
        self.index += 1;

        Ok(Some(byte))
    }
}

/// Collects characters sent by a [`TextSender`].
///
/// A message is complete when a NUL character arrives or the buffer is
/// full.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextReceiver<const N: usize = TEXT_CAPACITY> {
    buffer: Vec<u8, N>,
}

impl<const N: usize> TextReceiver<N> {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Takes at most one pending frame. Returns the message when it is
    /// complete, and starts collecting the next one.
    pub fn poll<C: Can>(&mut self, can: &mut C) -> Result<Option<Vec<u8, N>>, LinkError<C::Error>> {
        match receive_byte(can)? {
            Some(byte) => Ok(self.push(byte)),
            None => Ok(None),
        }
    }

    /// Appends one received character. Returns the message when it is
    /// complete.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8, N>> {
        if byte != 0 && self.buffer.push(byte).is_ok() && !self.buffer.is_full() {
            return None;
        }

        log::debug!("can: message of {} bytes received", self.buffer.len());
        Some(core::mem::take(&mut self.buffer))
    }

    /// The characters received so far.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }
}
