use crate::display::SerialWriter;
use embedded_hal::serial;

/// Echoes bytes received on a serial port and acknowledges each one.
///
/// For every received byte the handler writes the byte back, then a
/// `Received: <byte>\r\n` line. When the byte is `trigger` it also writes
/// `greeting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Echo<'a> {
    trigger: u8,
    greeting: &'a [u8],
}

impl Default for Echo<'static> {
    fn default() -> Self {
        Echo::new(b'a', b"Hello from the lab\r\n")
    }
}

impl<'a> Echo<'a> {
    pub const fn new(trigger: u8, greeting: &'a [u8]) -> Self {
        Self { trigger, greeting }
    }

    /// Handles at most one received byte. Returns `Ok(None)` when nothing
    /// has been received.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermo_calc::serial_echo::Echo;
    /// # use embedded_hal_mock::serial::{Mock, Transaction};
    /// #
    /// # let expectations = [
    /// #     Transaction::read(b'x'),
    /// #     Transaction::write(b'x'),
    /// #     Transaction::write_many(b"Received: x\r\n"),
    /// # ];
    /// # let mut serial = Mock::new(&expectations);
    ///
    /// let echo = Echo::default();
    ///
    /// assert_eq!(echo.poll(&mut serial), Ok(Some(b'x')));
    /// # serial.done();
    /// ```
    pub fn poll<S, E>(&self, serial: &mut S) -> Result<Option<u8>, E>
    where
        S: serial::Read<u8, Error = E> + serial::Write<u8, Error = E>,
    {
        let byte = match serial.read() {
            Ok(byte) => byte,
            Err(nb::Error::WouldBlock) => return Ok(None),
            Err(nb::Error::Other(error)) => return Err(error),
        };

        log::trace!("serial: received {:#04x}", byte);

        let mut writer = SerialWriter::new(serial);
        writer.write_bytes(&[byte])?;
        writer.write_bytes(b"Received: ")?;
        writer.write_bytes(&[byte])?;
        writer.write_bytes(b"\r\n")?;

        if byte == self.trigger {
            writer.write_bytes(self.greeting)?;
        }

        Ok(Some(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::{
        serial::{Mock, Transaction},
        MockError,
    };
    use std::io::ErrorKind;

    #[test]
    fn echoes_and_acknowledges() {
        let expectations = [
            Transaction::read(b'z'),
            Transaction::write(b'z'),
            Transaction::write_many(b"Received: z\r\n"),
        ];
        let mut serial = Mock::new(&expectations);

        assert_eq!(Echo::default().poll(&mut serial), Ok(Some(b'z')));
        serial.done();
    }

    #[test]
    fn greets_on_trigger() {
        let expectations = [
            Transaction::read(b'a'),
            Transaction::write(b'a'),
            Transaction::write_many(b"Received: a\r\n"),
            Transaction::write_many(b"Hello from the lab\r\n"),
        ];
        let mut serial = Mock::new(&expectations);

        assert_eq!(Echo::default().poll(&mut serial), Ok(Some(b'a')));
        serial.done();
    }

    #[test]
    fn custom_greeting() {
        let expectations = [
            Transaction::read(b'?'),
            Transaction::write(b'?'),
            Transaction::write_many(b"Received: ?\r\n"),
            Transaction::write_many(b"ok\r\n"),
        ];
        let mut serial = Mock::new(&expectations);

        assert_eq!(Echo::new(b'?', b"ok\r\n").poll(&mut serial), Ok(Some(b'?')));
        serial.done();
    }

    #[test]
    fn read_error() {
        let expectations = [Transaction::read_error(nb::Error::Other(MockError::Io(
            ErrorKind::BrokenPipe,
        )))];
        let mut serial = Mock::new(&expectations);

        assert!(Echo::default().poll(&mut serial).is_err());
        serial.done();
    }

    #[test]
    fn write_error() {
        let expectations = [
            Transaction::read(b'q'),
            Transaction::write_error(b'q', nb::Error::Other(MockError::Io(ErrorKind::BrokenPipe))),
        ];
        let mut serial = Mock::new(&expectations);

        assert!(Echo::default().poll(&mut serial).is_err());
        serial.done();
    }
}
