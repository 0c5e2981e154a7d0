//! Formatting of fixed-point readings for character LCDs and serial
//! terminals.

use core::fmt::{self, Write as _};
use embedded_hal::serial;
use heapless::String;
use ufmt::{uDisplay, uWrite, uwrite, Formatter};

/// Width of one row of a 16x2 character LCD.
pub const LINE_WIDTH: usize = 16;

/// A value in hundredths, printed with two decimals.
///
/// # Examples
///
/// ```
/// use thermo_calc::Centi;
///
/// assert_eq!(format!("{}", Centi(2345)), "23.45");
/// assert_eq!(format!("{}", Centi(-5)), "-0.05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Centi(pub i32);

impl Centi {
    /// The integer part, truncated toward zero.
    pub fn whole(self) -> i32 {
        self.0 / 100
    }

    /// The two decimals, without sign.
    pub fn fraction(self) -> u32 {
        (self.0 % 100).unsigned_abs()
    }

    fn sign(self) -> &'static str {
        if self.0 < 0 {
            "-"
        } else {
            ""
        }
    }
}

impl From<i32> for Centi {
    fn from(value: i32) -> Self {
        Centi(value)
    }
}

impl From<i16> for Centi {
    fn from(value: i16) -> Self {
        Centi(value.into())
    }
}

impl fmt::Display for Centi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{:02}",
            self.sign(),
            self.whole().unsigned_abs(),
            self.fraction()
        )
    }
}

impl uDisplay for Centi {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.sign())?;
        uwrite!(f, "{}.", self.whole().unsigned_abs())?;
        if self.fraction() < 10 {
            f.write_str("0")?;
        }
        uwrite!(f, "{}", self.fraction())
    }
}

/// Returns the LCD row for a temperature, eg. `Temp=23.45 C`.
///
/// Fails if the text does not fit in [`LINE_WIDTH`] characters.
///
/// # Examples
///
/// ```
/// use thermo_calc::{display::line, Centi};
///
/// assert_eq!(line(Centi(-1250)).unwrap().as_str(), "Temp=-12.50 C");
/// ```
pub fn line(value: Centi) -> Result<String<LINE_WIDTH>, fmt::Error> {
    let mut line = String::new();
    write!(line, "Temp={} C", value)?;
    Ok(line)
}

/// Writes text to a serial port, blocking on every byte.
pub struct SerialWriter<'a, S> {
    serial: &'a mut S,
}

impl<'a, S> SerialWriter<'a, S>
where
    S: serial::Write<u8>,
{
    pub fn new(serial: &'a mut S) -> Self {
        Self { serial }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), S::Error> {
        for &byte in bytes {
            nb::block!(self.serial.write(byte))?;
        }
        Ok(())
    }
}

impl<S> uWrite for SerialWriter<'_, S>
where
    S: serial::Write<u8>,
{
    type Error = S::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_bytes(s.as_bytes())
    }
}

/// Writes a temperature report line, eg. `Temp=23.45 C\r\n`.
pub fn write_report<S>(serial: &mut S, value: Centi) -> Result<(), S::Error>
where
    S: serial::Write<u8>,
{
    let mut writer = SerialWriter::new(serial);
    uwrite!(writer, "Temp={} C\r\n", value)
}
