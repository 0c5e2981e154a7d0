//! Temperature sensor conversions for [`embedded-hal`](embedded_hal) ADCs.
//!
//! The conversions work in fixed point and report temperatures in
//! hundredths of a degree Celsius:
//!
//! - [`rtd`]: platinum RTDs (PT100, PT500, PT1000)
//! - [`thermocouple`]: type K thermocouples, with cold junction compensation
//! - [`thermistor`]: NTC thermistors, by the Steinhart-Hart equation or a
//!   lookup table
//!
//! [`reader`] ties a conversion to ADC channels, [`display`] formats
//! results for a 16 character display or a serial port, and
//! [`serial_echo`] and [`can_link`] cover the serial and CAN bus exchanges
//! run alongside the measurements.
//!
//! # Examples
//!
//! ```
//! use thermo_calc::{rtd, Centi};
//!
//! let milliohms = rtd::resistance(1385, 0, 1000, 100_000)?;
//! let temperature = rtd::PT100.temperature(milliohms);
//!
//! assert_eq!(Centi(temperature).to_string(), "99.98");
//! # Ok::<(), thermo_calc::CalcError>(())
//! ```

#![cfg_attr(not(test), no_std)]

mod interpolate;

pub mod can_link;
pub mod display;
pub mod error;
pub mod fixed;
pub mod reader;
pub mod rtd;
pub mod scale;
pub mod serial_echo;
pub mod thermistor;
pub mod thermocouple;

pub use display::Centi;
pub use error::{CalcError, LinkError, ReadError};
pub use fixed::mult_shift_24;
pub use scale::AdcScale;
