use core::{convert::Infallible, fmt};

/// Failures of the resistance calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    /// The reference measurement was zero.
    ZeroReference,
    /// The measured and reference signals have opposite signs.
    NegativeResistance,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::ZeroReference => f.write_str("reference measurement is zero"),
            CalcError::NegativeResistance => f.write_str("computed resistance is negative"),
        }
    }
}

/// Errors returned by the readers in [`reader`](crate::reader).
///
/// `A` is the ADC error type. `S` is the error type of the excitation
/// source, for readers that drive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError<A, S = Infallible> {
    Adc(A),
    Excitation(S),
    Calc(CalcError),
}

impl<A, S> From<CalcError> for ReadError<A, S> {
    fn from(error: CalcError) -> Self {
        ReadError::Calc(error)
    }
}

impl<A: fmt::Debug, S: fmt::Debug> fmt::Display for ReadError<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Adc(error) => write!(f, "ADC read failed: {:?}", error),
            ReadError::Excitation(error) => write!(f, "excitation source failed: {:?}", error),
            ReadError::Calc(error) => write!(f, "{}", error),
        }
    }
}

/// Errors returned by [`can_link`](crate::can_link).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError<E> {
    Bus(E),
    /// The controller could not build a frame for the configured id.
    Frame,
}

impl<E: fmt::Debug> fmt::Display for LinkError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Bus(error) => write!(f, "CAN bus error: {:?}", error),
            LinkError::Frame => f.write_str("could not build CAN frame"),
        }
    }
}
