//! Thermocouple conversions.
//!
//! Voltages are in microvolts and temperatures in hundredths of a degree
//! Celsius.

use crate::fixed::Polynomial;

const TYPE_K_BELOW_ZERO: &[i32] = &[
    0, 2639629, -1001834, -7623495, -51750922, -176344390, -335143805, -331192671, -134793524,
];
const TYPE_K_LOW: &[i32] = &[
    0, 164388, 16879, -1761422, 19173707, -92787626, 242736174, -358027528, 281193929, -91707895,
];
const TYPE_K_HIGH: &[i32] = &[
    -1687114, 40518839, -90491511, 196887684, -227871065, 136207339, -31547361,
];
const TYPE_K_TO_VOLTAGE: &[i32] = &[
    0, 413735, 83372, -137607, 1089544, -9978037, 43567176, -95708775, 84037362,
];

/// Type K, -200 °C to 1372 °C.
///
/// [`voltage`](ThermocoupleCalc::voltage) is fitted for cold junction
/// temperatures between -40 °C and 125 °C.
pub const TYPE_K: ThermocoupleCalc<'static> = ThermocoupleCalc::new(
    &[0, 20644],
    TYPE_K_SEGMENTS,
    Polynomial::new(TYPE_K_TO_VOLTAGE, 9, 5),
);

const TYPE_K_SEGMENTS: &[Polynomial<'static>] = &[
    Polynomial::new(TYPE_K_BELOW_ZERO, 11, 7),
    Polynomial::new(TYPE_K_LOW, 9, 1),
    Polynomial::new(TYPE_K_HIGH, 8, 7),
];

/// Piecewise polynomial conversion between thermocouple voltage and
/// temperature.
///
/// `segments[0]` covers voltages below `breakpoints[0]`. Each following
/// segment `i` covers voltages up to and including `breakpoints[i]`, and the
/// last segment covers everything above the last breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermocoupleCalc<'a> {
    breakpoints: &'a [i32],
    segments: &'a [Polynomial<'a>],
    to_voltage: Polynomial<'a>,
}

impl<'a> ThermocoupleCalc<'a> {
    /// `segments` must hold one more polynomial than `breakpoints` has
    /// entries, and `breakpoints` must be ascending.
    pub const fn new(
        breakpoints: &'a [i32],
        segments: &'a [Polynomial<'a>],
        to_voltage: Polynomial<'a>,
    ) -> Self {
        Self {
            breakpoints,
            segments,
            to_voltage,
        }
    }

    /// Returns the hot junction temperature (1/100 °C) for a thermocouple
    /// voltage in microvolts, assuming a cold junction at 0 °C.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermo_calc::thermocouple::TYPE_K;
    ///
    /// assert_eq!(TYPE_K.temperature(20644), 49998);
    /// ```
    pub fn temperature(&self, microvolts: i32) -> i32 {
        match self.segment(microvolts) {
            Some(segment) => segment.evaluate(microvolts),
            None => 0,
        }
    }

    /// Returns the thermocouple voltage in microvolts expected at a
    /// temperature (1/100 °C).
    ///
    /// # Examples
    ///
    /// ```
    /// use thermo_calc::thermocouple::TYPE_K;
    ///
    /// assert_eq!(TYPE_K.voltage(2500), 1000);
    /// ```
    pub fn voltage(&self, centi_celsius: i32) -> i32 {
        self.to_voltage.evaluate(centi_celsius)
    }

    /// Returns the hot junction temperature for a measured voltage with the
    /// cold junction at `cold_junction` (1/100 °C).
    pub fn compensated_temperature(&self, microvolts: i32, cold_junction: i32) -> i32 {
        self.temperature(microvolts.wrapping_add(self.voltage(cold_junction)))
    }

    fn segment(&self, microvolts: i32) -> Option<&Polynomial<'a>> {
        let index = match self.breakpoints.split_first() {
            Some((first, _)) if microvolts < *first => 0,
            Some((_, rest)) => 1 + rest.iter().take_while(|&&limit| microvolts > limit).count(),
            None => 0,
        };

        self.segments
            .get(index)
            .or_else(|| self.segments.last())
    }
}
