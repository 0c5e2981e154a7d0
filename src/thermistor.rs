//! NTC thermistor conversions.
//!
//! Resistances are in ohms and temperatures in hundredths of a degree
//! Celsius. The temperature can be computed with the Steinhart-Hart
//! equation or looked up in a table of resistances.

use crate::{error::CalcError, interpolate::interpolate};

const KELVIN_OFFSET: f64 = 273.15;

/// Reference resistor used with [`NTC_10K`].
pub const REFERENCE_OHMS: u32 = 10_000;

/// Steinhart-Hart coefficients for a 10 kΩ NTC thermistor.
pub const NTC_10K: SteinhartHart = SteinhartHart {
    a: 0.0009032679,
    b: 0.000248772,
    c: 2.041094e-7,
};

/// Returns the thermistor resistance from the voltages across a reference
/// resistor and the thermistor, wired in series.
///
/// Only the ratio of the two voltages is used, so they can be given in any
/// unit (eg. raw ADC counts) as long as it is the same for both. The result
/// is rounded to the nearest ohm.
///
/// # Examples
///
/// ```
/// use thermo_calc::thermistor::{resistance, REFERENCE_OHMS};
///
/// assert_eq!(resistance(1500, 1000, REFERENCE_OHMS), Ok(6667));
/// ```
pub fn resistance(
    v_reference: i32,
    v_thermistor: i32,
    reference_ohms: u32,
) -> Result<u32, CalcError> {
    if v_reference == 0 {
        return Err(CalcError::ZeroReference);
    }

    let numerator =
        i64::from(reference_ohms) * i64::from(v_thermistor) + i64::from(v_reference / 2);
    let ohms = numerator / i64::from(v_reference);

    if ohms < 0 {
        return Err(CalcError::NegativeResistance);
    }

    Ok(u32::try_from(ohms).unwrap_or(u32::MAX))
}

/// Conversion from thermistor resistance to temperature.
pub trait TemperatureCurve {
    /// Returns the temperature (1/100 °C) for a resistance in ohms.
    fn temperature(&self, ohms: u32) -> i16;
}

/// Coefficients of the Steinhart-Hart equation
/// `1/T = a + b ln(R) + c ln(R)³`, with `T` in kelvin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteinhartHart {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl SteinhartHart {
    /// Returns the resistance in ohms at a temperature (1/100 °C).
    pub fn resistance(&self, centi_celsius: i32) -> f64 {
        let kelvin = f64::from(centi_celsius) / 100.0 + KELVIN_OFFSET;
        let x = (self.a - 1.0 / kelvin) / self.c;
        let y = libm::sqrt(libm::pow(self.b / (3.0 * self.c), 3.0) + x * x / 4.0);

        libm::exp(libm::cbrt(y - x / 2.0) - libm::cbrt(y + x / 2.0))
    }
}

impl TemperatureCurve for SteinhartHart {
    /// # Examples
    ///
    /// ```
    /// use thermo_calc::thermistor::{TemperatureCurve, NTC_10K};
    ///
    /// assert_eq!(NTC_10K.temperature(3603), 5443);
    /// ```
    fn temperature(&self, ohms: u32) -> i16 {
        let ln = libm::log(f64::from(ohms));
        let inverse = self.a + self.b * ln + self.c * ln * ln * ln;
        let celsius = 1.0 / inverse - KELVIN_OFFSET;

        (celsius * 100.0 + 0.5) as i16
    }
}

/// A table of thermistor resistances at evenly spaced temperatures.
///
/// `resistances[i]` is the resistance at `min_temperature + i * step`.
/// Since the thermistor has a negative temperature coefficient the
/// resistances are in descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lut<'a> {
    resistances: &'a [u32],
    min_temperature: i16,
    step: i16,
}

impl<'a> Lut<'a> {
    /// Returns a lookup table over `resistances`.
    ///
    /// The table must not be empty and must be in descending order or this
    /// function will panic when running in debug mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermo_calc::thermistor::{Lut, TemperatureCurve};
    ///
    /// // 0 °C to 20 °C in 10 °C steps
    /// let lut = Lut::new(&[27219, 17938, 12087], 0, 1000);
    ///
    /// assert_eq!(lut.temperature(18000), 1000);
    /// ```
    pub fn new(resistances: &'a [u32], min_temperature: i16, step: i16) -> Self {
        debug_assert!(!resistances.is_empty(), "The table must not be empty");
        debug_assert!(
            resistances.windows(2).all(|w| w[0] >= w[1]),
            "The resistances in table must be in descending order"
        );

        Self {
            resistances,
            min_temperature,
            step,
        }
    }

    /// Builds a table of `N` resistances from `curve`, starting at
    /// `min_temperature` and spaced by `step` (both 1/100 °C).
    pub fn generate<const N: usize>(
        curve: &SteinhartHart,
        min_temperature: i16,
        step: i16,
    ) -> [u32; N] {
        let mut table = [0; N];

        for (index, entry) in table.iter_mut().enumerate() {
            let centi_celsius = i32::from(min_temperature) + index as i32 * i32::from(step);
            *entry = libm::round(curve.resistance(centi_celsius)) as u32;
        }

        table
    }

    /// Returns the temperature between the two table entries bracketing
    /// `ohms`, using linear interpolation. If `ohms` falls outside the
    /// table, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermo_calc::thermistor::Lut;
    ///
    /// let lut = Lut::new(&[300, 200, 100], 0, 1000);
    ///
    /// assert_eq!(lut.interpolated_temperature(250), Some(500));
    /// assert_eq!(lut.interpolated_temperature(50), None);
    /// ```
    pub fn interpolated_temperature(&self, ohms: u32) -> Option<i16> {
        match self.search(ohms) {
            Ok(index) => Some(self.temperature_at(index)),
            Err(0) => None,
            Err(index) if index == self.resistances.len() => None,
            Err(index) => {
                let temperature = interpolate(
                    self.resistances[index],
                    self.resistances[index - 1],
                    self.temperature_at(index).into(),
                    self.temperature_at(index - 1).into(),
                    ohms,
                );
                Some(saturate(temperature))
            }
        }
    }

    /// Returns the smallest temperature in the table.
    pub fn min_temperature(&self) -> i16 {
        self.min_temperature
    }

    /// Returns the largest temperature in the table.
    pub fn max_temperature(&self) -> i16 {
        self.temperature_at(self.resistances.len().saturating_sub(1))
    }

    fn nearest_index(&self, ohms: u32) -> usize {
        let last = self.resistances.len().saturating_sub(1);

        match self.search(ohms) {
            Ok(index) => index,
            Err(0) => 0,
            Err(index) if index > last => last,
            Err(index) => {
                let above = self.resistances[index - 1] - ohms;
                let below = ohms - self.resistances[index];

                if below < above {
                    index
                } else {
                    index - 1
                }
            }
        }
    }

    fn search(&self, ohms: u32) -> Result<usize, usize> {
        self.resistances.binary_search_by(|probe| ohms.cmp(probe))
    }

    fn temperature_at(&self, index: usize) -> i16 {
        let offset = i32::try_from(index).unwrap_or(i32::MAX).saturating_mul(self.step.into());
        saturate(i32::from(self.min_temperature).saturating_add(offset))
    }
}

impl TemperatureCurve for Lut<'_> {
    /// Returns the temperature of the table entry closest to `ohms`,
    /// clamped to the range of the table.
    fn temperature(&self, ohms: u32) -> i16 {
        self.temperature_at(self.nearest_index(ohms))
    }
}

fn saturate(value: i32) -> i16 {
    value.clamp(i16::MIN.into(), i16::MAX.into()) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [u32; 11] = [
        27219, 17938, 12087, 8314, 5830, 4161, 3020, 2225, 1664, 1261, 968,
    ];

    fn lut() -> Lut<'static> {
        Lut::new(&TABLE, 0, 1000)
    }

    #[test]
    fn resistance_from_voltages() {
        assert_eq!(resistance(1000, 1000, REFERENCE_OHMS), Ok(10000));
        assert_eq!(resistance(2048, 1024, REFERENCE_OHMS), Ok(5000));
        assert_eq!(resistance(1000, 3000, REFERENCE_OHMS), Ok(30000));
        assert_eq!(resistance(3, 1, REFERENCE_OHMS), Ok(3333));
        assert_eq!(resistance(1000, 0, REFERENCE_OHMS), Ok(0));
    }

    #[test]
    fn resistance_negative_voltages() {
        assert_eq!(resistance(-1000, -500, REFERENCE_OHMS), Ok(5000));
        assert_eq!(
            resistance(1000, -10, REFERENCE_OHMS),
            Err(CalcError::NegativeResistance)
        );
    }

    #[test]
    fn resistance_zero_reference() {
        assert_eq!(
            resistance(0, 1000, REFERENCE_OHMS),
            Err(CalcError::ZeroReference)
        );
    }

    #[test]
    fn steinhart_hart_temperature() {
        assert_eq!(NTC_10K.temperature(10000), 2500);
        assert_eq!(NTC_10K.temperature(3603), 5443);
        assert_eq!(NTC_10K.temperature(20000), 734);
        assert_eq!(NTC_10K.temperature(1000), 9874);
        assert_eq!(NTC_10K.temperature(100000), -2797);
    }

    #[test]
    fn steinhart_hart_resistance() {
        let ohms = NTC_10K.resistance(2500);
        assert!((ohms - 10000.0).abs() < 10.0, "{}", ohms);

        let back = NTC_10K.temperature(libm::round(NTC_10K.resistance(6000)) as u32);
        assert!((back - 6000).abs() <= 1, "{}", back);
    }

    #[test]
    fn generate_table() {
        let generated: [u32; 11] = Lut::generate(&NTC_10K, 0, 1000);

        for (generated, expected) in generated.iter().zip(TABLE.iter()) {
            assert!(generated.abs_diff(*expected) <= 1, "{} != {}", generated, expected);
        }
    }

    #[test]
    #[should_panic]
    fn panics_if_empty_table() {
        Lut::new(&[], 0, 100);
    }

    #[test]
    #[should_panic]
    fn panics_if_unsorted_table() {
        Lut::new(&[100, 200, 300], 0, 1000);
    }

    #[test]
    fn nearest_exact_values() {
        assert_eq!(lut().temperature(27219), 0);
        assert_eq!(lut().temperature(12087), 2000);
        assert_eq!(lut().temperature(968), 10000);
    }

    #[test]
    fn nearest_between_values() {
        assert_eq!(lut().temperature(10000), 3000);
        assert_eq!(lut().temperature(11000), 2000);
        assert_eq!(lut().temperature(1300), 9000);
    }

    #[test]
    fn nearest_outside_range() {
        assert_eq!(lut().temperature(40000), 0);
        assert_eq!(lut().temperature(100), 10000);
        assert_eq!(lut().temperature(0), 10000);
    }

    #[test]
    fn nearest_tie_takes_lower_temperature() {
        let lut = Lut::new(&[300, 200, 100], 500, 250);
        assert_eq!(lut.temperature(150), 750);
        assert_eq!(lut.temperature(250), 500);
    }

    #[test]
    fn interpolates() {
        assert_eq!(lut().interpolated_temperature(10000), Some(2554));
        assert_eq!(lut().interpolated_temperature(12087), Some(2000));
        assert_eq!(lut().interpolated_temperature(27219), Some(0));
        assert_eq!(lut().interpolated_temperature(968), Some(10000));
    }

    #[test]
    fn interpolated_outside_range() {
        assert_eq!(lut().interpolated_temperature(27220), None);
        assert_eq!(lut().interpolated_temperature(967), None);
    }

    #[test]
    fn negative_start() {
        let lut = Lut::new(&[300, 200, 100], -1000, 500);
        assert_eq!(lut.temperature(290), -1000);
        assert_eq!(lut.interpolated_temperature(150), Some(-250));
        assert_eq!(lut.min_temperature(), -1000);
        assert_eq!(lut.max_temperature(), 0);
    }

    #[test]
    fn min_and_max_temperature() {
        assert_eq!(lut().min_temperature(), 0);
        assert_eq!(lut().max_temperature(), 10000);
    }
}
