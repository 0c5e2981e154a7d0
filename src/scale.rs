/// Conversion between raw converter codes and an engineering unit.
///
/// - `full_scale`: The value corresponding to a code of `2^precision` (eg. mV or µV)
/// - `precision`: The precision of the converter in bits (eg. for 12-bit precision, use `12`),
///   at most [`MAX_PRECISION`](AdcScale::MAX_PRECISION). Larger values are treated as
///   `MAX_PRECISION`.
///
/// # Examples
///
/// ```
/// use thermo_calc::AdcScale;
///
/// let adc = AdcScale {
///     full_scale: 5000, // 5 V
///     precision: 12,    // 12 bits of precision
/// };
///
/// assert_eq!(adc.to_value(2048), 2500);
/// assert_eq!(adc.to_counts(1250), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcScale {
    pub full_scale: i32,
    pub precision: u32,
}

impl AdcScale {
    /// The widest converter supported.
    pub const MAX_PRECISION: u32 = 31;

    /// An 8-bit voltage DAC with a 0 to 4.080 V range, in millivolts.
    pub const VDAC_4V: AdcScale = AdcScale {
        full_scale: 4096,
        precision: 8,
    };

    /// Returns a scale for a converter with `precision` bits.
    ///
    /// `precision` must be at most [`MAX_PRECISION`](AdcScale::MAX_PRECISION)
    /// or this function will panic when running in debug mode.
    pub const fn new(full_scale: i32, precision: u32) -> Self {
        debug_assert!(
            precision <= Self::MAX_PRECISION,
            "precision must be at most 31 bits"
        );

        Self {
            full_scale,
            precision,
        }
    }

    /// Converts a raw code to the unit of `full_scale`, truncating.
    pub fn to_value(&self, counts: i32) -> i32 {
        (i64::from(counts) * i64::from(self.full_scale) / self.span()) as i32
    }

    /// Converts a value in the unit of `full_scale` to a raw code,
    /// truncating. The result is not clamped to the converter's range.
    pub fn to_counts(&self, value: i32) -> i32 {
        if self.full_scale == 0 {
            return 0;
        }

        (i64::from(value) * self.span() / i64::from(self.full_scale)) as i32
    }

    /// Returns the largest code the converter produces.
    pub fn max_counts(&self) -> i32 {
        (self.span() - 1) as i32
    }

    fn span(&self) -> i64 {
        1i64 << self.precision.min(Self::MAX_PRECISION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adc() -> AdcScale {
        AdcScale {
            full_scale: 1000,
            precision: 12,
        }
    }

    #[test]
    fn to_counts() {
        assert_eq!(adc().to_counts(100), 409);
        assert_eq!(adc().to_counts(200), 819);
        assert_eq!(adc().to_counts(300), 1228);
    }

    #[test]
    fn to_value() {
        assert_eq!(adc().to_value(0), 0);
        assert_eq!(adc().to_value(2048), 500);
        assert_eq!(adc().to_value(4095), 999);
        assert_eq!(adc().to_value(-2048), -500);
    }

    #[test]
    fn vdac_codes() {
        assert_eq!(AdcScale::VDAC_4V.to_counts(0), 0);
        assert_eq!(AdcScale::VDAC_4V.to_counts(2000), 125);
        assert_eq!(AdcScale::VDAC_4V.to_value(255), 4080);
        assert_eq!(AdcScale::VDAC_4V.max_counts(), 255);
    }

    #[test]
    fn zero_full_scale() {
        let scale = AdcScale {
            full_scale: 0,
            precision: 8,
        };
        assert_eq!(scale.to_counts(100), 0);
    }

    #[test]
    fn new() {
        assert_eq!(AdcScale::new(4096, 8), AdcScale::VDAC_4V);
        assert_eq!(AdcScale::new(1, 31).max_counts(), i32::MAX);
    }

    #[test]
    #[should_panic]
    fn panics_if_precision_too_wide() {
        AdcScale::new(1000, 32);
    }

    #[test]
    fn precision_clamped() {
        let wide = AdcScale {
            full_scale: 1000,
            precision: 64,
        };
        let widest = AdcScale::new(1000, AdcScale::MAX_PRECISION);

        assert_eq!(wide.to_value(10), widest.to_value(10));
        assert_eq!(wide.to_value(i32::MAX), 999);
        assert_eq!(wide.to_counts(500), 1 << 30);
        assert_eq!(wide.max_counts(), i32::MAX);
    }
}
