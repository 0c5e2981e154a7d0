/// Returns `(op1 * op2) >> 24` computed with a 64-bit product.
///
/// The shift is applied to the magnitude of the product, so negative
/// results are truncated toward zero rather than rounded down.
///
/// # Examples
///
/// ```
/// use thermo_calc::mult_shift_24;
///
/// assert_eq!(mult_shift_24(3 << 24, 5), 15);
/// assert_eq!(mult_shift_24(-1, 1 << 23), 0);
/// ```
pub fn mult_shift_24(op1: i32, op2: i32) -> i32 {
    let product = i64::from(op1) * i64::from(op2);
    let magnitude = (product.unsigned_abs() >> 24) as i32;

    if product < 0 {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

/// Shifts the magnitude of `value` left by `shift` bits, keeping its sign.
///
/// The result is truncated to 32 bits, so a `shift` of 64 or more gives 0.
pub fn normalize(value: i32, shift: u32) -> i32 {
    let magnitude = u64::from(value.unsigned_abs())
        .checked_shl(shift)
        .unwrap_or(0) as i32;

    if value < 0 {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

/// A polynomial with 24-bit fractional fixed-point coefficients.
///
/// `coefficients[0]` is the constant term. The input is normalised by
/// `input_shift` bits before evaluation and the result is scaled down by
/// `output_scale` bits (or up, when `output_scale` is negative).
///
/// Scales outside the 32-bit range saturate: scaling down gives 0 (or -1
/// for a negative sum) and scaling up gives 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polynomial<'a> {
    pub coefficients: &'a [i32],
    pub input_shift: u32,
    pub output_scale: i8,
}

impl<'a> Polynomial<'a> {
    /// Returns a polynomial over `coefficients`.
    ///
    /// `input_shift` must be below 32 and `output_scale` between -31 and 31
    /// or this function will panic when running in debug mode.
    pub const fn new(coefficients: &'a [i32], input_shift: u32, output_scale: i8) -> Self {
        debug_assert!(input_shift < 32, "input_shift must be below 32");
        debug_assert!(
            output_scale > -32 && output_scale < 32,
            "output_scale must be between -31 and 31"
        );

        Self {
            coefficients,
            input_shift,
            output_scale,
        }
    }

    /// Evaluates the polynomial at `x` using Horner's method.
    pub fn evaluate(&self, x: i32) -> i32 {
        let (constant, rest) = match self.coefficients.split_first() {
            Some(split) => split,
            None => return 0,
        };
        let x = normalize(x, self.input_shift);

        let sum = rest
            .iter()
            .rev()
            .fold(0i32, |acc, &coefficient| {
                mult_shift_24(coefficient.wrapping_add(acc), x)
            })
            .wrapping_add(*constant);

        let scale = u32::from(self.output_scale.unsigned_abs());

        if self.output_scale >= 0 {
            sum.checked_shr(scale).unwrap_or(if sum < 0 { -1 } else { 0 })
        } else {
            sum.checked_shl(scale).unwrap_or(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mult_shift_24_positive() {
        assert_eq!(mult_shift_24(1 << 24, 1), 1);
        assert_eq!(mult_shift_24(1 << 24, 12345), 12345);
        assert_eq!(mult_shift_24(1 << 23, 3), 1);
        assert_eq!(mult_shift_24(0, i32::MAX), 0);
    }

    #[test]
    fn mult_shift_24_truncates_toward_zero() {
        assert_eq!(mult_shift_24(-(1 << 23), 3), -1);
        assert_eq!(mult_shift_24(1 << 23, -3), -1);
        assert_eq!(mult_shift_24(-(1 << 24), -7), 7);
        assert_eq!(mult_shift_24(-1, 1), 0);
    }

    #[test]
    fn mult_shift_24_uses_wide_product() {
        assert_eq!(mult_shift_24(i32::MAX, 1 << 20), i32::MAX >> 4);
        assert_eq!(mult_shift_24(i32::MIN, 1 << 16), i32::MIN >> 8);
    }

    #[test]
    fn normalize_keeps_sign() {
        assert_eq!(normalize(3, 4), 48);
        assert_eq!(normalize(-3, 4), -48);
        assert_eq!(normalize(0, 11), 0);
    }

    #[test]
    fn evaluate_constant_and_linear() {
        let constant = Polynomial::new(&[42], 0, 0);
        assert_eq!(constant.evaluate(1000), 42);

        let doubling = Polynomial::new(&[0, 2 << 24], 0, 0);
        assert_eq!(doubling.evaluate(21), 42);
        assert_eq!(doubling.evaluate(-21), -42);
    }

    #[test]
    fn evaluate_applies_scales() {
        let poly = Polynomial::new(&[0, 1 << 24], 4, 2);
        assert_eq!(poly.evaluate(8), 32);

        let widening = Polynomial::new(&[5], 0, -3);
        assert_eq!(widening.evaluate(0), 40);
    }

    #[test]
    fn normalize_out_of_range_shift() {
        assert_eq!(normalize(1, 31), i32::MIN);
        assert_eq!(normalize(1, 32), 0);
        assert_eq!(normalize(-5, 64), 0);
        assert_eq!(normalize(-5, u32::MAX), 0);
    }

    fn unchecked(coefficients: &[i32], input_shift: u32, output_scale: i8) -> Polynomial<'_> {
        Polynomial {
            coefficients,
            input_shift,
            output_scale,
        }
    }

    #[test]
    fn evaluate_saturates_scale_down() {
        assert_eq!(unchecked(&[1 << 30], 0, 31).evaluate(0), 0);
        assert_eq!(unchecked(&[1 << 30], 0, 32).evaluate(0), 0);
        assert_eq!(unchecked(&[-(1 << 30)], 0, 32).evaluate(0), -1);
        assert_eq!(unchecked(&[-(1 << 30)], 0, i8::MAX).evaluate(0), -1);
    }

    #[test]
    fn evaluate_saturates_scale_up() {
        assert_eq!(unchecked(&[1], 0, -31).evaluate(0), i32::MIN);
        assert_eq!(unchecked(&[1 << 30], 0, -32).evaluate(0), 0);
        assert_eq!(unchecked(&[1 << 30], 0, i8::MIN).evaluate(0), 0);
    }

    #[test]
    fn evaluate_large_input_shift() {
        assert_eq!(unchecked(&[7, 1 << 24], 64, 0).evaluate(3), 7);
    }

    #[test]
    #[should_panic]
    fn panics_if_output_scale_out_of_range() {
        Polynomial::new(&[1], 0, 32);
    }

    #[test]
    #[should_panic]
    fn panics_if_input_shift_out_of_range() {
        Polynomial::new(&[1], 32, 0);
    }

    #[test]
    fn evaluate_empty() {
        assert_eq!(Polynomial::new(&[], 0, 0).evaluate(99), 0);
    }
}
