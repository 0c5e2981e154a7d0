/// Linearly interpolates `y` at `x` between `(x0, y0)` and `(x1, y1)`.
///
/// `x0` and `x1` may be given in either order. Division truncates toward
/// zero.
pub fn interpolate(x0: u32, x1: u32, y0: i32, y1: i32, x: u32) -> i32 {
    if x0 == x1 {
        return y0;
    }

    let dx = i64::from(x) - i64::from(x0);
    let dy = i64::from(y1) - i64::from(y0);
    let span = i64::from(x1) - i64::from(x0);

    (i64::from(y0) + dx * dy / span) as i32
}

#[cfg(test)]
mod tests {
    #[test]
    fn interpolate() {
        assert_eq!(super::interpolate(0, 10, 0, 100, 0), 0);
        assert_eq!(super::interpolate(0, 10, 0, 100, 2), 20);
        assert_eq!(super::interpolate(0, 10, 0, 100, 5), 50);
        assert_eq!(super::interpolate(0, 10, 0, 100, 8), 80);
        assert_eq!(super::interpolate(0, 10, 0, 100, 10), 100);
    }

    #[test]
    fn interpolate_flipped_y() {
        assert_eq!(super::interpolate(0, 10, 100, 0, 0), 100);
        assert_eq!(super::interpolate(0, 10, 100, 0, 2), 80);
        assert_eq!(super::interpolate(0, 10, 100, 0, 5), 50);
        assert_eq!(super::interpolate(0, 10, 100, 0, 8), 20);
        assert_eq!(super::interpolate(0, 10, 100, 0, 10), 0);
    }

    #[test]
    fn interpolate_descending_x() {
        assert_eq!(super::interpolate(8314, 12087, 3000, 2000, 10000), 2554);
        assert_eq!(super::interpolate(12087, 8314, 2000, 3000, 10000), 2553);
    }

    #[test]
    fn interpolate_negative_y() {
        assert_eq!(super::interpolate(0, 10, -100, 100, 5), 0);
        assert_eq!(super::interpolate(0, 10, -100, -200, 3), -130);
    }

    #[test]
    fn interpolate_degenerate_span() {
        assert_eq!(super::interpolate(5, 5, 42, 99, 5), 42);
    }
}
