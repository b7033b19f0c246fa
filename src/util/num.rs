/// Parses a decimal literal.
///
/// Accepts anything Rust's `f64` parser accepts (signs, fractions, exponents)
/// as long as the result is finite, so `inf` and `NaN` are rejected.
///
/// # Parameters
/// - `text`: The word to parse.
///
/// # Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the word is not a finite decimal number.
///
/// # Example
/// ```
/// use stackline::util::num::parse_decimal;
///
/// assert_eq!(parse_decimal("2.5"), Some(2.5));
/// assert_eq!(parse_decimal("-4"), Some(-4.0));
/// assert_eq!(parse_decimal("inf"), None);
/// assert_eq!(parse_decimal("ten"), None);
/// ```
#[must_use]
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Safely converts an `f64` to `i32` if the value is finite, within range,
/// and not fractional.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, out-of-range or fractional values.
///
/// ## Parameters
/// - `value`: The floating-point value to convert.
/// - `error`: The error to return if the conversion is not exact.
///
/// ## Example
/// ```
/// use stackline::util::num::f64_to_i32_checked;
///
/// assert_eq!(f64_to_i32_checked(3.0, "bad"), Ok(3));
/// assert_eq!(f64_to_i32_checked(3.5, "bad"), Err("bad"));
/// assert_eq!(f64_to_i32_checked(1e12, "bad"), Err("bad"));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i32_checked<E>(value: f64, error: E) -> Result<i32, E> {
    if !value.is_finite()
       || value.fract() != 0.0
       || value < f64::from(i32::MIN)
       || value > f64::from(i32::MAX)
    {
        return Err(error);
    }

    Ok(value as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_forms() {
        assert_eq!(parse_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_decimal(".5"), Some(0.5));
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("12abc"), None);
    }

    #[test]
    fn exit_code_bounds() {
        assert_eq!(f64_to_i32_checked(-1.0, ()), Ok(-1));
        assert_eq!(f64_to_i32_checked(f64::from(i32::MAX), ()), Ok(i32::MAX));
        assert!(f64_to_i32_checked(f64::from(i32::MAX) + 1.0, ()).is_err());
        assert!(f64_to_i32_checked(f64::NAN, ()).is_err());
    }
}
