//! Fixed-point decimal host value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest scale the engine produces for `decimal(p, s)`.
pub const MAX_DECIMAL_SCALE: u8 = 38;

/// A fixed-point number `unscaled * 10^-scale`.
///
/// Equality is structural: `1.0` and `1.00` differ because their scales
/// differ, matching how the engine reports the column's declared scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decimal {
    /// Unscaled integer value.
    unscaled: i128,
    /// Number of fractional digits.
    scale: u8,
}

impl Decimal {
    /// Construct a decimal. Returns `None` if `scale` exceeds [`MAX_DECIMAL_SCALE`].
    #[must_use]
    pub const fn new(unscaled: i128, scale: u8) -> Option<Self> {
        if scale > MAX_DECIMAL_SCALE {
            return None;
        }
        Some(Self { unscaled, scale })
    }

    /// An integral decimal with scale 0.
    #[must_use]
    pub const fn from_integer(value: i128) -> Self {
        Self {
            unscaled: value,
            scale: 0,
        }
    }

    /// The unscaled integer value.
    #[inline]
    #[must_use]
    pub const fn unscaled(&self) -> i128 {
        self.unscaled
    }

    /// The number of fractional digits.
    #[inline]
    #[must_use]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// Lossy conversion to `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.unscaled as f64 / 10f64.powi(i32::from(self.scale))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.unscaled);
        }
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let digits = self.unscaled.unsigned_abs().to_string();
        let scale = usize::from(self.scale);
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Decimal::new(12345, 2).unwrap().to_string(), "123.45");
        assert_eq!(Decimal::new(-5, 3).unwrap().to_string(), "-0.005");
        assert_eq!(Decimal::new(42, 0).unwrap().to_string(), "42");
        assert_eq!(Decimal::new(100, 2).unwrap().to_string(), "1.00");
    }

    #[test]
    fn test_scale_limit() {
        assert!(Decimal::new(1, MAX_DECIMAL_SCALE).is_some());
        assert!(Decimal::new(1, MAX_DECIMAL_SCALE + 1).is_none());
    }

    #[test]
    fn test_to_f64() {
        let d = Decimal::new(-250, 2).unwrap();
        assert!((d.to_f64() + 2.5).abs() < f64::EPSILON);
    }
}
