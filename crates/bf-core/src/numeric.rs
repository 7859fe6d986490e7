//! Scalar helpers shared by the parameter containers and the iteration
//! loops: the workspace float type, comparison tolerances, and the argument
//! guards behind the validated constructors.

use crate::CoreError;

/// Scalar type for all engine math.
pub type Real = f64;

/// Absolute plus relative tolerance pair, sized for quantities in the
/// meters-and-kelvins range the engine works in.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// True when `a` and `b` agree within the absolute tolerance, or within the
/// relative tolerance of the larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive: depths, spacings, conductivities.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::InvalidArg { what })
    }
}

/// Finite and at least zero: loads and peaks may legitimately be empty.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, CoreError> {
    ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(CoreError::InvalidArg { what })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_mixes_absolute_and_relative() {
        let tol = Tolerances::default();
        // Two depths a hair apart.
        assert!(nearly_equal(110.0, 110.0 + 1e-8, tol));
        // Near zero the absolute tolerance takes over.
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(110.0, 110.001, tol));
    }

    #[test]
    fn guards_reject_non_finite_values() {
        assert!(ensure_finite(Real::NAN, "depth").is_err());
        assert!(ensure_positive(Real::INFINITY, "depth").is_err());
        assert!(ensure_non_negative(-Real::NAN, "load").is_err());
    }

    #[test]
    fn positive_guard_is_strict_at_zero() {
        assert!(ensure_positive(0.0, "spacing").is_err());
        assert!(ensure_positive(6.5, "spacing").is_ok());
        // The non-negative guard admits an empty load month.
        assert_eq!(ensure_non_negative(0.0, "load").unwrap(), 0.0);
        assert!(ensure_non_negative(-1.0, "load").is_err());
    }
}
