//! Tabulated g-function with log-time interpolation.

use crate::error::{GFunctionError, GfResult};
use serde::{Deserialize, Serialize};

/// What to do when a requested time falls outside the tabulated domain.
///
/// Never silent: `LinearSlope` extends the end segments by at most
/// `max_excess` ln-units, anything further is an error.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Extrapolation {
    /// Fail with `OutOfRange` for any time outside the tabulated axis.
    Error,
    /// Extrapolate using the slope of the nearest end segment, up to
    /// `max_excess` ln-units beyond either end of the axis.
    LinearSlope { max_excess: f64 },
}

impl Default for Extrapolation {
    fn default() -> Self {
        Extrapolation::Error
    }
}

/// A single field's step response over the logarithmic time axis ln(t/ts).
///
/// The axis must be strictly increasing; interpolation is linear between the
/// two nearest knots. The table is immutable after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GFunctionTable {
    ln_times: Vec<f64>,
    values: Vec<f64>,
    extrapolation: Extrapolation,
}

impl GFunctionTable {
    pub fn new(ln_times: Vec<f64>, values: Vec<f64>) -> GfResult<Self> {
        if ln_times.len() != values.len() {
            return Err(GFunctionError::Configuration {
                what: format!(
                    "g-function axis/value length mismatch: {} != {}",
                    ln_times.len(),
                    values.len()
                ),
            });
        }
        if ln_times.len() < 2 {
            return Err(GFunctionError::Configuration {
                what: "g-function table needs at least two points".to_string(),
            });
        }
        for pair in ln_times.windows(2) {
            if !(pair[1] > pair[0]) {
                return Err(GFunctionError::Configuration {
                    what: format!(
                        "g-function time axis must be strictly increasing \
                         ({} followed by {})",
                        pair[0], pair[1]
                    ),
                });
            }
        }
        for &v in ln_times.iter().chain(values.iter()) {
            if !v.is_finite() {
                return Err(GFunctionError::Configuration {
                    what: "g-function table contains a non-finite entry".to_string(),
                });
            }
        }
        Ok(Self {
            ln_times,
            values,
            extrapolation: Extrapolation::default(),
        })
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> GfResult<Self> {
        let (ln_times, values) = pairs.iter().copied().unzip();
        Self::new(ln_times, values)
    }

    pub fn with_extrapolation(mut self, policy: Extrapolation) -> Self {
        self.extrapolation = policy;
        self
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    pub fn len(&self) -> usize {
        self.ln_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ln_times.is_empty()
    }

    /// Tabulated domain on the ln(t/ts) axis.
    pub fn ln_time_range(&self) -> (f64, f64) {
        (self.ln_times[0], self.ln_times[self.ln_times.len() - 1])
    }

    /// Interpolate the response at `x = ln(t/ts)`.
    pub fn interpolate(&self, x: f64) -> GfResult<f64> {
        let (lo, hi) = self.ln_time_range();
        if x < lo || x > hi {
            return match self.extrapolation {
                Extrapolation::Error => Err(self.out_of_range(x)),
                Extrapolation::LinearSlope { max_excess } => {
                    if x < lo - max_excess || x > hi + max_excess {
                        Err(self.out_of_range(x))
                    } else if x < lo {
                        Ok(self.segment_value(0, x))
                    } else {
                        Ok(self.segment_value(self.ln_times.len() - 2, x))
                    }
                }
            };
        }
        // First knot strictly greater than x; x == hi maps onto the last segment.
        let upper = self.ln_times.partition_point(|&t| t <= x);
        let i = upper.clamp(1, self.ln_times.len() - 1) - 1;
        Ok(self.segment_value(i, x))
    }

    fn segment_value(&self, i: usize, x: f64) -> f64 {
        let (x0, x1) = (self.ln_times[i], self.ln_times[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }

    fn out_of_range(&self, x: f64) -> GFunctionError {
        let (lo, hi) = self.ln_time_range();
        GFunctionError::OutOfRange {
            ln_time: x,
            min: lo,
            max: hi,
        }
    }
}
