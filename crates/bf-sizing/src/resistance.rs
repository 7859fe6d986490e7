//! Equivalent borehole resistance providers.
//!
//! The multipole/convection computation itself is an external collaborator;
//! the engine only needs "resistance at this depth". A provider is consulted
//! once per depth trial, so the combined depth/resistance iteration stays
//! within the sizing iteration budget.

use crate::error::EngineResult;
use crate::SizingError;

/// Depth-dependent equivalent borehole resistance, mK/W.
pub trait ResistanceProvider: Send + Sync {
    fn resistance(&self, depth_m: f64) -> EngineResult<f64>;
}

/// Fixed resistance, the default when no fluid/pipe data is configured.
#[derive(Clone, Copy, Debug)]
pub struct ConstantResistance(pub f64);

impl ResistanceProvider for ConstantResistance {
    fn resistance(&self, _depth_m: f64) -> EngineResult<f64> {
        if !(self.0 > 0.0) || !self.0.is_finite() {
            return Err(SizingError::Configuration {
                what: format!("constant borehole resistance must be positive, got {}", self.0),
            });
        }
        Ok(self.0)
    }
}

/// Adapter for closure-based providers (external Rb* correlations).
pub struct FnResistance<F>(pub F);

impl<F> ResistanceProvider for FnResistance<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn resistance(&self, depth_m: f64) -> EngineResult<f64> {
        let rb = (self.0)(depth_m);
        if !(rb > 0.0) || !rb.is_finite() {
            return Err(SizingError::Configuration {
                what: format!(
                    "resistance provider returned a non-positive value at H = {depth_m} m: {rb}"
                ),
            });
        }
        Ok(rb)
    }
}
