//! Response-provider seam between tables and the temperature simulator.

use crate::error::GfResult;
use crate::table::GFunctionTable;
use bf_core::{CoreError, GroundParameters};
use std::sync::Arc;

/// Polymorphic step-response lookup: the simulator only ever asks for a
/// g-value at an elapsed time and a candidate depth.
pub trait ResponseProvider: Send + Sync {
    /// Response value at `time_s` seconds after a unit step, for a field of
    /// boreholes `depth_m` deep.
    fn g_value(&self, time_s: f64, depth_m: f64) -> GfResult<f64>;

    fn g_values(&self, times_s: &[f64], depth_m: f64) -> GfResult<Vec<f64>> {
        times_s
            .iter()
            .map(|&t| self.g_value(t, depth_m))
            .collect()
    }
}

/// External collaborator computing a step response ab initio (finite line
/// source or similar) for geometries the precomputed store does not cover.
pub trait StepResponseSolver: Send + Sync {
    fn step_response(&self, ground: &GroundParameters) -> GfResult<GFunctionTable>;
}

/// A shared table bound to a ground diffusivity.
///
/// Depth enters through the Eskilson normalization ts = H² / (9α): the
/// tabulated curve is dimensionless over x = ln(t/ts).
#[derive(Clone)]
pub struct TabulatedResponse {
    table: Arc<GFunctionTable>,
    diffusivity_m2_s: f64,
}

impl TabulatedResponse {
    pub fn new(table: Arc<GFunctionTable>, diffusivity_m2_s: f64) -> Self {
        Self {
            table,
            diffusivity_m2_s,
        }
    }

    pub fn for_ground(table: Arc<GFunctionTable>, ground: &GroundParameters) -> Self {
        Self::new(table, ground.diffusivity_si())
    }

    pub fn table(&self) -> &GFunctionTable {
        &self.table
    }

    /// Characteristic (Eskilson) time for a given depth, seconds.
    pub fn characteristic_time_s(&self, depth_m: f64) -> f64 {
        depth_m * depth_m / (9.0 * self.diffusivity_m2_s)
    }
}

impl ResponseProvider for TabulatedResponse {
    fn g_value(&self, time_s: f64, depth_m: f64) -> GfResult<f64> {
        if !(time_s > 0.0) || !time_s.is_finite() {
            return Err(CoreError::InvalidArg {
                what: "elapsed time must be positive and finite",
            }
            .into());
        }
        if !(depth_m > 0.0) || !depth_m.is_finite() {
            return Err(CoreError::InvalidArg {
                what: "depth must be positive and finite",
            }
            .into());
        }
        let x = (time_s / self.characteristic_time_s(depth_m)).ln();
        self.table.interpolate(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Extrapolation;

    fn provider() -> TabulatedResponse {
        let ground = GroundParameters::new(110.0, 6.5, 3.5, 10.0, 0.2, 12, 10).unwrap();
        let table = GFunctionTable::from_pairs(&[(-9.0, 1.0), (0.0, 10.0), (4.0, 18.0)])
            .unwrap()
            .with_extrapolation(Extrapolation::Error);
        TabulatedResponse::for_ground(Arc::new(table), &ground)
    }

    #[test]
    fn characteristic_time_scales_with_depth_squared() {
        let p = provider();
        let ts_100 = p.characteristic_time_s(100.0);
        let ts_200 = p.characteristic_time_s(200.0);
        assert!((ts_200 / ts_100 - 4.0).abs() < 1e-12);
    }

    #[test]
    fn g_value_maps_onto_log_axis() {
        let p = provider();
        let ts = p.characteristic_time_s(100.0);
        // At t == ts the log coordinate is zero, the table reads 10.
        assert!((p.g_value(ts, 100.0).unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_positive_inputs() {
        let p = provider();
        assert!(p.g_value(0.0, 100.0).is_err());
        assert!(p.g_value(-5.0, 100.0).is_err());
        assert!(p.g_value(3600.0, 0.0).is_err());
        assert!(p.g_value(f64::NAN, 100.0).is_err());
    }

    #[test]
    fn batch_matches_single_lookups() {
        let p = provider();
        let ts = p.characteristic_time_s(80.0);
        let times = [0.5 * ts, ts, 2.0 * ts];
        let batch = p.g_values(&times, 80.0).unwrap();
        for (i, &t) in times.iter().enumerate() {
            assert_eq!(batch[i], p.g_value(t, 80.0).unwrap());
        }
    }
}
