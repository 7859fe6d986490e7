//! Monthly temperature prediction by temporal superposition.

use crate::error::{SimError, SimResult};
use crate::loads::{month_seconds, ExpandedLoads};
use bf_core::GroundParameters;
use bf_gfunction::ResponseProvider;
use std::f64::consts::PI;

/// Default duration of a peak load event, seconds (29 hours).
pub const DEFAULT_PEAK_DURATION_S: f64 = 104_400.0;

/// Predicted temperatures per month over the simulation horizon, °C.
///
/// Base series carry the monthly-average load across the borehole
/// resistance; peak series carry that month's peak power instead, giving the
/// worst-case extremum within the period.
#[derive(Clone, Debug)]
pub struct TemperatureTrace {
    pub wall_c: Vec<f64>,
    pub fluid_base_heating_c: Vec<f64>,
    pub fluid_base_cooling_c: Vec<f64>,
    pub fluid_peak_heating_c: Vec<f64>,
    pub fluid_peak_cooling_c: Vec<f64>,
}

impl TemperatureTrace {
    pub fn months(&self) -> usize {
        self.wall_c.len()
    }

    /// Largest peak-cooling fluid temperature over the first `months` periods.
    pub fn max_peak_cooling_within(&self, months: usize) -> f64 {
        self.fluid_peak_cooling_c[..months.min(self.months())]
            .iter()
            .fold(f64::NEG_INFINITY, |a, &b| a.max(b))
    }

    /// Smallest peak-heating fluid temperature over the first `months` periods.
    pub fn min_peak_heating_within(&self, months: usize) -> f64 {
        self.fluid_peak_heating_c[..months.min(self.months())]
            .iter()
            .fold(f64::INFINITY, |a, &b| a.min(b))
    }

    pub fn max_peak_cooling_c(&self) -> f64 {
        self.max_peak_cooling_within(self.months())
    }

    pub fn min_peak_heating_c(&self) -> f64 {
        self.min_peak_heating_within(self.months())
    }
}

/// Pure temperature evaluator: step-response superposition of a load series
/// at one candidate depth, with a fixed borehole resistance.
pub struct TemperatureSimulator<'a> {
    response: &'a dyn ResponseProvider,
    ground: &'a GroundParameters,
    peak_duration_s: f64,
}

impl<'a> TemperatureSimulator<'a> {
    pub fn new(response: &'a dyn ResponseProvider, ground: &'a GroundParameters) -> Self {
        Self {
            response,
            ground,
            peak_duration_s: DEFAULT_PEAK_DURATION_S,
        }
    }

    pub fn with_peak_duration(mut self, peak_duration_s: f64) -> Self {
        self.peak_duration_s = peak_duration_s;
        self
    }

    /// Wall and fluid temperatures at every monthly timestep.
    ///
    /// Wall temperature at the end of month k:
    ///
    /// ```text
    /// Tb[k] = Tg + Σ_j Δq[j] · g(t_k − t_j) / (2π·k_s·H·N)
    /// ```
    ///
    /// evaluated as a discrete convolution of the net monthly load steps
    /// (injection-positive, W) with g-value differences. Fluid temperature
    /// adds the load across the equivalent resistance, `q·Rb / (N·H)`.
    ///
    /// Peak series superpose the excess of the peak power over the month's
    /// average as a short pulse of the configured peak duration, so a peak
    /// sees both the short-time ground response and the resistance.
    pub fn temperatures(
        &self,
        depth_m: f64,
        loads: &ExpandedLoads,
        resistance: f64,
    ) -> SimResult<TemperatureTrace> {
        if !(depth_m > 0.0) || !depth_m.is_finite() {
            return Err(SimError::InvalidArg {
                what: "depth must be positive and finite",
            });
        }
        if !(resistance > 0.0) || !resistance.is_finite() {
            return Err(SimError::InvalidArg {
                what: "borehole resistance must be positive and finite",
            });
        }
        if !(self.peak_duration_s > 0.0) || !self.peak_duration_s.is_finite() {
            return Err(SimError::InvalidArg {
                what: "peak duration must be positive and finite",
            });
        }
        let n = loads.months();
        if n == 0 {
            return Err(SimError::InvalidArg {
                what: "load series is empty",
            });
        }

        let tm = month_seconds();
        let times: Vec<f64> = (1..=n).map(|k| k as f64 * tm).collect();
        let g = self.response.g_values(&times, depth_m)?;

        // Weight factors: g-value differences, first month keeps the full value.
        let mut dg = g;
        for j in (1..n).rev() {
            dg[j] -= dg[j - 1];
        }

        let k_s = self.ground.conductivity_si();
        let nb = self.ground.number_of_boreholes() as f64;
        let tg = self.ground.ground_temperature_c();
        let wall_denom = 2.0 * PI * k_s * depth_m * nb;
        let r = resistance / (nb * depth_m);
        // Excess peak power sees the short-time response on top of Rb.
        let g_peak = self.response.g_value(self.peak_duration_s, depth_m)?;
        let r_peak = g_peak / wall_denom + r;

        let mut trace = TemperatureTrace {
            wall_c: Vec::with_capacity(n),
            fluid_base_heating_c: Vec::with_capacity(n),
            fluid_base_cooling_c: Vec::with_capacity(n),
            fluid_peak_heating_c: Vec::with_capacity(n),
            fluid_peak_cooling_c: Vec::with_capacity(n),
        };
        for k in 0..n {
            let mut rise = 0.0;
            for j in 0..=k {
                rise += loads.net_avg_kw[k - j] * 1000.0 * dg[j];
            }
            let wall = tg + rise / wall_denom;
            trace.wall_c.push(wall);
            trace
                .fluid_base_heating_c
                .push(wall - loads.avg_heating_kw[k] * 1000.0 * r);
            trace
                .fluid_base_cooling_c
                .push(wall + loads.avg_cooling_kw[k] * 1000.0 * r);
            let excess_h = loads.peak_heating_kw[k] - loads.avg_heating_kw[k];
            let excess_c = loads.peak_cooling_kw[k] - loads.avg_cooling_kw[k];
            trace.fluid_peak_heating_c.push(
                wall - loads.avg_heating_kw[k] * 1000.0 * r - excess_h * 1000.0 * r_peak,
            );
            trace.fluid_peak_cooling_c.push(
                wall + loads.avg_cooling_kw[k] * 1000.0 * r + excess_c * 1000.0 * r_peak,
            );
        }
        Ok(trace)
    }
}
