//! L2 sizing: combined first/last-year three-pulse method.
//!
//! Each quadrant reduces the horizon to three superposed pulses (yearly or
//! preceding-month average, critical-month average, peak) evaluated through
//! g-function differences, then iterates the resulting length equation to a
//! fixed point on depth.

use crate::engine::SizingOptions;
use crate::error::{EngineResult, SizingError};
use crate::quadrant::Quadrant;
use crate::resistance::ResistanceProvider;
use bf_core::units::constants::{SECONDS_PER_MONTH, SECONDS_PER_YEAR};
use bf_core::{GroundParameters, MonthlyLoadProfile, TemperatureBounds};
use bf_gfunction::ResponseProvider;
use bf_sim::{first_year_pulses, last_year_pulses, BindingLoad};
use std::f64::consts::PI;

/// Temperature headroom toward the binding bound, K. Non-positive headroom
/// means the bound sits on the wrong side of the undisturbed ground
/// temperature and the quadrant cannot bind.
fn headroom(
    bounds: &TemperatureBounds,
    ground: &GroundParameters,
    quadrant: Quadrant,
) -> EngineResult<f64> {
    let tg = ground.ground_temperature_c();
    let delta = match quadrant.binding_load() {
        BindingLoad::Cooling => bounds.max_c() - tg,
        BindingLoad::Heating => tg - bounds.min_c(),
    };
    if delta > 0.0 {
        Ok(delta)
    } else {
        Err(SizingError::InfeasibleQuadrant {
            quadrant,
            what: format!(
                "temperature bound leaves no headroom against the undisturbed \
                 ground temperature ({tg} °C)"
            ),
        })
    }
}

pub(crate) fn size_quadrant(
    response: &dyn ResponseProvider,
    ground: &GroundParameters,
    profile: &MonthlyLoadProfile,
    bounds: &TemperatureBounds,
    resistance: &dyn ResistanceProvider,
    opts: &SizingOptions,
    quadrant: Quadrant,
) -> EngineResult<(f64, usize)> {
    let delta_t = headroom(bounds, ground, quadrant)?;
    let side = quadrant.binding_load();

    let th = opts.peak_duration_s;
    let tm = SECONDS_PER_MONTH;
    let ty = profile.simulation_years() as f64 * SECONDS_PER_YEAR;

    // Pulse magnitudes (W, oriented toward the bound) and evaluation times.
    let (times, q_long_w, qm_w, qh_w) = if quadrant.is_first_year() {
        let p = first_year_pulses(profile, side);
        let tcm = (p.month_index as f64 + 1.0) * tm;
        ([th, th + tm, tcm + th], p.qpm_w, p.qm_w, p.qh_w)
    } else {
        let p = last_year_pulses(profile, side);
        ([th, th + tm, ty + tm + th], p.qa_w, p.qm_w, p.qh_w)
    };

    let k_s = ground.conductivity_si();
    let nb = ground.number_of_boreholes() as f64;
    let two_pi_k = 2.0 * PI * k_s;

    let mut h = opts.starting_depth();
    for iter in 1..=opts.max_iterations {
        // Resistance is fixed for the duration of one depth trial.
        let rb = resistance.resistance(h)?;
        let g = response.g_values(&times, h)?;

        let r_peak = g[0] / two_pi_k;
        let r_month = (g[1] - g[0]) / two_pi_k;
        let r_long = (g[2] - g[1]) / two_pi_k;

        let length = (qh_w * (rb + r_peak) + qm_w * r_month + q_long_w * r_long) / delta_t;
        let h_new = length / nb;
        if !h_new.is_finite() || h_new <= 0.0 {
            return Err(SizingError::InfeasibleQuadrant {
                quadrant,
                what: format!("length equation produced a non-physical depth ({h_new} m)"),
            });
        }

        tracing::trace!(
            quadrant = quadrant.number(),
            iter,
            depth_m = h_new,
            "L2 depth iteration"
        );
        if (h_new - h).abs() < opts.depth_tolerance_m {
            return Ok((h_new, iter));
        }
        h = h_new;
    }

    Err(SizingError::DidNotConverge {
        what: format!(
            "L2 depth iteration for quadrant {} still moving more than {} m",
            quadrant.number(),
            opts.depth_tolerance_m
        ),
        iterations: opts.max_iterations,
    })
}
