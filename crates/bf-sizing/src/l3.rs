//! L3 sizing: full monthly simulation under a depth-scaling iteration.
//!
//! Each trial simulates the whole horizon at the candidate depth and rescales
//! the depth by the ratio of the achieved temperature excursion to the
//! allowed one. Both excursions are measured from the undisturbed ground
//! temperature, so the ratio is exactly the depth correction of the linear
//! superposition model.

use crate::engine::SizingOptions;
use crate::error::{EngineResult, SizingError};
use crate::quadrant::Quadrant;
use crate::resistance::ResistanceProvider;
use bf_core::{GroundParameters, TemperatureBounds};
use bf_gfunction::ResponseProvider;
use bf_sim::{BindingLoad, ExpandedLoads, TemperatureSimulator};

pub(crate) fn size_quadrant(
    response: &dyn ResponseProvider,
    ground: &GroundParameters,
    loads: &ExpandedLoads,
    bounds: &TemperatureBounds,
    resistance: &dyn ResistanceProvider,
    opts: &SizingOptions,
    quadrant: Quadrant,
) -> EngineResult<(f64, usize)> {
    let tg = ground.ground_temperature_c();
    let side = quadrant.binding_load();
    let allowed = match side {
        BindingLoad::Cooling => bounds.max_c() - tg,
        BindingLoad::Heating => tg - bounds.min_c(),
    };
    if allowed <= 0.0 {
        return Err(SizingError::InfeasibleQuadrant {
            quadrant,
            what: format!(
                "temperature bound leaves no headroom against the undisturbed \
                 ground temperature ({tg} °C)"
            ),
        });
    }

    // First-year quadrants bind within year one; last-year quadrants over the
    // whole horizon.
    let window = if quadrant.is_first_year() {
        12
    } else {
        loads.months()
    };

    let sim = TemperatureSimulator::new(response, ground).with_peak_duration(opts.peak_duration_s);
    let mut h = opts.starting_depth();
    for iter in 1..=opts.max_iterations {
        let rb = resistance.resistance(h)?;
        let trace = sim.temperatures(h, loads, rb)?;
        let achieved = match side {
            BindingLoad::Cooling => trace.max_peak_cooling_within(window) - tg,
            BindingLoad::Heating => tg - trace.min_peak_heating_within(window),
        };
        if !achieved.is_finite() || achieved <= 0.0 {
            // The profile never presses against this bound at any depth.
            return Err(SizingError::InfeasibleQuadrant {
                quadrant,
                what: "load profile does not excite the binding temperature bound".into(),
            });
        }

        let h_new = h * achieved / allowed;
        if !h_new.is_finite() || h_new <= 0.0 {
            return Err(SizingError::InfeasibleQuadrant {
                quadrant,
                what: format!("depth update produced a non-physical depth ({h_new} m)"),
            });
        }

        tracing::trace!(
            quadrant = quadrant.number(),
            iter,
            depth_m = h_new,
            excursion_k = achieved,
            "L3 depth iteration"
        );
        if (h_new - h).abs() < opts.depth_tolerance_m {
            return Ok((h_new, iter));
        }
        h = h_new;
    }

    Err(SizingError::DidNotConverge {
        what: format!(
            "L3 depth iteration for quadrant {} still moving more than {} m",
            quadrant.number(),
            opts.depth_tolerance_m
        ),
        iterations: opts.max_iterations,
    })
}
