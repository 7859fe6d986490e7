//! Sizing engine: strategy dispatch and the quadrant search.

use crate::error::{EngineResult, SizingError};
use crate::quadrant::{Quadrant, QuadrantChoice};
use crate::resistance::ResistanceProvider;
use crate::{l2, l3};
use bf_core::{GroundParameters, MonthlyLoadProfile, TemperatureBounds};
use bf_gfunction::ResponseProvider;
use bf_sim::{expand, TemperatureSimulator, TemperatureTrace};

/// Sizing strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Three-pulse method on two representative years. Fast, slightly
    /// conservative.
    #[default]
    L2,
    /// Full monthly simulation over the whole horizon.
    L3,
}

/// Knobs for one sizing call.
#[derive(Clone, Copy, Debug)]
pub struct SizingOptions {
    pub strategy: Strategy,
    pub quadrant: QuadrantChoice,
    /// Seed depth for the fixed-point iteration, m.
    pub initial_depth_m: f64,
    /// Consult the resistance provider at every depth trial instead of using
    /// the ground's baseline value.
    pub use_dynamic_resistance: bool,
    pub max_iterations: usize,
    /// Convergence threshold on the depth update, m.
    pub depth_tolerance_m: f64,
    /// Duration of the peak pulse, s.
    pub peak_duration_s: f64,
}

impl Default for SizingOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::L2,
            quadrant: QuadrantChoice::Auto,
            initial_depth_m: 100.0,
            use_dynamic_resistance: false,
            max_iterations: 50,
            depth_tolerance_m: 0.01,
            peak_duration_s: bf_sim::DEFAULT_PEAK_DURATION_S,
        }
    }
}

impl SizingOptions {
    /// Seed depth, with degenerate seeds replaced by a workable one.
    pub(crate) fn starting_depth(&self) -> f64 {
        if self.initial_depth_m.is_finite() && self.initial_depth_m >= 1.0 {
            self.initial_depth_m
        } else {
            50.0
        }
    }

    fn validate(&self) -> EngineResult<()> {
        if self.max_iterations == 0 {
            return Err(SizingError::Configuration {
                what: "max_iterations must be at least 1".into(),
            });
        }
        if !(self.depth_tolerance_m > 0.0) || !self.depth_tolerance_m.is_finite() {
            return Err(SizingError::Configuration {
                what: format!(
                    "depth tolerance must be positive and finite, got {}",
                    self.depth_tolerance_m
                ),
            });
        }
        if !(self.peak_duration_s > 0.0) || !self.peak_duration_s.is_finite() {
            return Err(SizingError::Configuration {
                what: format!(
                    "peak duration must be positive and finite, got {} s",
                    self.peak_duration_s
                ),
            });
        }
        Ok(())
    }
}

/// Outcome of a successful sizing call.
#[derive(Clone, Debug)]
pub struct SizingResult {
    /// Required borehole depth, m.
    pub depth_m: f64,
    /// Quadrant that governed the depth.
    pub quadrant: Quadrant,
    pub strategy: Strategy,
    /// Iterations spent on the governing quadrant.
    pub iterations: usize,
    /// Equivalent borehole resistance at the sized depth, mK/W.
    pub resistance_m_k_w: f64,
    pub imbalance_kwh_per_year: f64,
    /// Monthly temperatures simulated at the sized depth.
    pub trace: TemperatureTrace,
}

/// One-shot sizing over borrowed problem data.
pub struct SizingEngine<'a> {
    response: &'a dyn ResponseProvider,
    ground: &'a GroundParameters,
    profile: &'a MonthlyLoadProfile,
    bounds: &'a TemperatureBounds,
    resistance: &'a dyn ResistanceProvider,
}

impl<'a> SizingEngine<'a> {
    pub fn new(
        response: &'a dyn ResponseProvider,
        ground: &'a GroundParameters,
        profile: &'a MonthlyLoadProfile,
        bounds: &'a TemperatureBounds,
        resistance: &'a dyn ResistanceProvider,
    ) -> Self {
        Self {
            response,
            ground,
            profile,
            bounds,
            resistance,
        }
    }

    /// Find the minimal depth that keeps fluid temperatures within bounds.
    ///
    /// With [`QuadrantChoice::Auto`] every quadrant is sized independently and
    /// the largest depth wins; quadrants that cannot bind for this profile are
    /// skipped. A pinned quadrant is sized alone and its failure is returned
    /// as-is.
    pub fn size(&self, opts: &SizingOptions) -> EngineResult<SizingResult> {
        opts.validate()?;
        if !self.profile.has_load() {
            return Err(SizingError::Configuration {
                what: "load profile has neither heating nor cooling load".into(),
            });
        }
        let loads = expand(self.profile)?;

        let candidates: &[Quadrant] = match opts.quadrant {
            QuadrantChoice::Auto => &Quadrant::ALL,
            QuadrantChoice::Pinned(ref q) => std::slice::from_ref(q),
        };
        let pinned = matches!(opts.quadrant, QuadrantChoice::Pinned(_));

        let mut winner: Option<(f64, Quadrant, usize)> = None;
        let mut skipped: Vec<String> = Vec::new();
        for &quadrant in candidates {
            let outcome = match opts.strategy {
                Strategy::L2 => l2::size_quadrant(
                    self.response,
                    self.ground,
                    self.profile,
                    self.bounds,
                    self.resistance,
                    opts,
                    quadrant,
                ),
                Strategy::L3 => l3::size_quadrant(
                    self.response,
                    self.ground,
                    &loads,
                    self.bounds,
                    self.resistance,
                    opts,
                    quadrant,
                ),
            };
            match outcome {
                Ok((depth, iterations)) => {
                    tracing::debug!(
                        quadrant = quadrant.number(),
                        depth_m = depth,
                        iterations,
                        "quadrant sized"
                    );
                    if winner.map_or(true, |(best, _, _)| depth > best) {
                        winner = Some((depth, quadrant, iterations));
                    }
                }
                Err(err) if !pinned && err.is_local_quadrant_failure() => {
                    tracing::debug!(
                        quadrant = quadrant.number(),
                        error = %err,
                        "quadrant skipped"
                    );
                    skipped.push(format!("quadrant {}: {err}", quadrant.number()));
                }
                Err(err) => return Err(err),
            }
        }

        // Every candidate failing locally is a search failure, not a local one.
        let Some((depth_m, quadrant, iterations)) = winner else {
            return Err(SizingError::DidNotConverge {
                what: format!(
                    "no quadrant produced a feasible depth ({})",
                    skipped.join("; ")
                ),
                iterations: opts.max_iterations,
            });
        };

        let resistance_m_k_w = self.resistance.resistance(depth_m)?;
        let trace = TemperatureSimulator::new(self.response, self.ground)
            .with_peak_duration(opts.peak_duration_s)
            .temperatures(depth_m, &loads, resistance_m_k_w)?;
        tracing::debug!(
            quadrant = quadrant.number(),
            depth_m,
            resistance_m_k_w,
            "sizing complete"
        );
        Ok(SizingResult {
            depth_m,
            quadrant,
            strategy: opts.strategy,
            iterations,
            resistance_m_k_w,
            imbalance_kwh_per_year: loads.imbalance_kwh,
            trace,
        })
    }
}
