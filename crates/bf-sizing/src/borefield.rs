//! Borefield aggregate: one field, its loads and bounds, and the resolved
//! step response, driving sizing and simulation through a single handle.

use crate::engine::{SizingEngine, SizingOptions, SizingResult};
use crate::error::{EngineResult, SizingError};
use crate::resistance::{ConstantResistance, ResistanceProvider};
use bf_core::{GroundParameters, MonthlyLoadProfile, TemperatureBounds};
use bf_gfunction::{GFunctionSource, GFunctionStore, StepResponseSolver, TabulatedResponse};
use bf_sim::{expand, TemperatureSimulator, TemperatureTrace};

pub struct Borefield {
    ground: GroundParameters,
    profile: MonthlyLoadProfile,
    bounds: TemperatureBounds,
    resistance: Option<Box<dyn ResistanceProvider>>,
    source: GFunctionSource,
    response: Option<TabulatedResponse>,
    depth_m: f64,
    last_result: Option<SizingResult>,
}

impl Borefield {
    pub fn new(
        ground: GroundParameters,
        profile: MonthlyLoadProfile,
        bounds: TemperatureBounds,
    ) -> Self {
        let depth_m = ground.reference_depth_m();
        Self {
            ground,
            profile,
            bounds,
            resistance: None,
            source: GFunctionSource::Precomputed,
            response: None,
            depth_m,
            last_result: None,
        }
    }

    /// Install a depth-dependent borehole-resistance provider, used when a
    /// sizing call asks for dynamic resistance.
    pub fn set_resistance_provider(&mut self, provider: Box<dyn ResistanceProvider>) {
        self.resistance = Some(provider);
    }

    /// Read the step response from a named custom dataset instead of the
    /// precomputed store. Takes effect at the next [`Borefield::prepare`].
    pub fn use_custom_gfunction(&mut self, name: &str) {
        self.source = GFunctionSource::Custom(name.to_string());
        self.response = None;
    }

    /// Revert to precomputed-table lookup. Takes effect at the next
    /// [`Borefield::prepare`].
    pub fn use_precomputed_gfunction(&mut self) {
        self.source = GFunctionSource::Precomputed;
        self.response = None;
    }

    /// Resolve the g-function table for this field. Must be called before
    /// sizing or simulating; the resolved table is shared, not copied.
    pub fn prepare(
        &mut self,
        store: &GFunctionStore,
        solver: Option<&dyn StepResponseSolver>,
    ) -> EngineResult<()> {
        let table = store.resolve(&self.ground, &self.source, solver)?;
        self.response = Some(TabulatedResponse::for_ground(table, &self.ground));
        Ok(())
    }

    fn response(&self) -> EngineResult<&TabulatedResponse> {
        self.response.as_ref().ok_or_else(|| SizingError::Configuration {
            what: "no g-function resolved; call prepare() before sizing or simulating".into(),
        })
    }

    /// Size the field. On success the result is cached and the current depth
    /// moves to the sized depth; on failure both are left untouched.
    pub fn size(&mut self, opts: &SizingOptions) -> EngineResult<SizingResult> {
        let response = self.response()?;
        let constant = ConstantResistance(self.ground.baseline_resistance());
        let provider: &dyn ResistanceProvider = if opts.use_dynamic_resistance {
            self.resistance
                .as_deref()
                .ok_or_else(|| SizingError::Configuration {
                    what: "dynamic resistance requested but no resistance provider installed"
                        .into(),
                })?
        } else {
            &constant
        };

        let engine = SizingEngine::new(
            response,
            &self.ground,
            &self.profile,
            &self.bounds,
            provider,
        );
        let result = engine.size(opts)?;
        self.depth_m = result.depth_m;
        self.last_result = Some(result.clone());
        Ok(result)
    }

    /// Simulate monthly temperatures at an arbitrary depth, without sizing.
    pub fn temperatures_at(&self, depth_m: f64) -> EngineResult<TemperatureTrace> {
        let response = self.response()?;
        let rb = match &self.resistance {
            Some(provider) => provider.resistance(depth_m)?,
            None => self.ground.baseline_resistance(),
        };
        let loads = expand(&self.profile)?;
        let trace =
            TemperatureSimulator::new(response, &self.ground).temperatures(depth_m, &loads, rb)?;
        Ok(trace)
    }

    /// Yearly load imbalance, kWh (positive means injection dominated).
    pub fn imbalance_kwh(&self) -> f64 {
        self.profile.imbalance_kwh()
    }

    /// Current depth: the reference depth until a sizing call succeeds.
    pub fn current_depth_m(&self) -> f64 {
        self.depth_m
    }

    pub fn last_result(&self) -> Option<&SizingResult> {
        self.last_result.as_ref()
    }

    pub fn ground(&self) -> &GroundParameters {
        &self.ground
    }

    pub fn bounds(&self) -> &TemperatureBounds {
        &self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_gfunction::{FieldKey, GFunctionTable};

    fn synthetic_table() -> GFunctionTable {
        let pairs: Vec<(f64, f64)> = (0..=80)
            .map(|i| {
                let x = -11.0 + 0.2 * i as f64;
                let g = 12.0 * (1.0 + (0.45 * (x + 1.5)).exp()).ln() + 0.5;
                (x, g)
            })
            .collect();
        GFunctionTable::from_pairs(&pairs).unwrap()
    }

    fn field() -> (Borefield, GFunctionStore) {
        let ground = GroundParameters::new(110.0, 6.5, 3.5, 10.0, 0.2, 12, 10).unwrap();
        let mut heating = [0.0; 12];
        let mut cooling = [0.0; 12];
        let mut peak_h = [0.0; 12];
        let mut peak_c = [0.0; 12];
        for m in 0..12 {
            heating[m] = 25_000.0;
            cooling[m] = 12_500.0;
            peak_h[m] = 120.0;
            peak_c[m] = 100.0;
        }
        let profile = MonthlyLoadProfile::new(heating, cooling, peak_h, peak_c, 20).unwrap();
        let bounds = TemperatureBounds::new(0.0, 16.0).unwrap();

        let mut store = GFunctionStore::new();
        store.add_precomputed(FieldKey::for_ground(&ground), synthetic_table());
        (Borefield::new(ground, profile, bounds), store)
    }

    #[test]
    fn sizing_before_prepare_is_configuration_error() {
        let (mut field, _store) = field();
        let err = field.size(&SizingOptions::default()).unwrap_err();
        assert!(matches!(err, SizingError::Configuration { .. }));
        assert_eq!(field.current_depth_m(), 110.0);
    }

    #[test]
    fn size_updates_depth_and_caches_result() {
        let (mut field, store) = field();
        field.prepare(&store, None).unwrap();
        let result = field.size(&SizingOptions::default()).unwrap();
        assert!(result.depth_m > 0.0);
        assert_eq!(field.current_depth_m(), result.depth_m);
        assert_eq!(
            field.last_result().unwrap().quadrant.number(),
            result.quadrant.number()
        );
    }

    #[test]
    fn dynamic_resistance_without_provider_fails() {
        let (mut field, store) = field();
        field.prepare(&store, None).unwrap();
        let mut opts = SizingOptions::default();
        opts.use_dynamic_resistance = true;
        let err = field.size(&opts).unwrap_err();
        assert!(matches!(err, SizingError::Configuration { .. }));
        // Failure leaves the depth untouched.
        assert_eq!(field.current_depth_m(), 110.0);
    }

    #[test]
    fn custom_dataset_round_trip() {
        let (mut field, mut store) = field();
        store.register_custom("measured", synthetic_table()).unwrap();
        field.use_custom_gfunction("measured");
        field.prepare(&store, None).unwrap();
        let custom = field.size(&SizingOptions::default()).unwrap();

        field.use_precomputed_gfunction();
        field.prepare(&store, None).unwrap();
        let precomputed = field.size(&SizingOptions::default()).unwrap();

        // Same table under both sources: identical sizing.
        assert!((custom.depth_m - precomputed.depth_m).abs() < 1e-9);
    }

    #[test]
    fn temperatures_at_uses_installed_provider() {
        let (mut field, store) = field();
        field.prepare(&store, None).unwrap();
        let base = field.temperatures_at(100.0).unwrap();
        assert_eq!(base.months(), 240);
        assert!(base.max_peak_cooling_c() > base.min_peak_heating_c());
    }
}
