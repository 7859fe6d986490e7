//! Parameter containers for the borefield aggregate.
//!
//! These are plain data holders: the ground record drives the sizing engine
//! directly, while the fluid and pipe records are carrier data for external
//! borehole-resistance providers.

use crate::error::{CoreError, CoreResult};
use crate::numeric::{ensure_positive, Real};
use crate::units::{
    degc, kg_per_m3, kgps, m, pa_s, to_degc, w_per_m_k, Conductivity, Density, DynVisc, Length,
    MassRate, SpecificHeat, Temperature,
};
use crate::units::j_per_kg_k;

/// Horizontal borehole position in the field plane, meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoreholePosition {
    pub x_m: Real,
    pub y_m: Real,
}

/// Ground and field-geometry record.
///
/// Defaults follow the precomputed-dataset conventions: volumetric heat
/// capacity 2.4e6 J/(m³·K), burial depth 4 m, borehole radius 0.075 m.
#[derive(Clone, Debug)]
pub struct GroundParameters {
    reference_depth: Length,
    spacing: Length,
    conductivity: Conductivity,
    ground_temperature: Temperature,
    baseline_resistance: Real,
    n1: u32,
    n2: u32,
    volumetric_heat_capacity: Real,
    burial_depth: Length,
    borehole_radius: Length,
    custom_positions: Option<Vec<BoreholePosition>>,
}

impl GroundParameters {
    /// Build a rectangular-field ground record.
    ///
    /// # Arguments
    /// * `reference_depth_m` - initial/reference borehole depth (m)
    /// * `spacing_m` - borehole spacing (m)
    /// * `conductivity_w_mk` - ground thermal conductivity (W/mK)
    /// * `ground_temperature_c` - undisturbed ground temperature (°C)
    /// * `baseline_resistance` - equivalent borehole resistance (mK/W)
    /// * `n1`, `n2` - field width and length counts
    pub fn new(
        reference_depth_m: Real,
        spacing_m: Real,
        conductivity_w_mk: Real,
        ground_temperature_c: Real,
        baseline_resistance: Real,
        n1: u32,
        n2: u32,
    ) -> CoreResult<Self> {
        ensure_positive(reference_depth_m, "reference depth must be positive")?;
        ensure_positive(spacing_m, "borehole spacing must be positive")?;
        ensure_positive(conductivity_w_mk, "ground conductivity must be positive")?;
        ensure_positive(baseline_resistance, "borehole resistance must be positive")?;
        if !ground_temperature_c.is_finite() {
            return Err(CoreError::NonFinite {
                what: "undisturbed ground temperature",
                value: ground_temperature_c,
            });
        }
        if n1 == 0 || n2 == 0 {
            return Err(CoreError::InvalidArg {
                what: "field counts must be at least 1",
            });
        }
        Ok(Self {
            reference_depth: m(reference_depth_m),
            spacing: m(spacing_m),
            conductivity: w_per_m_k(conductivity_w_mk),
            ground_temperature: degc(ground_temperature_c),
            baseline_resistance,
            n1,
            n2,
            volumetric_heat_capacity: 2.4e6,
            burial_depth: m(4.0),
            borehole_radius: m(0.075),
            custom_positions: None,
        })
    }

    pub fn with_volumetric_heat_capacity(mut self, c_j_m3k: Real) -> CoreResult<Self> {
        ensure_positive(c_j_m3k, "volumetric heat capacity must be positive")?;
        self.volumetric_heat_capacity = c_j_m3k;
        Ok(self)
    }

    pub fn with_burial_depth(mut self, depth_m: Real) -> CoreResult<Self> {
        ensure_positive(depth_m, "burial depth must be positive")?;
        self.burial_depth = m(depth_m);
        Ok(self)
    }

    pub fn with_borehole_radius(mut self, radius_m: Real) -> CoreResult<Self> {
        ensure_positive(radius_m, "borehole radius must be positive")?;
        self.borehole_radius = m(radius_m);
        Ok(self)
    }

    /// Replace the rectangular layout with an explicit position list.
    ///
    /// A custom layout never matches the precomputed g-function tables; it
    /// requires either a registered custom dataset or a step-response solver.
    pub fn with_custom_positions(mut self, positions: Vec<BoreholePosition>) -> CoreResult<Self> {
        if positions.is_empty() {
            return Err(CoreError::InvalidArg {
                what: "custom borehole position list must be non-empty",
            });
        }
        self.custom_positions = Some(positions);
        Ok(self)
    }

    pub fn reference_depth_m(&self) -> Real {
        self.reference_depth.value
    }

    pub fn spacing_m(&self) -> Real {
        self.spacing.value
    }

    /// Ground thermal conductivity, W/(m·K).
    pub fn conductivity_si(&self) -> Real {
        self.conductivity.value
    }

    /// Undisturbed ground temperature, °C.
    pub fn ground_temperature_c(&self) -> Real {
        to_degc(self.ground_temperature)
    }

    /// Baseline equivalent borehole resistance, mK/W.
    pub fn baseline_resistance(&self) -> Real {
        self.baseline_resistance
    }

    pub fn burial_depth_m(&self) -> Real {
        self.burial_depth.value
    }

    pub fn borehole_radius_m(&self) -> Real {
        self.borehole_radius.value
    }

    pub fn field_counts(&self) -> (u32, u32) {
        (self.n1, self.n2)
    }

    pub fn number_of_boreholes(&self) -> usize {
        match &self.custom_positions {
            Some(p) => p.len(),
            None => (self.n1 as usize) * (self.n2 as usize),
        }
    }

    pub fn custom_positions(&self) -> Option<&[BoreholePosition]> {
        self.custom_positions.as_deref()
    }

    /// Ground thermal diffusivity α = k / (ρ·c), m²/s.
    pub fn diffusivity_si(&self) -> Real {
        self.conductivity.value / self.volumetric_heat_capacity
    }
}

/// Fluid record consumed by depth-dependent resistance providers.
#[derive(Clone, Debug)]
pub struct FluidParameters {
    pub mass_flow_rate: MassRate,
    pub conductivity: Conductivity,
    pub density: Density,
    pub specific_heat: SpecificHeat,
    pub dynamic_viscosity: DynVisc,
}

impl FluidParameters {
    /// All arguments in SI: kg/s, W/mK, kg/m³, J/(kg·K), Pa·s.
    pub fn new(
        mass_flow_rate_kgps: Real,
        conductivity_w_mk: Real,
        density_kg_m3: Real,
        specific_heat_j_kgk: Real,
        dynamic_viscosity_pas: Real,
    ) -> CoreResult<Self> {
        ensure_positive(mass_flow_rate_kgps, "fluid mass flow rate must be positive")?;
        ensure_positive(conductivity_w_mk, "fluid conductivity must be positive")?;
        ensure_positive(density_kg_m3, "fluid density must be positive")?;
        ensure_positive(specific_heat_j_kgk, "fluid specific heat must be positive")?;
        ensure_positive(dynamic_viscosity_pas, "fluid viscosity must be positive")?;
        Ok(Self {
            mass_flow_rate: kgps(mass_flow_rate_kgps),
            conductivity: w_per_m_k(conductivity_w_mk),
            density: kg_per_m3(density_kg_m3),
            specific_heat: j_per_kg_k(specific_heat_j_kgk),
            dynamic_viscosity: pa_s(dynamic_viscosity_pas),
        })
    }
}

/// Pipe record consumed by depth-dependent resistance providers.
#[derive(Clone, Debug)]
pub struct PipeParameters {
    pub grout_conductivity: Conductivity,
    pub inner_radius: Length,
    pub outer_radius: Length,
    pub pipe_conductivity: Conductivity,
    pub shank_spacing: Length,
    pub borehole_radius: Length,
    pub number_of_pipes: u32,
}

impl PipeParameters {
    pub fn new(
        grout_conductivity_w_mk: Real,
        inner_radius_m: Real,
        outer_radius_m: Real,
        pipe_conductivity_w_mk: Real,
        shank_spacing_m: Real,
        borehole_radius_m: Real,
        number_of_pipes: u32,
    ) -> CoreResult<Self> {
        ensure_positive(grout_conductivity_w_mk, "grout conductivity must be positive")?;
        ensure_positive(inner_radius_m, "pipe inner radius must be positive")?;
        ensure_positive(outer_radius_m, "pipe outer radius must be positive")?;
        ensure_positive(pipe_conductivity_w_mk, "pipe conductivity must be positive")?;
        ensure_positive(shank_spacing_m, "shank spacing must be positive")?;
        ensure_positive(borehole_radius_m, "borehole radius must be positive")?;
        if outer_radius_m <= inner_radius_m {
            return Err(CoreError::InvalidArg {
                what: "pipe outer radius must exceed inner radius",
            });
        }
        if number_of_pipes == 0 {
            return Err(CoreError::InvalidArg {
                what: "number of pipes must be at least 1",
            });
        }
        Ok(Self {
            grout_conductivity: w_per_m_k(grout_conductivity_w_mk),
            inner_radius: m(inner_radius_m),
            outer_radius: m(outer_radius_m),
            pipe_conductivity: w_per_m_k(pipe_conductivity_w_mk),
            shank_spacing: m(shank_spacing_m),
            borehole_radius: m(borehole_radius_m),
            number_of_pipes,
        })
    }
}

/// Allowable mean-fluid temperature window, °C.
#[derive(Clone, Copy, Debug)]
pub struct TemperatureBounds {
    min: Temperature,
    max: Temperature,
}

impl TemperatureBounds {
    pub fn new(min_c: Real, max_c: Real) -> CoreResult<Self> {
        if !min_c.is_finite() {
            return Err(CoreError::NonFinite {
                what: "minimum temperature bound",
                value: min_c,
            });
        }
        if !max_c.is_finite() {
            return Err(CoreError::NonFinite {
                what: "maximum temperature bound",
                value: max_c,
            });
        }
        if max_c <= min_c {
            return Err(CoreError::Configuration {
                what: format!(
                    "maximum temperature bound ({max_c} °C) must exceed the minimum ({min_c} °C)"
                ),
            });
        }
        Ok(Self {
            min: degc(min_c),
            max: degc(max_c),
        })
    }

    pub fn min_c(&self) -> Real {
        to_degc(self.min)
    }

    pub fn max_c(&self) -> Real {
        to_degc(self.max)
    }
}
