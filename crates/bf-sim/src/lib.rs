//! bf-sim: load aggregation and monthly temperature simulation.
//!
//! Converts a monthly load profile into the multi-year step-load series and
//! predicts borehole-wall and fluid temperatures at a candidate depth by
//! temporal superposition of the field's step response.

pub mod error;
pub mod loads;
pub mod simulator;

pub use error::{SimError, SimResult};
pub use loads::{
    expand, first_year_pulses, last_year_pulses, BindingLoad, ExpandedLoads, FirstYearPulses,
    LastYearPulses,
};
pub use simulator::{TemperatureSimulator, TemperatureTrace, DEFAULT_PEAK_DURATION_S};
