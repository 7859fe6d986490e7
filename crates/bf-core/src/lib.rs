//! bf-core: stable foundation for the borefield sizing workspace.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - params (ground, fluid, pipe and temperature-bound containers)
//! - loads (monthly baseload/peak profile)
//! - error (shared error types)

pub mod error;
pub mod loads;
pub mod numeric;
pub mod params;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use loads::MonthlyLoadProfile;
pub use numeric::*;
pub use params::{
    BoreholePosition, FluidParameters, GroundParameters, PipeParameters, TemperatureBounds,
};
pub use units::*;
