//! bf-sizing: borefield depth sizing.
//!
//! Drives the temperature simulator under a depth-iteration loop to find the
//! minimal borehole depth that keeps predicted fluid temperatures within
//! bounds. Two strategies: L2 (two representative years, three-pulse
//! equations) and L3 (full multi-year profile). The quadrant search resolves
//! which limiting scenario governs when it is not known a priori.

pub mod borefield;
pub mod engine;
pub mod error;
mod l2;
mod l3;
pub mod quadrant;
pub mod resistance;

pub use borefield::Borefield;
pub use engine::{SizingEngine, SizingOptions, SizingResult, Strategy};
pub use error::{EngineResult, SizingError};
pub use quadrant::{Quadrant, QuadrantChoice};
pub use resistance::{ConstantResistance, FnResistance, ResistanceProvider};
