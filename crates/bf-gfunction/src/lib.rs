//! bf-gfunction: thermal step-response (g-function) tables and lookup.
//!
//! A g-function table maps the logarithmic Eskilson time axis ln(t/ts) to the
//! dimensionless wall response of a borehole field. This crate owns:
//! - the table type with linear log-time interpolation and an explicit
//!   extrapolation policy,
//! - the store of precomputed tables (keyed by field geometry) plus custom
//!   caller-registered tables,
//! - the `ResponseProvider` seam consumed by the temperature simulator, and
//!   the `StepResponseSolver` seam for ab-initio computation.

pub mod error;
pub mod provider;
pub mod store;
pub mod table;

pub use error::{GFunctionError, GfResult};
pub use provider::{ResponseProvider, StepResponseSolver, TabulatedResponse};
pub use store::{FieldKey, GFunctionSource, GFunctionStore};
pub use table::{Extrapolation, GFunctionTable};
