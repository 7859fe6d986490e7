//! Error types for sizing operations.

use crate::quadrant::Quadrant;
use bf_core::CoreError;
use bf_gfunction::GFunctionError;
use bf_sim::SimError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SizingError {
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error("Sizing did not converge after {iterations} iterations: {what}")]
    DidNotConverge { what: String, iterations: usize },

    #[error("Quadrant {} infeasible: {what}", .quadrant.number())]
    InfeasibleQuadrant { quadrant: Quadrant, what: String },

    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("G-function error: {0}")]
    GFunction(#[from] GFunctionError),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

pub type EngineResult<T> = Result<T, SizingError>;

impl SizingError {
    /// Local outcomes of a single quadrant evaluation: the auto search skips
    /// these and tries the next quadrant; anything else aborts the search.
    pub(crate) fn is_local_quadrant_failure(&self) -> bool {
        match self {
            SizingError::InfeasibleQuadrant { .. } | SizingError::DidNotConverge { .. } => true,
            SizingError::GFunction(GFunctionError::OutOfRange { .. }) => true,
            SizingError::Sim(SimError::GFunction(GFunctionError::OutOfRange { .. })) => true,
            _ => false,
        }
    }
}
