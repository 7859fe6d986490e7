//! Error types for load expansion and temperature simulation.

use bf_core::CoreError;
use bf_gfunction::GFunctionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("G-function error: {0}")]
    GFunction(#[from] GFunctionError),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
