//! Error types for g-function lookup.

use bf_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GFunctionError {
    #[error("Unsupported geometry: no step-response data for {key}")]
    UnsupportedGeometry { key: String },

    #[error(
        "Elapsed time outside tabulated domain: ln(t/ts) = {ln_time:.3}, \
         domain [{min:.3}, {max:.3}]"
    )]
    OutOfRange { ln_time: f64, min: f64, max: f64 },

    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

pub type GfResult<T> = Result<T, GFunctionError>;
