//! Store of precomputed and custom g-function tables.

use crate::error::{GFunctionError, GfResult};
use crate::provider::StepResponseSolver;
use crate::table::GFunctionTable;
use bf_core::GroundParameters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Lookup key for precomputed rectangular-field tables.
///
/// Spacing and burial depth are rounded to millimeters so the key is hashable
/// without floating-point surprises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldKey {
    pub n1: u32,
    pub n2: u32,
    pub spacing_mm: u64,
    pub burial_mm: u64,
}

impl FieldKey {
    pub fn new(n1: u32, n2: u32, spacing_m: f64, burial_depth_m: f64) -> Self {
        Self {
            n1,
            n2,
            spacing_mm: (spacing_m * 1000.0).round() as u64,
            burial_mm: (burial_depth_m * 1000.0).round() as u64,
        }
    }

    pub fn for_ground(ground: &GroundParameters) -> Self {
        let (n1, n2) = ground.field_counts();
        Self::new(n1, n2, ground.spacing_m(), ground.burial_depth_m())
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} field, B = {:.3} m, D = {:.3} m",
            self.n1,
            self.n2,
            self.spacing_mm as f64 / 1000.0,
            self.burial_mm as f64 / 1000.0
        )
    }
}

/// Which dataset a sizing call reads its step response from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GFunctionSource {
    /// Look the field geometry up in the precomputed store (ab-initio solver
    /// as fallback when one is supplied).
    Precomputed,
    /// Use the named caller-registered dataset.
    Custom(String),
}

/// Owns the precomputed tables and any custom user-supplied tables.
///
/// Registration happens before sizing; during sizing the store is read-only
/// and hands out shared `Arc` tables.
#[derive(Default)]
pub struct GFunctionStore {
    precomputed: HashMap<FieldKey, Arc<GFunctionTable>>,
    custom: HashMap<String, Arc<GFunctionTable>>,
}

impl GFunctionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_precomputed(&mut self, key: FieldKey, table: GFunctionTable) {
        self.precomputed.insert(key, Arc::new(table));
    }

    /// Register a caller-supplied dataset under a name.
    ///
    /// Names are unique: re-registering is a configuration error, not a
    /// silent overwrite.
    pub fn register_custom(&mut self, name: &str, table: GFunctionTable) -> GfResult<()> {
        if self.custom.contains_key(name) {
            return Err(GFunctionError::Configuration {
                what: format!("custom g-function dataset '{name}' is already registered"),
            });
        }
        self.custom.insert(name.to_string(), Arc::new(table));
        Ok(())
    }

    pub fn has_custom(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    pub fn has_precomputed(&self, key: &FieldKey) -> bool {
        self.precomputed.contains_key(key)
    }

    /// Resolve the table for a field, per the selected source.
    ///
    /// Precomputed lookups fall back to the ab-initio solver collaborator
    /// when one is supplied; custom lookups never fall back.
    pub fn resolve(
        &self,
        ground: &GroundParameters,
        source: &GFunctionSource,
        solver: Option<&dyn StepResponseSolver>,
    ) -> GfResult<Arc<GFunctionTable>> {
        match source {
            GFunctionSource::Custom(name) => {
                self.custom
                    .get(name)
                    .cloned()
                    .ok_or_else(|| GFunctionError::Configuration {
                        what: format!(
                            "custom g-function dataset '{name}' selected but never registered"
                        ),
                    })
            }
            GFunctionSource::Precomputed => {
                if ground.custom_positions().is_none() {
                    let key = FieldKey::for_ground(ground);
                    if let Some(table) = self.precomputed.get(&key) {
                        return Ok(table.clone());
                    }
                }
                if let Some(solver) = solver {
                    tracing::debug!("precomputed table miss, invoking step-response solver");
                    return Ok(Arc::new(solver.step_response(ground)?));
                }
                let key = match ground.custom_positions() {
                    Some(p) => format!("custom layout of {} boreholes", p.len()),
                    None => FieldKey::for_ground(ground).to_string(),
                };
                Err(GFunctionError::UnsupportedGeometry { key })
            }
        }
    }
}
