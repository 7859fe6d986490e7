//! Shared fixtures: the 12x10 reference field from Peere et al. (2021) with
//! its four validation load profiles, driven by a synthetic smooth
//! g-function so the tests carry no external dataset.
#![allow(dead_code)]

use bf_core::{GroundParameters, MonthlyLoadProfile, TemperatureBounds};
use bf_gfunction::{FieldKey, GFunctionStore, GFunctionTable};

pub const HEATING_SHARE: [f64; 12] = [
    0.155, 0.148, 0.125, 0.099, 0.064, 0.0, 0.0, 0.0, 0.061, 0.087, 0.117, 0.144,
];
pub const COOLING_SHARE: [f64; 12] = [
    0.025, 0.05, 0.05, 0.05, 0.075, 0.1, 0.2, 0.2, 0.1, 0.075, 0.05, 0.025,
];

pub fn ground() -> GroundParameters {
    GroundParameters::new(110.0, 6.5, 3.5, 10.0, 0.2, 12, 10).unwrap()
}

pub fn bounds() -> TemperatureBounds {
    TemperatureBounds::new(0.0, 16.0).unwrap()
}

/// Smooth monotone stand-in for a borefield response, tabulated over a wide
/// log-time window so depth iterations never leave the table.
pub fn synthetic_table() -> GFunctionTable {
    let pairs: Vec<(f64, f64)> = (0..=100)
        .map(|i| {
            let x = -14.0 + 0.2 * i as f64;
            let g = 12.0 * (1.0 + (0.45 * (x + 1.5)).exp()).ln() + 0.5;
            (x, g)
        })
        .collect();
    GFunctionTable::from_pairs(&pairs).unwrap()
}

pub fn store() -> GFunctionStore {
    let mut store = GFunctionStore::new();
    store.add_precomputed(FieldKey::for_ground(&ground()), synthetic_table());
    store
}

fn scale(share: &[f64; 12], total_kwh: f64) -> [f64; 12] {
    let mut out = [0.0; 12];
    for (o, s) in out.iter_mut().zip(share) {
        *o = s * total_kwh;
    }
    out
}

/// The four load cases of the validation paper, 20-year horizon.
pub fn validation_case(case: u8) -> MonthlyLoadProfile {
    validation_case_with_years(case, 20)
}

pub fn validation_case_with_years(case: u8, years: u32) -> MonthlyLoadProfile {
    let (heating_mwh, cooling_mwh, peak_heating, peak_cooling) = match case {
        1 => (
            300.0,
            150.0,
            [0.0; 12],
            [0.0, 0.0, 22.0, 44.0, 83.0, 117.0, 134.0, 150.0, 100.0, 23.0, 0.0, 0.0],
        ),
        2 => (
            160.0,
            240.0,
            [
                160.0, 142.0, 102.0, 55.0, 0.0, 0.0, 0.0, 0.0, 40.4, 85.0, 119.0, 136.0,
            ],
            [0.0, 0.0, 34.0, 69.0, 133.0, 187.0, 213.0, 240.0, 160.0, 37.0, 0.0, 0.0],
        ),
        3 => (
            160.0,
            240.0,
            [
                300.0, 266.25, 191.25, 103.125, 0.0, 0.0, 0.0, 0.0, 75.75, 159.375, 223.125, 255.0,
            ],
            [0.0; 12],
        ),
        4 => (
            300.0,
            150.0,
            [
                300.0, 268.0, 191.0, 103.0, 75.0, 0.0, 0.0, 38.0, 76.0, 160.0, 224.0, 255.0,
            ],
            [0.0, 0.0, 22.0, 44.0, 83.0, 117.0, 134.0, 150.0, 100.0, 23.0, 0.0, 0.0],
        ),
        _ => panic!("validation cases are numbered 1 through 4"),
    };
    MonthlyLoadProfile::new(
        scale(&HEATING_SHARE, heating_mwh * 1000.0),
        scale(&COOLING_SHARE, cooling_mwh * 1000.0),
        peak_heating,
        peak_cooling,
        years,
    )
    .unwrap()
}

/// A validation case with every load and peak multiplied by `factor`.
pub fn scaled_case(case: u8, factor: f64) -> MonthlyLoadProfile {
    let base = validation_case(case);
    let mut heating = *base.baseload_heating_kwh();
    let mut cooling = *base.baseload_cooling_kwh();
    let mut peak_h = *base.peak_heating_kw();
    let mut peak_c = *base.peak_cooling_kw();
    for m in 0..12 {
        heating[m] *= factor;
        cooling[m] *= factor;
        peak_h[m] *= factor;
        peak_c[m] *= factor;
    }
    MonthlyLoadProfile::new(heating, cooling, peak_h, peak_c, base.simulation_years()).unwrap()
}
