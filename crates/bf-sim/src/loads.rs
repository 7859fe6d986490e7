//! Load aggregation: monthly profile to multi-year step-load series, plus
//! the two-period pulse synthesis used by the fast sizing method.

use crate::error::{SimError, SimResult};
use bf_core::units::constants::{HOURS_PER_MONTH, HOURS_PER_YEAR};
use bf_core::MonthlyLoadProfile;

/// Which temperature bound a sizing scenario presses against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingLoad {
    /// Injection limited: the maximum temperature binds.
    Cooling,
    /// Extraction limited: the minimum temperature binds.
    Heating,
}

/// The monthly profile tiled over the simulation horizon.
///
/// All power series are kW; `net_avg_kw` is injection-positive.
#[derive(Clone, Debug)]
pub struct ExpandedLoads {
    pub years: u32,
    pub net_avg_kw: Vec<f64>,
    pub avg_heating_kw: Vec<f64>,
    pub avg_cooling_kw: Vec<f64>,
    pub peak_heating_kw: Vec<f64>,
    pub peak_cooling_kw: Vec<f64>,
    pub imbalance_kwh: f64,
}

impl ExpandedLoads {
    pub fn months(&self) -> usize {
        self.net_avg_kw.len()
    }
}

/// Expand a monthly profile into the per-period series the simulator needs.
///
/// Peaks are the effective peaks (declared peak floored at the month's
/// average baseload power).
pub fn expand(profile: &MonthlyLoadProfile) -> SimResult<ExpandedLoads> {
    if !profile.has_load() {
        return Err(SimError::InvalidArg {
            what: "load profile has neither heating nor cooling load",
        });
    }
    let years = profile.simulation_years();
    let n = 12 * years as usize;
    let mut loads = ExpandedLoads {
        years,
        net_avg_kw: Vec::with_capacity(n),
        avg_heating_kw: Vec::with_capacity(n),
        avg_cooling_kw: Vec::with_capacity(n),
        peak_heating_kw: Vec::with_capacity(n),
        peak_cooling_kw: Vec::with_capacity(n),
        imbalance_kwh: profile.imbalance_kwh(),
    };
    for k in 0..n {
        let month = k % 12;
        loads.net_avg_kw.push(profile.net_avg_kw(month));
        loads.avg_heating_kw.push(profile.avg_heating_kw(month));
        loads.avg_cooling_kw.push(profile.avg_cooling_kw(month));
        loads
            .peak_heating_kw
            .push(profile.effective_peak_heating_kw(month));
        loads
            .peak_cooling_kw
            .push(profile.effective_peak_cooling_kw(month));
    }
    tracing::trace!(
        months = n,
        imbalance_kwh = loads.imbalance_kwh,
        "expanded monthly profile"
    );
    Ok(loads)
}

/// Pulse magnitudes for first-year (peak-year) two-period sizing, in watts,
/// oriented toward the binding bound (positive pushes the temperature
/// toward that bound).
#[derive(Clone, Copy, Debug)]
pub struct FirstYearPulses {
    /// Critical month (index of the largest effective peak on the binding side).
    pub month_index: usize,
    /// Peak power, W.
    pub qh_w: f64,
    /// Net average power of the critical month, W.
    pub qm_w: f64,
    /// Average net power of the months preceding the critical month, W.
    pub qpm_w: f64,
}

/// Pulse magnitudes for last-year (steady-state) two-period sizing, watts,
/// same orientation as [`FirstYearPulses`].
#[derive(Clone, Copy, Debug)]
pub struct LastYearPulses {
    pub month_index: usize,
    pub qh_w: f64,
    pub qm_w: f64,
    /// Yearly average imbalance power, W.
    pub qa_w: f64,
}

fn critical_month(profile: &MonthlyLoadProfile, side: BindingLoad) -> (usize, f64) {
    let mut best = (0, f64::NEG_INFINITY);
    for month in 0..12 {
        let peak = match side {
            BindingLoad::Cooling => profile.effective_peak_cooling_kw(month),
            BindingLoad::Heating => profile.effective_peak_heating_kw(month),
        };
        if peak > best.1 {
            best = (month, peak);
        }
    }
    best
}

/// Sign that maps net injection-positive load onto the binding direction.
fn orientation(side: BindingLoad) -> f64 {
    match side {
        BindingLoad::Cooling => 1.0,
        BindingLoad::Heating => -1.0,
    }
}

pub fn first_year_pulses(profile: &MonthlyLoadProfile, side: BindingLoad) -> FirstYearPulses {
    let (mi, peak_kw) = critical_month(profile, side);
    let sign = orientation(side);
    let preceding: f64 = (0..mi).map(|m| profile.net_avg_kw(m)).sum();
    FirstYearPulses {
        month_index: mi,
        qh_w: peak_kw * 1000.0,
        qm_w: sign * profile.net_avg_kw(mi) * 1000.0,
        // Average of the preceding months, spread over one extra month.
        qpm_w: if mi == 0 {
            0.0
        } else {
            sign * preceding * 1000.0 / (mi as f64 + 1.0)
        },
    }
}

pub fn last_year_pulses(profile: &MonthlyLoadProfile, side: BindingLoad) -> LastYearPulses {
    let (mi, peak_kw) = critical_month(profile, side);
    let sign = orientation(side);
    LastYearPulses {
        month_index: mi,
        qh_w: peak_kw * 1000.0,
        qm_w: sign * profile.net_avg_kw(mi) * 1000.0,
        qa_w: sign * profile.imbalance_kwh() * 1000.0 / HOURS_PER_YEAR,
    }
}

/// Length of one load month in seconds.
pub fn month_seconds() -> f64 {
    HOURS_PER_MONTH * 3600.0
}
