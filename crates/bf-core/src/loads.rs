//! Monthly baseload/peak load profile.
//!
//! Energies are kWh per month, peaks are kW. Sign convention for the rest of
//! the workspace: cooling injects heat into the ground (positive), heating
//! extracts it (negative).

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;
use crate::units::constants::HOURS_PER_MONTH;
use serde::{Deserialize, Serialize};

/// Monthly load profile over a multi-year simulation horizon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyLoadProfile {
    baseload_heating_kwh: [Real; 12],
    baseload_cooling_kwh: [Real; 12],
    peak_heating_kw: [Real; 12],
    peak_cooling_kw: [Real; 12],
    simulation_years: u32,
}

fn check_non_negative(values: &[Real; 12], what: &'static str) -> CoreResult<()> {
    for &v in values {
        if !v.is_finite() {
            return Err(CoreError::NonFinite { what, value: v });
        }
        if v < 0.0 {
            return Err(CoreError::InvalidArg { what });
        }
    }
    Ok(())
}

impl MonthlyLoadProfile {
    pub fn new(
        baseload_heating_kwh: [Real; 12],
        baseload_cooling_kwh: [Real; 12],
        peak_heating_kw: [Real; 12],
        peak_cooling_kw: [Real; 12],
        simulation_years: u32,
    ) -> CoreResult<Self> {
        check_non_negative(&baseload_heating_kwh, "baseload heating must be non-negative")?;
        check_non_negative(&baseload_cooling_kwh, "baseload cooling must be non-negative")?;
        check_non_negative(&peak_heating_kw, "peak heating must be non-negative")?;
        check_non_negative(&peak_cooling_kw, "peak cooling must be non-negative")?;
        if simulation_years == 0 {
            return Err(CoreError::InvalidArg {
                what: "simulation horizon must be at least one year",
            });
        }
        Ok(Self {
            baseload_heating_kwh,
            baseload_cooling_kwh,
            peak_heating_kw,
            peak_cooling_kw,
            simulation_years,
        })
    }

    pub fn simulation_years(&self) -> u32 {
        self.simulation_years
    }

    pub fn baseload_heating_kwh(&self) -> &[Real; 12] {
        &self.baseload_heating_kwh
    }

    pub fn baseload_cooling_kwh(&self) -> &[Real; 12] {
        &self.baseload_cooling_kwh
    }

    /// Declared (unfloored) heating peaks, kW.
    pub fn peak_heating_kw(&self) -> &[Real; 12] {
        &self.peak_heating_kw
    }

    /// Declared (unfloored) cooling peaks, kW.
    pub fn peak_cooling_kw(&self) -> &[Real; 12] {
        &self.peak_cooling_kw
    }

    /// Average heating power in a month, kW.
    pub fn avg_heating_kw(&self, month: usize) -> Real {
        self.baseload_heating_kwh[month] / HOURS_PER_MONTH
    }

    /// Average cooling power in a month, kW.
    pub fn avg_cooling_kw(&self, month: usize) -> Real {
        self.baseload_cooling_kwh[month] / HOURS_PER_MONTH
    }

    /// Net average ground load in a month, kW, injection-positive.
    pub fn net_avg_kw(&self, month: usize) -> Real {
        self.avg_cooling_kw(month) - self.avg_heating_kw(month)
    }

    /// Monthly heating peak floored at the month's average baseload power.
    pub fn effective_peak_heating_kw(&self, month: usize) -> Real {
        self.peak_heating_kw[month].max(self.avg_heating_kw(month))
    }

    /// Monthly cooling peak floored at the month's average baseload power.
    pub fn effective_peak_cooling_kw(&self, month: usize) -> Real {
        self.peak_cooling_kw[month].max(self.avg_cooling_kw(month))
    }

    /// Signed annual imbalance, kWh/year. Negative means extraction dominated
    /// (the ground cools down year after year).
    pub fn imbalance_kwh(&self) -> Real {
        let cooling: Real = self.baseload_cooling_kwh.iter().sum();
        let heating: Real = self.baseload_heating_kwh.iter().sum();
        cooling - heating
    }

    /// True if any baseload or peak entry is non-zero.
    pub fn has_load(&self) -> bool {
        let any = |a: &[Real; 12]| a.iter().any(|&v| v > 0.0);
        any(&self.baseload_heating_kwh)
            || any(&self.baseload_cooling_kwh)
            || any(&self.peak_heating_kw)
            || any(&self.peak_cooling_kw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(v: Real) -> [Real; 12] {
        [v; 12]
    }

    #[test]
    fn rejects_negative_entries() {
        let mut heating = uniform(100.0);
        heating[3] = -1.0;
        let err = MonthlyLoadProfile::new(heating, uniform(0.0), uniform(0.0), uniform(0.0), 20);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_zero_horizon() {
        let err =
            MonthlyLoadProfile::new(uniform(1.0), uniform(1.0), uniform(1.0), uniform(1.0), 0);
        assert!(err.is_err());
    }

    #[test]
    fn imbalance_is_signed() {
        let p =
            MonthlyLoadProfile::new(uniform(100.0), uniform(50.0), uniform(0.0), uniform(0.0), 20)
                .unwrap();
        assert!((p.imbalance_kwh() + 600.0).abs() < 1e-9);
    }

    #[test]
    fn effective_peaks_floor_at_average() {
        // 7300 kWh over 730 h is 10 kW average; a 4 kW declared peak is raised.
        let p =
            MonthlyLoadProfile::new(uniform(7300.0), uniform(0.0), uniform(4.0), uniform(0.0), 20)
                .unwrap();
        assert!((p.effective_peak_heating_kw(0) - 10.0).abs() < 1e-12);
        // A declared peak above the average is kept.
        let p2 =
            MonthlyLoadProfile::new(uniform(7300.0), uniform(0.0), uniform(25.0), uniform(0.0), 20)
                .unwrap();
        assert!((p2.effective_peak_heating_kw(0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn has_load_detects_empty_profile() {
        let empty =
            MonthlyLoadProfile::new(uniform(0.0), uniform(0.0), uniform(0.0), uniform(0.0), 20)
                .unwrap();
        assert!(!empty.has_load());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arr() -> impl Strategy<Value = [Real; 12]> {
            prop::array::uniform12(0.0_f64..1e6)
        }

        proptest! {
            #[test]
            fn imbalance_antisymmetric(h in arr(), c in arr()) {
                let a = MonthlyLoadProfile::new(h, c, [0.0; 12], [0.0; 12], 1).unwrap();
                let b = MonthlyLoadProfile::new(c, h, [0.0; 12], [0.0; 12], 1).unwrap();
                prop_assert!((a.imbalance_kwh() + b.imbalance_kwh()).abs() < 1e-6);
            }

            #[test]
            fn net_load_is_cooling_minus_heating(h in arr(), c in arr()) {
                let p = MonthlyLoadProfile::new(h, c, [0.0; 12], [0.0; 12], 1).unwrap();
                for i in 0..12 {
                    let expect = (c[i] - h[i]) / 730.0;
                    prop_assert!((p.net_avg_kw(i) - expect).abs() < 1e-9);
                }
            }
        }
    }
}
