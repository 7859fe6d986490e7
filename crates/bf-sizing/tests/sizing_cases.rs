//! End-to-end sizing on the four validation load profiles: first/last year,
//! cooling/heating limited.

mod common;

use bf_gfunction::{FieldKey, GFunctionStore, GFunctionTable};
use bf_sim::BindingLoad;
use bf_sizing::{
    Borefield, Quadrant, QuadrantChoice, SizingError, SizingOptions, SizingResult, Strategy,
};

fn prepared_field(case: u8) -> Borefield {
    let mut field = Borefield::new(
        common::ground(),
        common::validation_case(case),
        common::bounds(),
    );
    field.prepare(&common::store(), None).unwrap();
    field
}

fn size_case(
    case: u8,
    strategy: Strategy,
    quadrant: QuadrantChoice,
) -> Result<SizingResult, SizingError> {
    let mut opts = SizingOptions::default();
    opts.strategy = strategy;
    opts.quadrant = quadrant;
    prepared_field(case).size(&opts)
}

#[test]
fn l2_and_l3_agree_on_every_case() {
    for case in 1..=4 {
        let l2 = size_case(case, Strategy::L2, QuadrantChoice::Auto).unwrap();
        let l3 = size_case(case, Strategy::L3, QuadrantChoice::Auto).unwrap();
        let rel = (l2.depth_m - l3.depth_m).abs() / l3.depth_m;
        assert!(
            rel <= 0.05,
            "case {case}: L2 {:.2} m vs L3 {:.2} m ({:.1} % apart)",
            l2.depth_m,
            l3.depth_m,
            rel * 100.0
        );
    }
}

#[test]
fn auto_search_matches_max_over_pinned_quadrants() {
    for strategy in [Strategy::L2, Strategy::L3] {
        for case in 1..=4 {
            let auto = size_case(case, strategy, QuadrantChoice::Auto).unwrap();
            let mut best: Option<(f64, Quadrant)> = None;
            for q in Quadrant::ALL {
                if let Ok(r) = size_case(case, strategy, QuadrantChoice::Pinned(q)) {
                    if best.map_or(true, |(d, _)| r.depth_m > d) {
                        best = Some((r.depth_m, q));
                    }
                }
            }
            let (depth, quadrant) = best.expect("at least one quadrant must size");
            assert!((auto.depth_m - depth).abs() < 1e-9, "case {case}");
            assert_eq!(auto.quadrant, quadrant, "case {case}");
        }
    }
}

#[test]
fn binding_side_follows_the_dominant_load() {
    // Case 1: 150 kW cooling peaks against no declared heating peaks.
    let r = size_case(1, Strategy::L2, QuadrantChoice::Auto).unwrap();
    assert_eq!(r.quadrant.binding_load(), BindingLoad::Cooling);
    // Case 3: 300 kW heating peaks against floored cooling peaks.
    let r = size_case(3, Strategy::L2, QuadrantChoice::Auto).unwrap();
    assert_eq!(r.quadrant.binding_load(), BindingLoad::Heating);
}

#[test]
fn pinned_winner_reproduces_auto_depth() {
    let auto = size_case(2, Strategy::L3, QuadrantChoice::Auto).unwrap();
    let pinned = size_case(2, Strategy::L3, QuadrantChoice::Pinned(auto.quadrant)).unwrap();
    assert!((auto.depth_m - pinned.depth_m).abs() < 1e-12);
}

#[test]
fn sizing_is_idempotent() {
    let mut field = prepared_field(4);
    let opts = SizingOptions::default();
    let first = field.size(&opts).unwrap();
    let second = field.size(&opts).unwrap();
    assert!((first.depth_m - second.depth_m).abs() < 1e-12);
    assert_eq!(first.quadrant, second.quadrant);
}

#[test]
fn constant_resistance_is_reported_in_the_result() {
    let r = size_case(1, Strategy::L2, QuadrantChoice::Auto).unwrap();
    assert!((r.resistance_m_k_w - 0.2).abs() < 1e-12);
    assert!((r.imbalance_kwh_per_year - (150_000.0 - 300_000.0)).abs() < 1e-6);
}

#[test]
fn all_quadrants_failing_reports_non_convergence() {
    // Cooling-only loads against a maximum bound below the undisturbed
    // ground temperature: the injection quadrants have no headroom and the
    // extraction quadrants have nothing to bind on, so the whole search
    // comes up empty. That is a search failure, not a quadrant-local one.
    let mut cooling = [0.0; 12];
    let mut peak_c = [0.0; 12];
    for m in 0..12 {
        cooling[m] = 14_600.0;
        peak_c[m] = 40.0;
    }
    let profile =
        bf_core::MonthlyLoadProfile::new([0.0; 12], cooling, [0.0; 12], peak_c, 20).unwrap();
    let bounds = bf_core::TemperatureBounds::new(0.0, 5.0).unwrap();

    for strategy in [Strategy::L2, Strategy::L3] {
        let mut field = Borefield::new(common::ground(), profile.clone(), bounds);
        field.prepare(&common::store(), None).unwrap();
        let mut opts = SizingOptions::default();
        opts.strategy = strategy;
        let err = field.size(&opts).unwrap_err();
        assert!(
            matches!(err, SizingError::DidNotConverge { .. }),
            "{strategy:?}: {err}"
        );
    }
}

#[test]
fn zero_load_profile_is_rejected() {
    let empty =
        bf_core::MonthlyLoadProfile::new([0.0; 12], [0.0; 12], [0.0; 12], [0.0; 12], 20).unwrap();
    let mut field = Borefield::new(common::ground(), empty, common::bounds());
    field.prepare(&common::store(), None).unwrap();
    let err = field.size(&SizingOptions::default()).unwrap_err();
    assert!(matches!(err, SizingError::Configuration { .. }));
}

/// Reference depths from Peere et al. (2021), produced with the published
/// precomputed dataset. Needs that dataset as a serialized table; point
/// BOREFIELD_GFUNCTION_DATA at the JSON file to run.
#[test]
#[ignore = "requires the published precomputed g-function dataset"]
fn published_reference_depths() {
    let path = std::env::var("BOREFIELD_GFUNCTION_DATA")
        .expect("set BOREFIELD_GFUNCTION_DATA to the dataset path");
    let raw = std::fs::read_to_string(path).unwrap();
    let table: GFunctionTable = serde_json::from_str(&raw).unwrap();

    let ground = common::ground();
    let mut store = GFunctionStore::new();
    store.add_precomputed(FieldKey::for_ground(&ground), table);

    let expected_l2 = [56.64, 118.7, 66.88, 92.67];
    let expected_l3 = [56.77, 119.23, 66.48, 91.63];
    for case in 1..=4u8 {
        let mut field = Borefield::new(
            ground.clone(),
            common::validation_case(case),
            common::bounds(),
        );
        field.prepare(&store, None).unwrap();

        let mut opts = SizingOptions::default();
        opts.strategy = Strategy::L2;
        let l2 = field.size(&opts).unwrap();
        let expect = expected_l2[case as usize - 1];
        assert!((l2.depth_m - expect).abs() / expect < 0.005, "case {case} L2");

        opts.strategy = Strategy::L3;
        let l3 = field.size(&opts).unwrap();
        let expect = expected_l3[case as usize - 1];
        assert!((l3.depth_m - expect).abs() / expect < 0.005, "case {case} L3");
    }
}
