//! Unit tests for umb-model.

use umb_core::{BuildingId, KindId};

use crate::{ModelError, SimInput, TransitionModel, TransitionWeights};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two kinds, two periods, three buildings; every row has some weight.
fn small_weights() -> TransitionWeights {
    let mut w = TransitionWeights::zeros(2, 2, 3);
    for k in 0..2 {
        for p in 0..2 {
            for s in 0..3 {
                for d in 0..3 {
                    w.set(k, p, s, d, (1 + k + p + s + d) as f64).unwrap();
                }
            }
        }
    }
    w
}

fn small_input() -> SimInput {
    let mut input = SimInput::new(2, 3, 2);
    input.carry_rates = vec![0.5, 0.25];
    input.weights = small_weights();
    input.population = vec![vec![10, 4], vec![0, 0], vec![3, 7]];
    input
}

// ── TransitionModel ───────────────────────────────────────────────────────────

#[cfg(test)]
mod transition {
    use super::*;

    #[test]
    fn rows_are_non_decreasing_and_end_at_one() {
        let model = TransitionModel::build(&small_weights()).unwrap();
        for k in 0..2u16 {
            for p in 0..2 {
                for s in 0..3u32 {
                    let row = model.row(KindId(k), p, BuildingId(s));
                    assert_eq!(row.len(), 3);
                    assert!(row.windows(2).all(|w| w[0] <= w[1]), "row {row:?}");
                    assert_eq!(row[2], 1.0);
                    assert!(row.iter().all(|&c| (0.0..=1.0).contains(&c)));
                }
            }
        }
    }

    #[test]
    fn normalizes_by_row_sum() {
        let mut w = TransitionWeights::zeros(1, 1, 3);
        w.set(0, 0, 0, 0, 1.0).unwrap();
        w.set(0, 0, 0, 1, 1.0).unwrap();
        w.set(0, 0, 0, 2, 2.0).unwrap();
        w.set(0, 0, 1, 1, 5.0).unwrap();
        w.set(0, 0, 2, 2, 5.0).unwrap();
        let model = TransitionModel::build(&w).unwrap();
        assert_eq!(model.row(KindId(0), 0, BuildingId(0)), &[0.25, 0.5, 1.0]);
        assert_eq!(model.row(KindId(0), 0, BuildingId(1)), &[0.0, 1.0, 1.0]);
    }

    #[test]
    fn last_entry_exact_despite_rounding() {
        // Thirds do not sum to exactly 1.0 in binary floating point.
        let mut w = TransitionWeights::zeros(1, 1, 3);
        w.set_row_all_periods(0, 0, &[1.0, 1.0, 1.0]).unwrap();
        w.set_row_all_periods(0, 1, &[0.1, 0.7, 0.2]).unwrap();
        w.set_row_all_periods(0, 2, &[0.3, 0.3, 0.3]).unwrap();
        let model = TransitionModel::build(&w).unwrap();
        for s in 0..3 {
            assert_eq!(model.row(KindId(0), 0, BuildingId(s)).last().copied(), Some(1.0));
        }
    }

    #[test]
    fn zero_row_is_degenerate() {
        let mut w = TransitionWeights::zeros(1, 2, 2);
        w.set_row_all_periods(0, 0, &[1.0, 0.0]).unwrap();
        w.set(0, 0, 1, 1, 1.0).unwrap(); // period 1, source 1 left empty
        match TransitionModel::build(&w) {
            Err(ModelError::DegenerateDistribution { kind, period, building }) => {
                assert_eq!(kind, KindId(0));
                assert_eq!(period, 1);
                assert_eq!(building, BuildingId(1));
            }
            other => panic!("expected DegenerateDistribution, got {other:?}"),
        }
    }

    #[test]
    fn sample_picks_first_entry_not_below_u() {
        let mut w = TransitionWeights::zeros(1, 1, 4);
        w.set_row_all_periods(0, 0, &[1.0, 0.0, 1.0, 2.0]).unwrap();
        for s in 1..4 {
            w.set(0, 0, s, s, 1.0).unwrap();
        }
        let model = TransitionModel::build(&w).unwrap();
        // cdf = [0.25, 0.25, 0.5, 1.0]
        let pick = |u| model.sample(KindId(0), 0, BuildingId(0), u);
        assert_eq!(pick(0.0), BuildingId(0));
        assert_eq!(pick(0.25), BuildingId(0));
        assert_eq!(pick(0.26), BuildingId(2));
        assert_eq!(pick(0.5), BuildingId(2));
        assert_eq!(pick(0.75), BuildingId(3));
        assert_eq!(pick(0.999_999), BuildingId(3));
    }

    #[test]
    fn set_rejects_negative_and_nan() {
        let mut w = TransitionWeights::zeros(1, 1, 2);
        assert!(matches!(w.set(0, 0, 0, 0, -1.0), Err(ModelError::Config(_))));
        assert!(matches!(w.set(0, 0, 0, 0, f64::NAN), Err(ModelError::Config(_))));
        assert!(matches!(w.set(0, 0, 0, 2, 1.0), Err(ModelError::Config(_))));
    }

    #[test]
    fn from_nested_matches_set() {
        let nested = vec![vec![vec![vec![0.0, 1.0], vec![1.0, 0.0]]]];
        let w = TransitionWeights::from_nested(&nested).unwrap();
        assert_eq!(w.shape(), (1, 1, 2));
        assert_eq!(w.get(0, 0, 0, 1), 1.0);
        assert_eq!(w.get(0, 0, 1, 0), 1.0);
        assert_eq!(w.get(0, 0, 0, 0), 0.0);
    }

    #[test]
    fn from_nested_rejects_ragged() {
        let nested = vec![vec![vec![vec![0.0, 1.0], vec![1.0]]]];
        assert!(matches!(TransitionWeights::from_nested(&nested), Err(ModelError::Config(_))));
    }

    #[test]
    fn empty_shape_is_config_error() {
        let w = TransitionWeights::zeros(0, 1, 1);
        assert!(matches!(TransitionModel::build(&w), Err(ModelError::Config(_))));
    }
}

// ── SimInput ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod input {
    use super::*;

    #[test]
    fn valid_input_passes() {
        small_input().validate().unwrap();
        assert_eq!(small_input().total_population(), 24);
    }

    #[test]
    fn zero_dimensions_rejected() {
        for (k, b, r) in [(0, 1, 1), (1, 0, 1), (1, 1, 0)] {
            let input = SimInput::new(k, b, r);
            assert!(
                matches!(input.validate(), Err(ModelError::Config(_))),
                "({k}, {b}, {r}) should be rejected"
            );
        }
    }

    #[test]
    fn too_many_kinds_is_capacity_error() {
        let mut input = SimInput::new(1, 1, 1);
        input.kind_count = KindId::CAPACITY + 1;
        assert!(matches!(
            input.validate(),
            Err(ModelError::CapacityExceeded { what: "kind", .. })
        ));
    }

    #[test]
    fn building_head_count_overflow_is_capacity_error() {
        let mut input = small_input();
        input.population[0] = vec![u64::MAX, 1];
        assert!(matches!(
            input.validate(),
            Err(ModelError::CapacityExceeded { what: "building resident", .. })
        ));
        assert_eq!(input.total_population(), u64::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn total_head_count_overflow_is_capacity_error() {
        let mut input = small_input();
        let half = u64::MAX / 2 + 1;
        input.population = vec![vec![half, 0], vec![0, 0], vec![0, half]];
        let err = input.validate().unwrap_err();
        match err {
            ModelError::CapacityExceeded { what, got, max } => {
                assert_eq!(what, "population");
                assert_eq!(got, u128::from(u64::MAX) + 1);
                assert_eq!(max, u128::from(u64::MAX));
            }
            other => panic!("expected capacity error, got {other:?}"),
        }
    }

    #[test]
    fn carry_rate_out_of_range_rejected() {
        let mut input = small_input();
        input.carry_rates[1] = 1.5;
        assert!(matches!(input.validate(), Err(ModelError::Config(_))));
    }

    #[test]
    fn carry_rate_count_mismatch_rejected() {
        let mut input = small_input();
        input.carry_rates.pop();
        assert!(matches!(input.validate(), Err(ModelError::Config(_))));
    }

    #[test]
    fn weight_shape_mismatch_rejected() {
        let mut input = small_input();
        input.weights = TransitionWeights::zeros(2, 1, 3);
        assert!(matches!(input.validate(), Err(ModelError::Config(_))));
    }

    #[test]
    fn population_shape_mismatch_rejected() {
        let mut input = small_input();
        input.population[2] = vec![1];
        assert!(matches!(input.validate(), Err(ModelError::Config(_))));
        input.population.pop();
        assert!(matches!(input.validate(), Err(ModelError::Config(_))));
    }

    #[test]
    fn build_model_reports_degenerate_rows() {
        let mut input = SimInput::new(1, 2, 1);
        input.carry_rates = vec![0.0];
        assert!(matches!(
            input.build_model(),
            Err(ModelError::DegenerateDistribution { .. })
        ));
    }
}

// ── Population ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod population {
    use super::*;
    use crate::{Population, seed_umbrellas};

    #[test]
    fn materializes_counts_per_building_and_kind() {
        let pop = Population::initialize(&small_input()).unwrap();
        assert_eq!(pop.total, 24);
        assert_eq!(pop.buildings.len(), 3);
        assert_eq!(pop.buildings[0].count_kind(KindId(0)), 10);
        assert_eq!(pop.buildings[0].count_kind(KindId(1)), 4);
        assert_eq!(pop.buildings[1].population(), 0);
        assert_eq!(pop.buildings[2].count_kind(KindId(1)), 7);
    }

    #[test]
    fn nobody_starts_with_an_umbrella() {
        let pop = Population::initialize(&small_input()).unwrap();
        assert!(pop.buildings.iter().all(|b| b.carrying_count() == 0));
    }

    #[test]
    fn umbrellas_seeded_by_floor_of_expected_value() {
        let pop = Population::initialize(&small_input()).unwrap();
        // b0: floor(10 * 0.5) + floor(4 * 0.25) = 5 + 1
        assert_eq!(pop.buildings[0].umbrella_count, 6);
        assert_eq!(pop.buildings[1].umbrella_count, 0);
        // b2: floor(3 * 0.5) + floor(7 * 0.25) = 1 + 1
        assert_eq!(pop.buildings[2].umbrella_count, 2);
    }

    #[test]
    fn seed_umbrellas_full_rate() {
        assert_eq!(seed_umbrellas(&[7, 3], &[1.0, 0.0]), 7);
    }

    #[test]
    fn invalid_input_not_initialized() {
        let mut input = small_input();
        input.building_count = 0;
        assert!(Population::initialize(&input).is_err());
    }
}

// ── CSV loaders ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use umb_core::{Tick, Weather, WeatherOracle};

    use super::*;
    use crate::{load_kinds_reader, load_population_reader, load_weather_reader, load_weights_reader};

    #[test]
    fn kinds_loaded_in_kind_order() {
        let csv = "kind,carry_rate\n1,0.8\n0,0.35\n";
        assert_eq!(load_kinds_reader(Cursor::new(csv)).unwrap(), vec![0.35, 0.8]);
    }

    #[test]
    fn kinds_with_gap_rejected() {
        let csv = "kind,carry_rate\n0,0.1\n2,0.2\n";
        assert!(matches!(load_kinds_reader(Cursor::new(csv)), Err(ModelError::Parse(_))));
    }

    #[test]
    fn weights_sparse_and_accumulating() {
        let csv = "kind,period,source,destination,weight\n\
                   0,0,0,1,2\n\
                   0,0,0,1,1.5\n\
                   0,1,1,0,4\n";
        let w = load_weights_reader(Cursor::new(csv), 1, 2, 2).unwrap();
        assert_eq!(w.get(0, 0, 0, 1), 3.5);
        assert_eq!(w.get(0, 1, 1, 0), 4.0);
        assert_eq!(w.get(0, 0, 0, 0), 0.0);
    }

    #[test]
    fn weights_out_of_shape_rejected() {
        let csv = "kind,period,source,destination,weight\n0,0,0,5,1\n";
        assert!(matches!(
            load_weights_reader(Cursor::new(csv), 1, 1, 2),
            Err(ModelError::Parse(_))
        ));
    }

    #[test]
    fn negative_weight_rejected() {
        let csv = "kind,period,source,destination,weight\n0,0,0,1,-3\n";
        assert!(matches!(
            load_weights_reader(Cursor::new(csv), 1, 1, 2),
            Err(ModelError::Config(_))
        ));
    }

    #[test]
    fn population_dense_from_sparse() {
        let csv = "building,kind,count\n0,1,5\n2,0,3\n";
        let pop = load_population_reader(Cursor::new(csv), 3, 2).unwrap();
        assert_eq!(pop, vec![vec![0, 5], vec![0, 0], vec![3, 0]]);
    }

    #[test]
    fn population_cell_overflow_rejected() {
        let csv = format!("building,kind,count\n0,0,{}\n0,0,2\n", u64::MAX - 1);
        assert!(matches!(
            load_population_reader(Cursor::new(csv), 1, 1),
            Err(ModelError::CapacityExceeded { what: "population cell", .. })
        ));
    }

    #[test]
    fn population_bad_cell_rejected() {
        let csv = "building,kind,count\n3,0,5\n";
        assert!(load_population_reader(Cursor::new(csv), 3, 2).is_err());
    }

    #[test]
    fn weather_schedule_loaded() {
        let csv = "tick,weather\n2,rain\n1,cloudy\n3, Rain\n";
        let schedule = load_weather_reader(Cursor::new(csv)).unwrap();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.weather(3, Tick(1)).unwrap(), Weather::Cloudy);
        assert_eq!(schedule.weather(3, Tick(2)).unwrap(), Weather::Rain);
        assert_eq!(schedule.weather(3, Tick(3)).unwrap(), Weather::Rain);
    }

    #[test]
    fn weather_unknown_condition_rejected() {
        let csv = "tick,weather\n1,hail\n";
        assert!(matches!(
            load_weather_reader(Cursor::new(csv)),
            Err(ModelError::Core(_))
        ));
    }
}
