//! Tests for the run configuration and the synthetic campus.

#[cfg(test)]
mod campus_tests {
    use umb_model::TransitionModel;

    use crate::campus::{CampusConfig, generate};

    #[test]
    fn default_campus_builds_a_valid_model() {
        let campus = CampusConfig::default();
        let input = generate(&campus, 1).unwrap();
        input.validate().unwrap();
        let model = TransitionModel::build(&input.weights).unwrap();
        assert_eq!(model.building_count(), 12);
        assert_eq!(model.period(), 24);
    }

    #[test]
    fn residents_start_in_dorms() {
        let campus = CampusConfig { buildings: 9, kinds: 2, residents_per_building: 11, ..Default::default() };
        let input = generate(&campus, 1).unwrap();
        assert_eq!(campus.dorm_count(), 3);
        assert_eq!(input.population[0], vec![6, 5]);
        assert!(input.population[3..].iter().all(|b| b.iter().all(|&c| c == 0)));
        assert_eq!(input.total_population(), 33);
    }

    #[test]
    fn default_carry_rates_spread() {
        let campus = CampusConfig { kinds: 3, ..Default::default() };
        let input = generate(&campus, 1).unwrap();
        assert_eq!(input.carry_rates, vec![0.2, 0.5, 0.8]);
    }

    #[test]
    fn same_seed_same_campus() {
        let campus = CampusConfig::default();
        let a = generate(&campus, 9).unwrap();
        let b = generate(&campus, 9).unwrap();
        let c = generate(&campus, 10).unwrap();
        assert_eq!(a.weights, b.weights);
        assert_ne!(a.weights, c.weights);
    }
}

#[cfg(test)]
mod config_tests {
    use std::path::Path;

    use umb_core::{Tick, Weather, WeatherOracle};

    use crate::config::{InputConfig, OutputFormat, RunConfig, RunWeather, WeatherConfig};

    fn parse(text: &str) -> RunConfig {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn minimal_file_uses_defaults() {
        let config = parse("[sim]\nsimulation_length = 10\nseed = 3\n");
        assert_eq!(config.sim.num_workers, None);
        assert!(matches!(config.input, InputConfig::Synthetic(_)));
        assert!(matches!(config.weather, WeatherConfig::Probability { probability, seed: None } if probability == 0.3));
        assert_eq!(config.output.dir, None);
        assert_eq!(config.output.building_interval, 24);
    }

    #[test]
    fn full_file_parses() {
        let config = parse(
            r#"
            [sim]
            simulation_length = 48
            seed = 7
            num_workers = 2

            [input]
            source = "csv"
            dir = "data"
            building_count = 3
            move_rule_period = 2

            [weather]
            source = "constant"
            weather = "rain"

            [output]
            dir = "out"
            format = "sqlite"
            building_interval = 6
            "#,
        );
        assert_eq!(config.sim.num_workers, Some(2));
        assert!(matches!(config.input, InputConfig::Csv { building_count: 3, move_rule_period: 2, .. }));
        assert!(matches!(config.weather, WeatherConfig::Constant { weather: Weather::Rain }));
        assert_eq!(config.output.format, OutputFormat::Sqlite);
    }

    #[test]
    fn synthetic_section_overrides_defaults() {
        let config = parse(
            "[sim]\nsimulation_length = 1\nseed = 1\n[input]\nsource = \"synthetic\"\nbuildings = 5\n",
        );
        let InputConfig::Synthetic(campus) = config.input else { panic!("expected synthetic input") };
        assert_eq!(campus.buildings, 5);
        assert_eq!(campus.kinds, 3);
    }

    #[test]
    fn unknown_field_rejected() {
        let result = toml::from_str::<RunConfig>("[sim]\nsimulation_length = 1\nseed = 1\n[outptu]\n");
        assert!(result.is_err());
    }

    #[test]
    fn csv_run_file_loads_sample_data() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("campus.toml");
        let config = RunConfig::from_file(&path).unwrap();
        let input = config.build_input().unwrap();
        assert_eq!(input.building_count, 3);
        assert_eq!(input.total_population(), 220);

        let RunWeather::Schedule(schedule) = config.build_weather().unwrap() else {
            panic!("expected schedule weather");
        };
        assert_eq!(schedule.len(), 6);
        assert_eq!(schedule.weather(48, Tick(7)).unwrap(), Weather::Cloudy);
    }

    #[test]
    fn bad_probability_rejected() {
        let config = parse(
            "[sim]\nsimulation_length = 1\nseed = 1\n[weather]\nsource = \"probability\"\nprobability = 1.5\n",
        );
        assert!(config.build_weather().is_err());
    }
}
