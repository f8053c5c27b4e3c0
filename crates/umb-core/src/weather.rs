//! Weather conditions and the oracle capability the tick scheduler consults.

use std::fmt;
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::rng::mix_seed;
use crate::{CoreError, CoreResult, Tick};

// ── Weather ───────────────────────────────────────────────────────────────────

/// The external condition for one tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Weather {
    #[default]
    Cloudy,
    Rain,
}

impl Weather {
    #[inline]
    pub fn is_rain(self) -> bool {
        matches!(self, Weather::Rain)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Cloudy => "cloudy",
            Weather::Rain   => "rain",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloudy" => Ok(Weather::Cloudy),
            "rain"   => Ok(Weather::Rain),
            other => Err(CoreError::Parse(format!(
                "invalid weather {other:?}: expected \"cloudy\" or \"rain\""
            ))),
        }
    }
}

// ── WeatherOracle ─────────────────────────────────────────────────────────────

/// Source of the weather for each tick.
///
/// Called exactly once per movement tick with the run length and the tick
/// being processed.  Implementations may consult external data but must not
/// depend on simulation state.
///
/// Any `Fn(u64, Tick) -> Weather + Send + Sync` closure is an oracle.
pub trait WeatherOracle: Send + Sync {
    fn weather(&self, simulation_length: u64, tick: Tick) -> CoreResult<Weather>;
}

impl<F> WeatherOracle for F
where
    F: Fn(u64, Tick) -> Weather + Send + Sync,
{
    fn weather(&self, simulation_length: u64, tick: Tick) -> CoreResult<Weather> {
        Ok(self(simulation_length, tick))
    }
}

/// The same weather every tick.
#[derive(Copy, Clone, Debug)]
pub struct ConstantWeather(pub Weather);

impl WeatherOracle for ConstantWeather {
    fn weather(&self, _simulation_length: u64, _tick: Tick) -> CoreResult<Weather> {
        Ok(self.0)
    }
}

/// An explicit list of conditions, indexed by `tick - 1`.
///
/// Ticks past the end of the list wrap around, so a one-week list can drive
/// a one-year run.
#[derive(Clone, Debug, Default)]
pub struct WeatherSchedule {
    days: Vec<Weather>,
}

impl WeatherSchedule {
    pub fn new(days: Vec<Weather>) -> Self {
        Self { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl WeatherOracle for WeatherSchedule {
    fn weather(&self, _simulation_length: u64, tick: Tick) -> CoreResult<Weather> {
        if self.days.is_empty() {
            return Err(CoreError::Weather {
                tick,
                reason: "weather schedule is empty".into(),
            });
        }
        let slot = (tick.0.saturating_sub(1) % self.days.len() as u64) as usize;
        Ok(self.days[slot])
    }
}

/// Rain with fixed probability, as a pure function of `(seed, tick)`.
///
/// Querying the same tick twice gives the same answer, so the oracle holds no
/// mutable state and is safe to share.
#[derive(Copy, Clone, Debug)]
pub struct RainProbability {
    pub probability: f64,
    pub seed:        u64,
}

impl RainProbability {
    pub fn new(probability: f64, seed: u64) -> CoreResult<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(CoreError::Config(format!(
                "rain probability must be in [0, 1], got {probability}"
            )));
        }
        Ok(Self { probability, seed })
    }
}

impl WeatherOracle for RainProbability {
    fn weather(&self, _simulation_length: u64, tick: Tick) -> CoreResult<Weather> {
        let mut rng = SmallRng::seed_from_u64(mix_seed(self.seed, tick.0));
        if rng.gen_bool(self.probability) {
            Ok(Weather::Rain)
        } else {
            Ok(Weather::Cloudy)
        }
    }
}
