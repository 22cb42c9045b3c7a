//! Short-horizon AQI trend forecasting.
//!
//! An hour-by-hour recurrence layered on a persistence baseline: each step
//! starts from the previous step's predicted value and applies additive
//! terms for wind dispersal, rush-hour traffic, the diurnal cycle, weekends,
//! humidity, and a bounded noise term, then clamps to the 0–500 AQI range.
//! The per-hour update is an explicit step function folded over the horizon,
//! and the noise source is injected by the caller so forecasts are
//! reproducible in tests and race-free under concurrent requests.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use rand::Rng;

use crate::ForecastPoint;

// ---

/// Bounded random perturbation applied once per forecast step.
pub trait NoiseSource {
    fn sample(&mut self) -> f64;
}

/// Production noise: uniform draw from [-5, 5] AQI points.
pub struct UniformNoise<R: Rng>(pub R);

impl<R: Rng> NoiseSource for UniformNoise<R> {
    fn sample(&mut self) -> f64 {
        self.0.gen_range(-5.0..=5.0)
    }
}

// ---

/// Conditions held fixed across the forecast horizon.
#[derive(Debug, Clone, Copy)]
pub struct ForecastInputs {
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Traffic density in [0, 1].
    pub traffic_density: f64,
}

/// Running state carried between forecast steps: the unrounded, clamped
/// predicted AQI from the previous step.
#[derive(Debug, Clone, Copy)]
pub struct ForecastState {
    predicted: f64,
}

impl ForecastState {
    pub fn new(current_aqi: f64) -> Self {
        ForecastState {
            predicted: current_aqi,
        }
    }
}

/// Advance the forecast by one hour.
///
/// Returns the next state and the emitted point. The point carries the
/// rounded AQI; the state carries the unrounded clamped value so rounding
/// error does not compound across the horizon.
pub fn step<N: NoiseSource>(
    state: ForecastState,
    inputs: &ForecastInputs,
    future_time: DateTime<Utc>,
    hours_ahead: u32,
    noise: &mut N,
) -> (ForecastState, ForecastPoint) {
    // ---
    let future_hour = future_time.hour();
    let future_day = future_time.weekday().num_days_from_sunday();

    // Persistence baseline
    let mut value = state.predicted;

    // Wind disperses pollutants
    value -= inputs.wind_speed * 1.5;

    // Traffic load, heavier during rush hours
    let is_rush_hour = (7..=9).contains(&future_hour) || (17..=19).contains(&future_hour);
    let traffic_effect = if is_rush_hour { 15.0 } else { 5.0 };
    value += traffic_effect * inputs.traffic_density;

    // Diurnal cycle
    value += 20.0 * (future_hour as f64 * PI / 12.0).sin();

    // Weekends run cleaner
    if future_day == 0 || future_day == 6 {
        value -= 10.0;
    }

    // High humidity traps pollutants
    if inputs.humidity > 70.0 {
        value += 5.0;
    }

    value += noise.sample();

    let value = value.clamp(0.0, 500.0);

    let point = ForecastPoint {
        time: future_time,
        aqi: value.round() as u16,
        hours_ahead,
    };

    (ForecastState { predicted: value }, point)
}

/// Project the AQI forward hour by hour.
///
/// Produces exactly `horizon_hours` points with `hours_ahead` running
/// 1, 2, ... in order. Each call is independent; the caller supplies the
/// noise source, seeded however it likes.
pub fn forecast<N: NoiseSource>(
    current_aqi: f64,
    inputs: &ForecastInputs,
    current_time: DateTime<Utc>,
    horizon_hours: u32,
    noise: &mut N,
) -> Vec<ForecastPoint> {
    // ---
    let mut state = ForecastState::new(current_aqi);
    let mut points = Vec::with_capacity(horizon_hours as usize);

    for i in 1..=horizon_hours {
        let future_time = current_time + Duration::hours(i64::from(i));
        let (next_state, point) = step(state, inputs, future_time, i, noise);
        state = next_state;
        points.push(point);
    }

    points
}
