//! Data-source collaborator: live upstream readings with synthetic fallback.
//!
//! Fetches pollutant measurements (OpenAQ-compatible) and weather
//! (OpenWeatherMap-compatible) for a coordinate pair. Any upstream failure
//! is caught here, logged, and replaced with synthetic values of the same
//! shape so the core pipeline never observes an error. Traffic density is
//! estimated from the hour of day; a real deployment would swap in a
//! traffic API behind the same function.

use anyhow::{anyhow, Result};
use chrono::{Timelike, Utc};
use rand::Rng;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{Config, PollutantReading, WeatherSnapshot};

// ---

/// Everything the pipeline needs about a location's current conditions.
#[derive(Debug, Clone)]
pub struct Conditions {
    pub pollutants: PollutantReading,
    pub weather: WeatherSnapshot,
    pub traffic_density: f64,
}

/// Gather current conditions for a coordinate pair. Infallible: every
/// upstream failure degrades to synthetic data.
pub async fn current_conditions(client: &Client, cfg: &Config, lat: f64, lon: f64) -> Conditions {
    // ---
    // ThreadRng is not Send, so it must not be held across the awaits below;
    // re-acquire the thread-local handle at each use site instead.
    let pollutants = match fetch_pollutants(client, cfg, lat, lon).await {
        Ok(reading) => reading,
        Err(e) => {
            warn!("Pollutant fetch failed for ({}, {}): {}", lat, lon, e);
            synthetic_pollutants(&mut rand::thread_rng())
        }
    };

    let weather = match &cfg.weather_api_key {
        Some(key) => match fetch_weather(client, cfg, key, lat, lon).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Weather fetch failed for ({}, {}): {}", lat, lon, e);
                synthetic_weather(&mut rand::thread_rng())
            }
        },
        None => synthetic_weather(&mut rand::thread_rng()),
    };

    let traffic_density = estimate_traffic_density(Utc::now().hour(), &mut rand::thread_rng());

    Conditions {
        pollutants,
        weather,
        traffic_density,
    }
}

// ---

/// Fetch the latest PM2.5/PM10/NO2 measurements from the nearest monitoring
/// location within 10 km.
async fn fetch_pollutants(
    client: &Client,
    cfg: &Config,
    lat: f64,
    lon: f64,
) -> Result<PollutantReading> {
    // ---
    let locations_url = format!("{}/locations", cfg.air_api_url);
    let response: serde_json::Value = client
        .get(&locations_url)
        .query(&[
            ("coordinates", format!("{},{}", lat, lon)),
            ("radius", "10000".to_string()),
            ("limit", "1".to_string()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let location_id = response
        .get("results")
        .and_then(|r| r.as_array())
        .and_then(|r| r.first())
        .and_then(|loc| loc.get("id"))
        .and_then(|id| id.as_i64())
        .ok_or_else(|| anyhow!("no monitoring location near ({}, {})", lat, lon))?;

    debug!("Nearest monitoring location: {}", location_id);

    let latest_url = format!("{}/locations/{}/latest", cfg.air_api_url, location_id);
    let latest: serde_json::Value = client
        .get(&latest_url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let mut pm25 = 0.0;
    let mut pm10 = 0.0;
    let mut no2 = 0.0;

    if let Some(measurements) = latest.get("results").and_then(|r| r.as_array()) {
        for meas in measurements {
            let parameter = meas
                .get("parameter")
                .and_then(|p| p.as_str())
                .unwrap_or("")
                .to_lowercase();
            let value = meas.get("value").and_then(|v| v.as_f64()).unwrap_or(0.0);

            match parameter.as_str() {
                "pm25" => pm25 = value,
                "pm10" => pm10 = value,
                "no2" => no2 = value,
                _ => {}
            }
        }
    }

    Ok(PollutantReading {
        pm25,
        pm10,
        no2,
        timestamp: Utc::now(),
    })
}

/// Fetch current weather and convert to the units the core expects.
async fn fetch_weather(
    client: &Client,
    cfg: &Config,
    api_key: &str,
    lat: f64,
    lon: f64,
) -> Result<WeatherSnapshot> {
    // ---
    let url = format!("{}/weather", cfg.weather_api_url);
    let response: serde_json::Value = client
        .get(&url)
        .query(&[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", api_key.to_string()),
            ("units", "metric".to_string()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let wind = response.get("wind").cloned().unwrap_or_default();
    let main = response.get("main").cloned().unwrap_or_default();

    Ok(WeatherSnapshot {
        // Upstream reports m/s; the models work in km/h
        wind_speed: wind.get("speed").and_then(|v| v.as_f64()).unwrap_or(0.0) * 3.6,
        humidity: main.get("humidity").and_then(|v| v.as_f64()).unwrap_or(50.0),
        temperature: main.get("temp").and_then(|v| v.as_f64()).unwrap_or(25.0),
        pressure: main.get("pressure").and_then(|v| v.as_f64()).unwrap_or(1013.0),
    })
}

// ---

/// Synthetic pollutant reading centered on a moderately polluted city day.
fn synthetic_pollutants<R: Rng>(rng: &mut R) -> PollutantReading {
    // ---
    PollutantReading {
        pm25: f64::from(45 + rng.gen_range(-10..20)),
        pm10: f64::from(80 + rng.gen_range(-15..30)),
        no2: f64::from(30 + rng.gen_range(-10..15)),
        timestamp: Utc::now(),
    }
}

/// Synthetic weather snapshot with a light breeze and mild conditions.
fn synthetic_weather<R: Rng>(rng: &mut R) -> WeatherSnapshot {
    // ---
    WeatherSnapshot {
        wind_speed: f64::from(5 + rng.gen_range(-3..8)),
        humidity: f64::from(60 + rng.gen_range(-20..20)),
        temperature: f64::from(25 + rng.gen_range(-5..10)),
        pressure: 1013.0,
    }
}

/// Estimate traffic density in [0, 1] from the hour of day.
///
/// Peaks at 0.8 during rush hours (7–9 and 17–19), 0.5 through the working
/// day, 0.3 otherwise, with ±0.1 jitter.
pub fn estimate_traffic_density<R: Rng>(hour: u32, rng: &mut R) -> f64 {
    // ---
    let base_density = if (7..=9).contains(&hour) || (17..=19).contains(&hour) {
        0.8
    } else if (10..=16).contains(&hour) {
        0.5
    } else {
        0.3
    };

    let density: f64 = base_density + rng.gen_range(-0.1..=0.1);
    density.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_traffic_density_buckets() {
        // ---
        let mut rng = StdRng::seed_from_u64(11);

        for hour in 0..24u32 {
            let base = if (7..=9).contains(&hour) || (17..=19).contains(&hour) {
                0.8
            } else if (10..=16).contains(&hour) {
                0.5
            } else {
                0.3
            };

            for _ in 0..20 {
                let density = estimate_traffic_density(hour, &mut rng);
                assert!(
                    (base - 0.1..=base + 0.1).contains(&density),
                    "hour {} gave density {}",
                    hour,
                    density
                );
                assert!((0.0..=1.0).contains(&density));
            }
        }
    }

    #[test]
    fn test_synthetic_pollutants_stay_in_range() {
        // ---
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let reading = synthetic_pollutants(&mut rng);
            assert!((35.0..65.0).contains(&reading.pm25));
            assert!((65.0..110.0).contains(&reading.pm10));
            assert!((20.0..45.0).contains(&reading.no2));
        }
    }

    #[test]
    fn test_synthetic_weather_stays_in_range() {
        // ---
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let weather = synthetic_weather(&mut rng);
            assert!((2.0..13.0).contains(&weather.wind_speed));
            assert!((40.0..80.0).contains(&weather.humidity));
            assert!((20.0..35.0).contains(&weather.temperature));
            assert_eq!(weather.pressure, 1013.0);
        }
    }
}
