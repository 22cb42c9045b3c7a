//! Composite air-quality endpoint: estimation, attribution, forecast, and
//! alerts for a coordinate pair, in one payload.

use axum::{
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, routing::get, Json,
    Router,
};
use chrono::{Timelike, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::core::{self, ForecastInputs, UniformNoise};
use crate::{fetch, Config, ConditionsPayload, CurrentConditions, GeoPoint};

// ---

pub fn router() -> Router<(Client, Config)> {
    // ---
    Router::new().route("/api/aqi/current", get(handler))
}

/// Query parameters for the conditions endpoint.
#[derive(Debug, Deserialize)]
struct ConditionsQuery {
    lat: Option<f64>,
    lon: Option<f64>,
}

async fn handler(
    Query(params): Query<ConditionsQuery>,
    State((client, config)): State<(Client, Config)>,
) -> impl IntoResponse {
    // ---
    info!("GET /api/aqi/current - Starting pipeline");

    let (Some(lat), Some(lon)) = (params.lat, params.lon) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Latitude and longitude required" })),
        )
            .into_response();
    };

    // Step 1: Gather conditions (live or synthetic, never fails)
    debug!("GET /api/aqi/current - Step 1: fetch conditions");

    let conditions = fetch::current_conditions(&client, &config, lat, lon).await;
    let now = Utc::now();

    // Step 2: Standardized index from raw concentrations
    debug!("GET /api/aqi/current - Step 2: index conversion");

    let aqi =
        core::aqi_from_concentrations(conditions.pollutants.pm25, conditions.pollutants.pm10);

    // Step 3: Source attribution
    debug!("GET /api/aqi/current - Step 3: source attribution");

    let sources = core::attribute_sources(
        aqi,
        conditions.weather.wind_speed,
        conditions.traffic_density,
        now.hour(),
    );

    // Step 4: Trend forecast with a request-local noise source
    debug!("GET /api/aqi/current - Step 4: trend forecast");

    let inputs = ForecastInputs {
        wind_speed: conditions.weather.wind_speed,
        humidity: conditions.weather.humidity,
        traffic_density: conditions.traffic_density,
    };
    let mut noise = UniformNoise(StdRng::from_entropy());
    let predictions = core::forecast(aqi, &inputs, now, config.forecast_horizon_hours, &mut noise);

    // Step 5: Alerts from current and forecast values
    debug!("GET /api/aqi/current - Step 5: alerts");

    let alerts = core::derive_alerts(aqi, &predictions, now);

    // Step 6: Actionable recommendations
    debug!("GET /api/aqi/current - Step 6: actions");

    let actions = core::generate_actions(aqi, &sources, &conditions.weather);

    info!(
        "Pipeline complete: aqi={:.0}, {} ({} predictions, {} alerts)",
        aqi,
        sources.summary(),
        predictions.len(),
        alerts.len()
    );

    let payload = ConditionsPayload {
        current: CurrentConditions {
            aqi,
            pm25: conditions.pollutants.pm25,
            pm10: conditions.pollutants.pm10,
            no2: conditions.pollutants.no2,
            timestamp: conditions.pollutants.timestamp,
            location: GeoPoint { lat, lon },
        },
        weather: conditions.weather,
        traffic_density: conditions.traffic_density,
        sources,
        predictions,
        actions,
        alerts,
    };

    (StatusCode::OK, Json(payload)).into_response()
}
