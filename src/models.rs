//! Data model for the air-quality pipeline.
//!
//! Everything here is transient: each request computes fresh values and
//! nothing is mutated after creation. Field names and units (μg/m³ for
//! pollutants, km/h for wind, °C for temperature, percentages for sources)
//! are part of the dashboard wire contract and must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---

/// Raw pollutant concentrations for a location, in μg/m³.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutantReading {
    // ---
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub timestamp: DateTime<Utc>,
}

/// Weather conditions used by the attribution and forecast models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    // ---
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Relative humidity in percent (0–100).
    pub humidity: f64,
    /// Temperature in °C.
    pub temperature: f64,
    /// Atmospheric pressure in hPa.
    pub pressure: f64,
}

/// Geographic coordinates echoed back in the payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

// ---

/// Pollution source categories, closed so an unmatched name cannot fall
/// through silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Traffic,
    Industry,
    OpenBurning,
    Other,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceKind::Traffic => "Traffic",
            SourceKind::Industry => "Industry",
            SourceKind::OpenBurning => "Open Burning",
            SourceKind::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Percentage attribution of current pollution to each source category.
///
/// After normalization the four values sum to ~100; rounding to one decimal
/// place may move the total by up to ±0.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMix {
    // ---
    pub traffic: f64,
    pub industry: f64,
    pub open_burning: f64,
    pub other: f64,
}

impl SourceMix {
    /// Sum of all four components, in percent.
    pub fn total(&self) -> f64 {
        // ---
        self.traffic + self.industry + self.open_burning + self.other
    }

    /// The leading source category and its percentage.
    pub fn dominant(&self) -> (SourceKind, f64) {
        // ---
        let pairs = [
            (SourceKind::Traffic, self.traffic),
            (SourceKind::Industry, self.industry),
            (SourceKind::OpenBurning, self.open_burning),
            (SourceKind::Other, self.other),
        ];
        pairs
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or((SourceKind::Other, 0.0))
    }

    /// Human-readable one-liner about the dominant source.
    pub fn summary(&self) -> String {
        // ---
        let (kind, pct) = self.dominant();
        format!("{} contributes {}% to current pollution levels", kind, pct)
    }
}

// ---

/// One hour of the AQI trend forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    // ---
    pub time: DateTime<Utc>,
    /// Rounded AQI, clamped to 0–500.
    pub aqi: u16,
    pub hours_ahead: u32,
}

// ---

/// Whether an alert describes observed or forecast conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Current,
    Prediction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Moderate,
    High,
}

/// A health alert derived from current or forecast AQI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    // ---
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Forecast AQI for prediction alerts; absent for current-condition alerts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi: Option<u16>,
}

// ---

/// Closed set of recommended actions the dashboard knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Carpool,
    PublicTransport,
    ReduceActivity,
    HealthMask,
    IndoorAir,
    AvoidExercise,
    VulnerableStayHome,
    AlertAuthorities,
    ReportIndustry,
    StopBurning,
    GeneralPrecautions,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feasibility {
    Immediate,
    High,
    Medium,
}

/// An actionable recommendation with an impact estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    // ---
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub feasibility: Feasibility,
    pub time_to_impact: String,
    pub icon: String,
}

// ---

/// Current conditions block of the composite payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    // ---
    pub aqi: f64,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub timestamp: DateTime<Utc>,
    pub location: GeoPoint,
}

/// The composite payload served to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionsPayload {
    // ---
    pub current: CurrentConditions,
    pub weather: WeatherSnapshot,
    pub traffic_density: f64,
    pub sources: SourceMix,
    pub predictions: Vec<ForecastPoint>,
    pub actions: Vec<Action>,
    pub alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_alert_wire_names() {
        // ---
        let alert = Alert {
            kind: AlertKind::Prediction,
            severity: Severity::High,
            message: "High AQI (210) expected at 18:00".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 24, 18, 0, 0).unwrap(),
            aqi: Some(210),
        };

        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "prediction");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["aqi"], 210);
    }

    #[test]
    fn test_current_alert_omits_aqi() {
        // ---
        let alert = Alert {
            kind: AlertKind::Current,
            severity: Severity::Moderate,
            message: "Current AQI is 160 - Unhealthy conditions detected".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 24, 12, 0, 0).unwrap(),
            aqi: None,
        };

        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "current");
        assert!(json.get("aqi").is_none());
    }

    #[test]
    fn test_action_kind_wire_names() {
        // ---
        let json = serde_json::to_value(ActionKind::VulnerableStayHome).unwrap();
        assert_eq!(json, "vulnerable_stay_home");

        let json = serde_json::to_value(ActionKind::PublicTransport).unwrap();
        assert_eq!(json, "public_transport");
    }

    #[test]
    fn test_source_mix_dominant() {
        // ---
        let mix = SourceMix {
            traffic: 44.9,
            industry: 31.5,
            open_burning: 23.6,
            other: 0.0,
        };

        let (kind, pct) = mix.dominant();
        assert_eq!(kind, SourceKind::Traffic);
        assert_eq!(pct, 44.9);
        assert_eq!(
            mix.summary(),
            "Traffic contributes 44.9% to current pollution levels"
        );
    }

    #[test]
    fn test_source_mix_serializes_snake_case_fields() {
        // ---
        let mix = SourceMix {
            traffic: 40.0,
            industry: 20.0,
            open_burning: 20.0,
            other: 20.0,
        };

        let json = serde_json::to_value(&mix).unwrap();
        assert_eq!(json["open_burning"], 20.0);
        assert!((mix.total() - 100.0).abs() < 1e-9);
    }
}
