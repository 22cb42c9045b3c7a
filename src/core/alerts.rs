//! Threshold-based health alerting.
//!
//! Classifies the current AQI and each forecast point against the 150/200
//! thresholds. Every qualifying forecast point produces its own alert;
//! consecutive over-threshold hours are deliberately not merged so the
//! dashboard can show the full window.

use chrono::{DateTime, Utc};

use crate::{Alert, AlertKind, ForecastPoint, Severity};

// ---

/// AQI above this is alert-worthy.
const ALERT_THRESHOLD: f64 = 150.0;
/// AQI above this upgrades the alert to high severity.
const HIGH_SEVERITY_THRESHOLD: f64 = 200.0;

fn severity_for(aqi: f64) -> Severity {
    if aqi > HIGH_SEVERITY_THRESHOLD {
        Severity::High
    } else {
        Severity::Moderate
    }
}

/// Derive the alert list for current and forecast conditions.
///
/// The current-condition alert (if any) comes first, followed by one
/// prediction alert per over-threshold forecast point, in forecast order.
pub fn derive_alerts(
    current_aqi: f64,
    predictions: &[ForecastPoint],
    now: DateTime<Utc>,
) -> Vec<Alert> {
    // ---
    let mut alerts = Vec::new();

    if current_aqi > ALERT_THRESHOLD {
        alerts.push(Alert {
            kind: AlertKind::Current,
            severity: severity_for(current_aqi),
            message: format!(
                "Current AQI is {:.0} - Unhealthy conditions detected",
                current_aqi
            ),
            timestamp: now,
            aqi: None,
        });
    }

    for point in predictions {
        if f64::from(point.aqi) > ALERT_THRESHOLD {
            alerts.push(Alert {
                kind: AlertKind::Prediction,
                severity: severity_for(f64::from(point.aqi)),
                message: format!(
                    "High AQI ({}) expected at {}",
                    point.aqi,
                    point.time.format("%H:%M")
                ),
                timestamp: point.time,
                aqi: Some(point.aqi),
            });
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    fn point(hours_ahead: u32, aqi: u16) -> ForecastPoint {
        // ---
        let base = Utc.with_ymd_and_hms(2025, 3, 24, 12, 0, 0).unwrap();
        ForecastPoint {
            time: base + chrono::Duration::hours(i64::from(hours_ahead)),
            aqi,
            hours_ahead,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 24, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_moderate_current_alert() {
        // ---
        let alerts = derive_alerts(160.0, &[], now());

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Current);
        assert_eq!(alerts[0].severity, Severity::Moderate);
        assert!(alerts[0].message.contains("160"));
        assert!(alerts[0].aqi.is_none());
    }

    #[test]
    fn test_high_current_alert() {
        // ---
        let alerts = derive_alerts(210.0, &[], now());

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::High);
    }

    #[test]
    fn test_no_alert_at_or_below_threshold() {
        // ---
        assert!(derive_alerts(150.0, &[], now()).is_empty());
        assert!(derive_alerts(42.0, &[point(1, 150)], now()).is_empty());
    }

    #[test]
    fn test_prediction_alerts_filter_and_order() {
        // ---
        let alerts = derive_alerts(0.0, &[point(1, 170), point(2, 90)], now());

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Prediction);
        assert_eq!(alerts[0].severity, Severity::Moderate);
        assert_eq!(alerts[0].aqi, Some(170));
        assert_eq!(alerts[0].timestamp, point(1, 170).time);
    }

    #[test]
    fn test_current_alert_precedes_predictions() {
        // ---
        let predictions = [point(1, 180), point(2, 220), point(3, 100)];
        let alerts = derive_alerts(205.0, &predictions, now());

        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].kind, AlertKind::Current);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[1].aqi, Some(180));
        assert_eq!(alerts[1].severity, Severity::Moderate);
        assert_eq!(alerts[2].aqi, Some(220));
        assert_eq!(alerts[2].severity, Severity::High);
    }

    #[test]
    fn test_consecutive_points_are_not_merged() {
        // ---
        let predictions = [point(1, 160), point(2, 161), point(3, 162)];
        let alerts = derive_alerts(0.0, &predictions, now());

        assert_eq!(alerts.len(), 3);
        assert!(alerts[0].message.contains("13:00"));
        assert!(alerts[1].message.contains("14:00"));
        assert!(alerts[2].message.contains("15:00"));
    }
}
