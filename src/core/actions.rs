//! Actionable insight generation.
//!
//! Turns the current AQI, source mix, and weather into a list of
//! recommendations the dashboard renders as cards. Rules are keyed to the
//! source shares and AQI thresholds; impact estimates for the
//! traffic/burning actions are fixed fractions of the attributed share.

use crate::{Action, ActionKind, Feasibility, SourceMix, WeatherSnapshot};

// ---

fn action(
    kind: ActionKind,
    title: &str,
    description: &str,
    impact: String,
    feasibility: Feasibility,
    time_to_impact: &str,
    icon: &str,
) -> Action {
    // ---
    Action {
        kind,
        title: title.to_string(),
        description: description.to_string(),
        impact,
        feasibility,
        time_to_impact: time_to_impact.to_string(),
        icon: icon.to_string(),
    }
}

/// Generate recommendations for the current conditions.
///
/// Always returns at least one action; when nothing specific applies, a
/// general "keep it up" card is emitted.
pub fn generate_actions(
    current_aqi: f64,
    sources: &SourceMix,
    weather: &WeatherSnapshot,
) -> Vec<Action> {
    // ---
    let mut actions = Vec::new();

    // High traffic contribution
    if sources.traffic > 40.0 {
        let carpool_impact = (sources.traffic * 0.12) as i64;
        actions.push(action(
            ActionKind::Carpool,
            "Promote Carpooling",
            &format!(
                "If 15% of commuters carpool in the next 2 hours, AQI can drop by ~{}%",
                carpool_impact
            ),
            format!("{}% AQI reduction", carpool_impact),
            Feasibility::High,
            "2-3 hours",
            "🚗",
        ));

        actions.push(action(
            ActionKind::PublicTransport,
            "Use Public Transport",
            "Switching to public transport reduces vehicle emissions by 60-70%",
            format!("{}% AQI reduction", (sources.traffic * 0.15) as i64),
            Feasibility::High,
            "1-2 hours",
            "🚌",
        ));
    }

    // Low wind lets pollutants accumulate
    if weather.wind_speed < 5.0 {
        actions.push(action(
            ActionKind::ReduceActivity,
            "Reduce Outdoor Activities",
            "Low wind speed means pollutants are accumulating. Limit outdoor \
             activities and avoid exercising outside.",
            "Prevents health issues".to_string(),
            Feasibility::Immediate,
            "immediate",
            "⚠️",
        ));
    }

    // High AQI overall: health precautions
    if current_aqi > 150.0 {
        actions.push(action(
            ActionKind::HealthMask,
            "Wear N95/FFP2 Masks",
            "For AQI above 150, wear N95 or FFP2 masks when outdoors. Masks \
             reduce PM2.5 exposure by 80-95%. Essential for children, elderly, \
             and those with respiratory conditions.",
            "80-95% PM2.5 protection".to_string(),
            Feasibility::Immediate,
            "immediate",
            "😷",
        ));

        actions.push(action(
            ActionKind::IndoorAir,
            "Improve Indoor Air Quality",
            "Close windows, use air purifiers with HEPA filters, avoid \
             smoking/cooking that generates smoke. Keep indoor AQI below 50 \
             for safe breathing.",
            "Protects immediate health".to_string(),
            Feasibility::Immediate,
            "immediate",
            "🏠",
        ));

        actions.push(action(
            ActionKind::AvoidExercise,
            "Avoid Outdoor Exercise",
            "High AQI increases breathing rate during exercise, exposing you \
             to 5-10x more pollutants. Exercise indoors or postpone outdoor \
             activities.",
            "Prevents respiratory stress".to_string(),
            Feasibility::Immediate,
            "immediate",
            "🏃",
        ));

        if current_aqi > 200.0 {
            actions.push(action(
                ActionKind::VulnerableStayHome,
                "Vulnerable Groups: Stay Indoors",
                "Children, elderly, pregnant women, and those with heart/lung \
                 conditions should stay indoors. AQI above 200 is very \
                 unhealthy for all.",
                "Critical health protection".to_string(),
                Feasibility::Immediate,
                "immediate",
                "👶",
            ));
        }

        actions.push(action(
            ActionKind::AlertAuthorities,
            "Alert Local Authorities",
            "Notify the pollution control board and local environmental \
             agencies about high pollution levels for immediate action",
            "Enables regulatory response".to_string(),
            Feasibility::High,
            "4-6 hours",
            "📢",
        ));
    }

    // Industrial contribution
    if sources.industry > 30.0 {
        actions.push(action(
            ActionKind::ReportIndustry,
            "Report Industrial Emissions",
            "High industrial contribution detected. Report to environmental \
             monitoring authorities.",
            "Enables source control".to_string(),
            Feasibility::Medium,
            "6-12 hours",
            "🏭",
        ));
    }

    // Open burning contribution
    if sources.open_burning > 20.0 {
        actions.push(action(
            ActionKind::StopBurning,
            "Stop Open Burning",
            "Open burning detected in area. Report and discourage open waste \
             burning.",
            format!("{}% AQI reduction", (sources.open_burning * 0.2) as i64),
            Feasibility::Medium,
            "1-2 hours",
            "🔥",
        ));
    }

    // General precautions whenever air is degraded
    if current_aqi > 100.0 {
        actions.push(action(
            ActionKind::GeneralPrecautions,
            "General Health Precautions",
            "Stay hydrated, eat antioxidant-rich foods (berries, green tea), \
             use saline nasal sprays, and monitor symptoms like coughing or \
             eye irritation.",
            "Supports respiratory health".to_string(),
            Feasibility::High,
            "ongoing",
            "💊",
        ));
    }

    if actions.is_empty() {
        actions.push(action(
            ActionKind::General,
            "Maintain Good Air Quality",
            "Current air quality is acceptable. Continue monitoring and follow \
             best practices. Use public transport, avoid idling vehicles, and \
             support green initiatives.",
            "Preventive".to_string(),
            Feasibility::High,
            "ongoing",
            "✅",
        ));
    }

    actions
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn mix(traffic: f64, industry: f64, open_burning: f64) -> SourceMix {
        // ---
        SourceMix {
            traffic,
            industry,
            open_burning,
            other: (100.0 - traffic - industry - open_burning).max(0.0),
        }
    }

    fn breezy_weather() -> WeatherSnapshot {
        // ---
        WeatherSnapshot {
            wind_speed: 12.0,
            humidity: 55.0,
            temperature: 25.0,
            pressure: 1013.0,
        }
    }

    fn kinds(actions: &[Action]) -> Vec<ActionKind> {
        actions.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_traffic_heavy_mix_recommends_transit() {
        // ---
        let actions = generate_actions(120.0, &mix(50.0, 10.0, 10.0), &breezy_weather());
        let kinds = kinds(&actions);

        assert!(kinds.contains(&ActionKind::Carpool));
        assert!(kinds.contains(&ActionKind::PublicTransport));
        assert!(kinds.contains(&ActionKind::GeneralPrecautions));
        assert!(!kinds.contains(&ActionKind::HealthMask));

        // Impact is a fixed fraction of the traffic share, truncated
        let carpool = actions
            .iter()
            .find(|a| a.kind == ActionKind::Carpool)
            .unwrap();
        assert_eq!(carpool.impact, "6% AQI reduction");
    }

    #[test]
    fn test_severe_aqi_adds_health_actions() {
        // ---
        let actions = generate_actions(210.0, &mix(50.0, 35.0, 25.0), &breezy_weather());
        let kinds = kinds(&actions);

        assert!(kinds.contains(&ActionKind::HealthMask));
        assert!(kinds.contains(&ActionKind::IndoorAir));
        assert!(kinds.contains(&ActionKind::AvoidExercise));
        assert!(kinds.contains(&ActionKind::VulnerableStayHome));
        assert!(kinds.contains(&ActionKind::AlertAuthorities));
        assert!(kinds.contains(&ActionKind::ReportIndustry));
        assert!(kinds.contains(&ActionKind::StopBurning));
    }

    #[test]
    fn test_calm_wind_advisory() {
        // ---
        let still = WeatherSnapshot {
            wind_speed: 2.0,
            ..breezy_weather()
        };
        let actions = generate_actions(80.0, &mix(30.0, 20.0, 10.0), &still);

        assert!(kinds(&actions).contains(&ActionKind::ReduceActivity));
    }

    #[test]
    fn test_clean_air_falls_back_to_general() {
        // ---
        let actions = generate_actions(40.0, &mix(30.0, 20.0, 10.0), &breezy_weather());

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind, ActionKind::General);
        assert_eq!(actions[0].feasibility, Feasibility::High);
    }
}
