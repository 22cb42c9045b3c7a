//! Rule-based pollution source attribution.
//!
//! Estimates how much of the current pollution comes from traffic,
//! industry, open burning, or other causes. Three independent rules each
//! contribute a raw weight; when the rules are under-determined (total raw
//! weight below 0.5) a fixed severity-keyed distribution takes over,
//! otherwise the weights are normalized to sum to 1 and reported as
//! percentages rounded to one decimal place.

use crate::SourceMix;

// ---

/// Raw rule outputs before normalization. The `other` category never gets
/// a raw weight; it only appears in the fallback distributions.
#[derive(Debug, Clone, Copy)]
struct RuleWeights {
    traffic: f64,
    industry: f64,
    open_burning: f64,
}

impl RuleWeights {
    fn total(&self) -> f64 {
        self.traffic + self.industry + self.open_burning
    }
}

/// Evaluate the three attribution rules independently.
fn rule_weights(aqi: f64, wind_speed: f64, traffic_density: f64, hour: u32) -> RuleWeights {
    // ---
    // High traffic + low wind = vehicle pollution
    let traffic = if traffic_density > 0.6 && wind_speed < 5.0 {
        (0.3 + traffic_density * 0.3).min(0.6)
    } else {
        0.0
    };

    // Night spikes (10 PM - 6 AM) = industrial activity
    let industry = if (hour >= 22 || hour < 6) && aqi > 100.0 {
        (0.2 + (aqi - 100.0) / 200.0).min(0.4)
    } else {
        0.0
    };

    // Low wind + high AQI = open burning / stagnant air
    let open_burning = if wind_speed < 3.0 && aqi > 120.0 {
        (0.15 + (aqi - 120.0) / 300.0).min(0.3)
    } else {
        0.0
    };

    RuleWeights {
        traffic,
        industry,
        open_burning,
    }
}

/// Round a fraction to a percentage with one decimal place.
fn to_percent(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}

/// Attribute current pollution to source categories.
///
/// `traffic_density` is expected in [0, 1] and `hour` in [0, 23]. Total
/// over those domains; no input is rejected.
pub fn attribute_sources(
    aqi: f64,
    wind_speed: f64,
    traffic_density: f64,
    hour: u32,
) -> SourceMix {
    // ---
    let weights = rule_weights(aqi, wind_speed, traffic_density, hour);
    let total = weights.total();

    let (traffic, industry, open_burning, other) = if total < 0.5 {
        // Rules under-determined: fall back to a fixed distribution keyed
        // by severity
        if aqi > 150.0 {
            (0.5, 0.2, 0.2, 0.1)
        } else {
            (0.4, 0.2, 0.2, 0.2)
        }
    } else {
        let factor = 1.0 / total;
        (
            weights.traffic * factor,
            weights.industry * factor,
            weights.open_burning * factor,
            0.0,
        )
    };

    SourceMix {
        traffic: to_percent(traffic),
        industry: to_percent(industry),
        open_burning: to_percent(open_burning),
        other: to_percent(other),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_all_rules_activate_before_normalization() {
        // ---
        // aqi 180, calm wind, dense evening traffic at 23:00 trips all
        // three rules
        let w = rule_weights(180.0, 2.0, 0.9, 23);

        assert!((w.traffic - 0.57).abs() < 1e-9);
        assert!((w.industry - 0.4).abs() < 1e-9);
        assert!((w.open_burning - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_rule_caps_apply() {
        // ---
        // traffic raw weight caps at 0.6 and industry at 0.4 no matter how
        // extreme the inputs
        let w = rule_weights(400.0, 0.0, 1.0, 2);
        assert!((w.traffic - 0.6).abs() < 1e-9);
        assert!((w.industry - 0.4).abs() < 1e-9);
        assert!((w.open_burning - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_mix_for_active_rules() {
        // ---
        let mix = attribute_sources(180.0, 2.0, 0.9, 23);

        // raw weights 0.57 / 0.4 / 0.3, total 1.27
        assert_eq!(mix.traffic, 44.9);
        assert_eq!(mix.industry, 31.5);
        assert_eq!(mix.open_burning, 23.6);
        assert_eq!(mix.other, 0.0);
    }

    #[test]
    fn test_fallback_distribution_low_severity() {
        // ---
        // Midday breeze, light traffic: no rule fires
        let mix = attribute_sources(50.0, 10.0, 0.1, 12);

        assert_eq!(mix.traffic, 40.0);
        assert_eq!(mix.industry, 20.0);
        assert_eq!(mix.open_burning, 20.0);
        assert_eq!(mix.other, 20.0);
    }

    #[test]
    fn test_fallback_distribution_high_severity() {
        // ---
        // High AQI but windy midday, so the rules stay quiet
        let mix = attribute_sources(180.0, 10.0, 0.1, 12);

        assert_eq!(mix.traffic, 50.0);
        assert_eq!(mix.industry, 20.0);
        assert_eq!(mix.open_burning, 20.0);
        assert_eq!(mix.other, 10.0);
    }

    // Percentages must stay non-negative and sum to ~100 across the input
    // space, whichever branch produced them.
    #[rstest]
    #[case(0.0, 0.0, 0.0, 0)]
    #[case(50.0, 10.0, 0.3, 12)]
    #[case(110.0, 1.0, 0.7, 23)]
    #[case(130.0, 2.0, 0.5, 3)]
    #[case(180.0, 2.0, 0.9, 23)]
    #[case(250.0, 0.0, 1.0, 5)]
    #[case(500.0, 20.0, 0.0, 15)]
    fn param_sum_within_tolerance(
        #[case] aqi: f64,
        #[case] wind: f64,
        #[case] density: f64,
        #[case] hour: u32,
    ) {
        // ---
        let mix = attribute_sources(aqi, wind, density, hour);

        assert!(mix.traffic >= 0.0);
        assert!(mix.industry >= 0.0);
        assert!(mix.open_burning >= 0.0);
        assert!(mix.other >= 0.0);

        let total = mix.total();
        assert!(
            (99.5..=100.5).contains(&total),
            "sources for aqi={} wind={} sum to {}",
            aqi,
            wind,
            total
        );
    }
}
