//! AQI index conversion.
//!
//! Converts raw PM2.5 and PM10 concentrations into a US-EPA-style Air
//! Quality Index by piecewise-linear interpolation over the official
//! breakpoint tables. The worse pollutant dominates. Past the top table
//! row the last segment's slope keeps extending, so extreme concentrations
//! can map above 500; display layers decide how to present that.

// ---

/// One row of a breakpoint table: concentration range → AQI range.
struct Segment {
    c_lo: f64,
    c_hi: f64,
    aqi_lo: f64,
    aqi_hi: f64,
}

impl Segment {
    const fn new(c_lo: f64, c_hi: f64, aqi_lo: f64, aqi_hi: f64) -> Self {
        Segment {
            c_lo,
            c_hi,
            aqi_lo,
            aqi_hi,
        }
    }
}

const PM25_SEGMENTS: [Segment; 6] = [
    Segment::new(0.0, 12.0, 0.0, 50.0),
    Segment::new(12.0, 35.4, 50.0, 100.0),
    Segment::new(35.4, 55.4, 100.0, 150.0),
    Segment::new(55.4, 150.4, 150.0, 200.0),
    Segment::new(150.4, 250.4, 200.0, 300.0),
    Segment::new(250.4, 350.4, 300.0, 400.0),
];

const PM10_SEGMENTS: [Segment; 6] = [
    Segment::new(0.0, 54.0, 0.0, 50.0),
    Segment::new(54.0, 154.0, 50.0, 100.0),
    Segment::new(154.0, 254.0, 100.0, 150.0),
    Segment::new(254.0, 354.0, 150.0, 200.0),
    Segment::new(354.0, 424.0, 200.0, 300.0),
    Segment::new(424.0, 504.0, 300.0, 400.0),
];

/// Sub-index for a single pollutant.
///
/// Concentrations at or below zero yield 0. Concentrations beyond the last
/// segment keep using that segment's slope (no clamp).
fn sub_index(concentration: f64, segments: &[Segment]) -> f64 {
    // ---
    if concentration <= 0.0 {
        return 0.0;
    }

    let segment = segments
        .iter()
        .find(|s| concentration <= s.c_hi)
        .unwrap_or_else(|| &segments[segments.len() - 1]);

    segment.aqi_lo
        + (concentration - segment.c_lo) / (segment.c_hi - segment.c_lo)
            * (segment.aqi_hi - segment.aqi_lo)
}

/// Compute the AQI from PM2.5 and PM10 concentrations (μg/m³).
///
/// Returns the maximum of the two pollutant sub-indexes, unrounded. Total
/// over all inputs; negative concentrations are treated as zero rather
/// than rejected.
pub fn aqi_from_concentrations(pm25: f64, pm10: f64) -> f64 {
    // ---
    let aqi_pm25 = sub_index(pm25, &PM25_SEGMENTS);
    let aqi_pm10 = sub_index(pm10, &PM10_SEGMENTS);
    aqi_pm25.max(aqi_pm10)
}
