//! Computational core of the air-quality pipeline.
//!
//! Four pure components composed strictly downstream: raw concentrations go
//! through [`index`] to an AQI, which feeds [`sources`], [`forecast`], and
//! [`alerts`]; [`actions`] turns the results into recommendations. None of
//! them performs I/O or holds state across calls; the only randomness (the
//! forecast noise term) is injected by the caller.

mod actions;
mod alerts;
mod forecast;
mod index;
mod sources;

// ---

pub use actions::generate_actions;
pub use alerts::derive_alerts;
pub use forecast::{forecast, step, ForecastInputs, ForecastState, NoiseSource, UniformNoise};
pub use index::aqi_from_concentrations;
pub use sources::attribute_sources;
