//! Environment Module - Readings consumed by the decision engine.

mod location;
mod snapshot;

pub use location::Location;
pub use snapshot::{
    EnvironmentalSnapshot, HumidityLevel, PollutionLevel, UvLevel, HUMIDITY_HIGH, HUMIDITY_LOW,
    PM25_POLLUTED, UV_CRITICAL,
};
