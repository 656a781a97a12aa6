//! Unified sensor reading

use serde::Serialize;

pub const PASCALS_PER_HECTOPASCAL: f32 = 100.0;

/// One combined measurement, serialized as a flat JSON object
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    /// Degrees Celsius
    pub temperature: f32,
    /// Percent relative humidity
    pub humidity: f32,
    /// Hectopascals
    pub pressure: f32,
}

impl SensorReading {
    /// Build a reading from raw driver output, pressure given in pascals
    pub fn from_raw(temperature: f32, humidity: f32, pressure_pa: f32) -> Self {
        Self {
            temperature,
            humidity,
            pressure: pressure_pa / PASCALS_PER_HECTOPASCAL,
        }
    }
}
