//! Sensor telemetry module
//!
//! Bridges the sensor collaborators on the shared bus into the
//! [`SensorReading`] served by the weather endpoint.

mod bridge;
mod reading;
pub mod sensor;
pub mod sim;

pub use bridge::{SensorFault, TelemetryBridge};
pub use reading::{SensorReading, PASCALS_PER_HECTOPASCAL};
pub use sensor::{HardwareFault, SensorBus, SensorDevice, SensorRole};
