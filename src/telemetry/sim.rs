//! Simulated sensor devices for host builds
//!
//! The real AHT20/BMP390 drivers are brought up by the board support layer.
//! On a development host these stand-ins drift slowly around configured
//! base values so the web UI shows live-looking data.

use super::sensor::{HardwareFault, SensorBus, SensorDevice};
use crate::config::SensorConfig;

/// Number of reads in one drift cycle
const DRIFT_PERIOD: u32 = 40;

/// Triangle wave in `[-1.0, 1.0]` over `DRIFT_PERIOD` ticks
fn drift(tick: u32) -> f32 {
    let phase = tick % DRIFT_PERIOD;
    let half = DRIFT_PERIOD / 2;
    #[allow(clippy::cast_precision_loss)]
    let position = if phase < half {
        phase as f32 / half as f32
    } else {
        (DRIFT_PERIOD - phase) as f32 / half as f32
    };
    position.mul_add(2.0, -1.0)
}

/// Temperature/humidity stand-in
pub struct SimulatedHygrometer {
    temperature_c: f32,
    humidity_pct: f32,
    tick: u32,
}

impl SimulatedHygrometer {
    pub const fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            tick: 0,
        }
    }
}

impl SensorDevice for SimulatedHygrometer {
    fn model(&self) -> &'static str {
        "AHT20 (simulated)"
    }

    fn read(&mut self) -> Result<(f32, f32), HardwareFault> {
        let d = drift(self.tick);
        self.tick = self.tick.wrapping_add(1);
        let temperature = d.mul_add(0.5, self.temperature_c);
        let humidity = d.mul_add(2.0, self.humidity_pct).clamp(0.0, 100.0);
        Ok((temperature, humidity))
    }
}

/// Temperature/pressure stand-in, pressure in pascals
pub struct SimulatedBarometer {
    temperature_c: f32,
    pressure_pa: f32,
    tick: u32,
}

impl SimulatedBarometer {
    pub const fn new(temperature_c: f32, pressure_pa: f32) -> Self {
        Self {
            temperature_c,
            pressure_pa,
            tick: 0,
        }
    }
}

impl SensorDevice for SimulatedBarometer {
    fn model(&self) -> &'static str {
        "BMP390 (simulated)"
    }

    fn read(&mut self) -> Result<(f32, f32), HardwareFault> {
        let d = drift(self.tick);
        self.tick = self.tick.wrapping_add(1);
        Ok((
            d.mul_add(0.5, self.temperature_c),
            d.mul_add(150.0, self.pressure_pa),
        ))
    }
}

/// Build a bus populated with simulated devices
pub fn simulated_bus(config: &SensorConfig) -> SensorBus {
    SensorBus::new(
        Box::new(SimulatedHygrometer::new(
            config.temperature_c,
            config.humidity_pct,
        )),
        Box::new(SimulatedBarometer::new(
            config.temperature_c,
            config.pressure_pa,
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_bounds() {
        for tick in 0..(DRIFT_PERIOD * 2) {
            let d = drift(tick);
            assert!((-1.0..=1.0).contains(&d), "tick {tick} gave {d}");
        }
        assert!((drift(0) + 1.0).abs() < f32::EPSILON);
        assert!((drift(DRIFT_PERIOD / 2) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_simulated_values_stay_near_base() {
        let mut barometer = SimulatedBarometer::new(20.0, 101_325.0);
        for _ in 0..100 {
            let (_, pressure) = barometer.read().unwrap();
            assert!((pressure - 101_325.0).abs() <= 150.0);
        }

        let mut hygrometer = SimulatedHygrometer::new(20.0, 99.5);
        for _ in 0..100 {
            let (_, humidity) = hygrometer.read().unwrap();
            assert!(humidity <= 100.0);
        }
    }
}
