//! Sensor telemetry bridge
//!
//! Turns one read of every device on the bus into a [`SensorReading`].
//! The bus is locked for the whole measurement, so concurrent requests never
//! interleave transactions and a reading never mixes two measurements.

use std::sync::{Mutex, PoisonError};
use thiserror::Error;

use super::reading::SensorReading;
use super::sensor::{HardwareFault, SensorBus, SensorRole};
use crate::logger;

/// A collaborator read failed; no partial reading is produced
#[derive(Debug, Clone, Error)]
#[error("{role} ({model}) read failed: {source}")]
pub struct SensorFault {
    pub role: SensorRole,
    pub model: &'static str,
    #[source]
    pub source: HardwareFault,
}

#[derive(Debug)]
pub struct TelemetryBridge {
    bus: Mutex<SensorBus>,
}

impl TelemetryBridge {
    pub fn new(bus: SensorBus) -> Self {
        Self {
            bus: Mutex::new(bus),
        }
    }

    /// Read every device once and combine the results
    ///
    /// Blocks the calling thread for the duration of the bus transactions.
    /// No retries: a failing device yields `SensorFault` immediately.
    pub fn read_all(&self) -> Result<SensorReading, SensorFault> {
        let mut bus = self.lock_bus();

        let (temperature, humidity) = read_device(&mut bus, SensorRole::Hygrometer)?;
        // The barometer's own temperature is discarded in favour of the hygrometer's
        let (_, pressure_pa) = read_device(&mut bus, SensorRole::Barometer)?;

        Ok(SensorReading::from_raw(temperature, humidity, pressure_pa))
    }

    /// Device models as `(hygrometer, barometer)`
    pub fn models(&self) -> (&'static str, &'static str) {
        let bus = self.lock_bus();
        (
            bus.model(SensorRole::Hygrometer),
            bus.model(SensorRole::Barometer),
        )
    }

    fn lock_bus(&self) -> std::sync::MutexGuard<'_, SensorBus> {
        self.bus.lock().unwrap_or_else(|poisoned| {
            logger::log_warning("Sensor bus lock poisoned by a panicking reader, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

fn read_device(bus: &mut SensorBus, role: SensorRole) -> Result<(f32, f32), SensorFault> {
    let device = bus.device_mut(role);
    device.read().map_err(|source| SensorFault {
        role,
        model: device.model(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::sensor::SensorDevice;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    struct FixedDevice {
        model: &'static str,
        values: Result<(f32, f32), HardwareFault>,
    }

    impl SensorDevice for FixedDevice {
        fn model(&self) -> &'static str {
            self.model
        }

        fn read(&mut self) -> Result<(f32, f32), HardwareFault> {
            self.values.clone()
        }
    }

    fn fixed(model: &'static str, values: Result<(f32, f32), HardwareFault>) -> Box<FixedDevice> {
        Box::new(FixedDevice { model, values })
    }

    #[test]
    fn test_read_all_combines_devices() {
        let bridge = TelemetryBridge::new(SensorBus::new(
            fixed("AHT20", Ok((22.25, 48.0))),
            fixed("BMP390", Ok((23.0, 99_870.0))),
        ));

        let reading = bridge.read_all().unwrap();
        assert!((reading.temperature - 22.25).abs() < f32::EPSILON);
        assert!((reading.humidity - 48.0).abs() < f32::EPSILON);
        assert!((reading.pressure - 998.7).abs() < 1e-3);
    }

    #[test]
    fn test_hygrometer_fault_reported() {
        let bridge = TelemetryBridge::new(SensorBus::new(
            fixed("AHT20", Err(HardwareFault::Timeout)),
            fixed("BMP390", Ok((23.0, 99_870.0))),
        ));

        let fault = bridge.read_all().unwrap_err();
        assert_eq!(fault.role, SensorRole::Hygrometer);
        assert_eq!(fault.model, "AHT20");
        assert_eq!(fault.source, HardwareFault::Timeout);
    }

    #[test]
    fn test_barometer_fault_discards_partial_reading() {
        let bridge = TelemetryBridge::new(SensorBus::new(
            fixed("AHT20", Ok((22.0, 40.0))),
            fixed("BMP390", Err(HardwareFault::Bus("NACK".to_string()))),
        ));

        let fault = bridge.read_all().unwrap_err();
        assert_eq!(fault.role, SensorRole::Barometer);
        assert!(fault.to_string().contains("NACK"));
    }

    /// Emits matching sequence numbers and flags overlapping transactions
    struct SequencedDevice {
        next: Arc<AtomicU32>,
        in_transaction: Arc<AtomicBool>,
        overlaps: Arc<AtomicU32>,
        scale: f32,
    }

    impl SensorDevice for SequencedDevice {
        fn model(&self) -> &'static str {
            "SEQ"
        }

        fn read(&mut self) -> Result<(f32, f32), HardwareFault> {
            if self.in_transaction.swap(true, Ordering::SeqCst) {
                self.overlaps.fetch_add(1, Ordering::SeqCst);
            }
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(1));
            self.in_transaction.store(false, Ordering::SeqCst);
            #[allow(clippy::cast_precision_loss)]
            Ok((0.0, n as f32 * self.scale))
        }
    }

    #[test]
    fn test_concurrent_reads_never_interleave() {
        let in_transaction = Arc::new(AtomicBool::new(false));
        let overlaps = Arc::new(AtomicU32::new(0));
        let hygro_seq = Arc::new(AtomicU32::new(0));
        let baro_seq = Arc::new(AtomicU32::new(0));

        let bridge = Arc::new(TelemetryBridge::new(SensorBus::new(
            Box::new(SequencedDevice {
                next: Arc::clone(&hygro_seq),
                in_transaction: Arc::clone(&in_transaction),
                overlaps: Arc::clone(&overlaps),
                scale: 1.0,
            }),
            Box::new(SequencedDevice {
                next: Arc::clone(&baro_seq),
                in_transaction: Arc::clone(&in_transaction),
                overlaps: Arc::clone(&overlaps),
                scale: 100.0,
            }),
        )));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let bridge = Arc::clone(&bridge);
                thread::spawn(move || {
                    (0..10)
                        .map(|_| bridge.read_all().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for worker in workers {
            for reading in worker.join().unwrap() {
                // Both values come from the same measurement cycle
                assert!((reading.humidity - reading.pressure).abs() < f32::EPSILON);
            }
        }
        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
        assert_eq!(hygro_seq.load(Ordering::SeqCst), 80);
    }

    #[test]
    fn test_models() {
        let bridge = TelemetryBridge::new(SensorBus::new(
            fixed("AHT20", Ok((0.0, 0.0))),
            fixed("BMP390", Ok((0.0, 0.0))),
        ));
        assert_eq!(bridge.models(), ("AHT20", "BMP390"));
    }
}
