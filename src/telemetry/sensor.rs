//! Sensor collaborator interface
//!
//! Register-level drivers are brought up outside this crate. Once the bus and
//! its devices are initialised they are handed over as [`SensorDevice`] trait
//! objects grouped on a [`SensorBus`].

use std::fmt;
use thiserror::Error;

/// Fault signalled by a sensor driver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HardwareFault {
    #[error("device did not answer before the driver timeout")]
    Timeout,
    #[error("checksum mismatch in measurement frame")]
    Checksum,
    #[error("device busy or not calibrated")]
    NotResponding,
    #[error("bus transaction failed: {0}")]
    Bus(String),
}

/// A device on the sensor bus producing two values per measurement
///
/// The meaning of the pair depends on the device: a hygrometer yields
/// `(°C, %RH)`, a barometer yields `(°C, Pa)`.
pub trait SensorDevice: Send {
    /// Device model, used in logs and fault reports
    fn model(&self) -> &'static str;

    /// Perform one blocking measurement
    fn read(&mut self) -> Result<(f32, f32), HardwareFault>;
}

impl<T: SensorDevice + ?Sized> SensorDevice for Box<T> {
    fn model(&self) -> &'static str {
        (**self).model()
    }

    fn read(&mut self) -> Result<(f32, f32), HardwareFault> {
        (**self).read()
    }
}

/// Position of a device on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorRole {
    Hygrometer,
    Barometer,
}

impl fmt::Display for SensorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hygrometer => write!(f, "hygrometer"),
            Self::Barometer => write!(f, "barometer"),
        }
    }
}

/// The devices sharing one physical bus
///
/// Whoever holds a `&mut SensorBus` owns the bus: every transaction issued
/// through it is exclusive.
pub struct SensorBus {
    hygrometer: Box<dyn SensorDevice>,
    barometer: Box<dyn SensorDevice>,
}

impl SensorBus {
    pub fn new(hygrometer: Box<dyn SensorDevice>, barometer: Box<dyn SensorDevice>) -> Self {
        Self {
            hygrometer,
            barometer,
        }
    }

    pub fn device_mut(&mut self, role: SensorRole) -> &mut dyn SensorDevice {
        match role {
            SensorRole::Hygrometer => self.hygrometer.as_mut(),
            SensorRole::Barometer => self.barometer.as_mut(),
        }
    }

    pub fn model(&self, role: SensorRole) -> &'static str {
        match role {
            SensorRole::Hygrometer => self.hygrometer.model(),
            SensorRole::Barometer => self.barometer.model(),
        }
    }
}

impl fmt::Debug for SensorBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorBus")
            .field("hygrometer", &self.hygrometer.model())
            .field("barometer", &self.barometer.model())
            .finish()
    }
}
