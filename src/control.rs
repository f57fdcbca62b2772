use thiserror::Error;

use crate::chip::{FieldIndicator, HallSensor, InputChange};

/// Raised when the host addresses a control index the chip does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown control index {0}")]
pub struct UnknownControl(pub u32);

/// Controls exposed through the indexed get/set surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Control {
    /// Boolean as double.
    MagneticField = 0,
    /// Boolean as double, 1.0 = active-LOW.
    OutputInverted = 1,
    /// Millitesla.
    Sensitivity = 2,
}

impl Control {
    pub const ALL: [Control; 3] = [
        Control::MagneticField,
        Control::OutputInverted,
        Control::Sensitivity,
    ];

    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Control {
    type Error = UnknownControl;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|control| control.index() == index)
            .ok_or(UnknownControl(index))
    }
}

/// Pin id of `OUT` on the control surface.
pub const OUT_PIN_ID: u32 = 0;

/// Callback-driven adapter over [`HallSensor`].
///
/// Each control write keeps the other input at its current value and goes
/// through the same `set_input` path the polling adapter uses.
#[derive(Debug, Clone)]
pub struct ControlledSensor {
    sensor: HallSensor,
}

impl ControlledSensor {
    /// Defaults; the output is computed from them on construction.
    pub fn init() -> Self {
        let sensor = HallSensor::new();
        log::info!("A3144 Hall Effect Sensor initialized (output={})", sensor.output_level());
        Self { sensor }
    }

    pub fn deinit(self) {
        log::info!("A3144 Hall Effect Sensor deinitialized");
    }

    #[inline]
    pub fn sensor(&self) -> &HallSensor {
        &self.sensor
    }

    pub fn get(&self, control: Control) -> f64 {
        match control {
            Control::MagneticField => bool_to_f64(self.sensor.magnetic_field_present()),
            Control::OutputInverted => bool_to_f64(self.sensor.output_inverted()),
            Control::Sensitivity => self.sensor.sensitivity(),
        }
    }

    /// Write one control.
    ///
    /// Returns the notification when the field or polarity write changed an
    /// input. Sensitivity is not a model input and never notifies.
    pub fn set(&mut self, control: Control, value: f64) -> Option<InputChange> {
        match control {
            Control::MagneticField => {
                let inverted = self.sensor.output_inverted();
                self.sensor
                    .set_input(FieldIndicator::Present(value != 0.0), inverted)
            }
            Control::OutputInverted => {
                let field = self.sensor.field();
                self.sensor.set_input(field, value != 0.0)
            }
            Control::Sensitivity => {
                if value.to_bits() != self.sensor.sensitivity().to_bits() {
                    log::info!("A3144: Sensitivity={value} mT");
                }
                self.sensor.set_sensitivity(value);
                None
            }
        }
    }

    /// Raw index read. Unknown indices are logged and read as `0.0`.
    pub fn get_control(&self, index: u32) -> f64 {
        match Control::try_from(index) {
            Ok(control) => self.get(control),
            Err(e) => {
                log::error!("A3144: {e}");
                0.0
            }
        }
    }

    /// Raw index write. Unknown indices are logged and ignored.
    pub fn set_control(&mut self, index: u32, value: f64) -> Option<InputChange> {
        match Control::try_from(index) {
            Ok(control) => self.set(control, value),
            Err(e) => {
                log::error!("A3144: {e}, ignoring write of {value}");
                None
            }
        }
    }

    /// Level of the given pin; only [`OUT_PIN_ID`] exists.
    pub fn pin_state(&self, pin_id: u32) -> bool {
        pin_id == OUT_PIN_ID && self.sensor.read_output()
    }

    #[inline]
    pub fn read_output(&self) -> bool {
        self.sensor.read_output()
    }
}

#[inline]
fn bool_to_f64(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}
