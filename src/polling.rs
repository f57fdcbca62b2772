use std::time::Duration;

use crate::chip::{FieldIndicator, HallSensor, InputChange};
use crate::{AttributeSource, OutputPin};

/// How often the host should call [`PolledSensor::tick`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Name of the digital output pin.
pub const OUT_PIN_NAME: &str = "OUT";

/// Numeric attributes the chip exposes to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Field strength, nominally 0-100.
    MagneticField,
    /// Nonzero selects active-LOW.
    OutputInverted,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::MagneticField, Attribute::OutputInverted];

    /// Name the host registers the attribute under.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MagneticField => "magneticField",
            Self::OutputInverted => "outputInverted",
        }
    }

    pub const fn default_value(self) -> u32 {
        match self {
            Self::MagneticField => 0,
            Self::OutputInverted => 1,
        }
    }
}

/// Timer-driven adapter: polls attributes, feeds the model, drives `OUT`.
#[derive(Debug)]
pub struct PolledSensor<A, P> {
    sensor: HallSensor,
    attributes: A,
    pin: P,
}

impl<A: AttributeSource, P: OutputPin> PolledSensor<A, P> {
    /// Start the model at the attribute defaults, then apply the attributes'
    /// current values once and drive `OUT`.
    ///
    /// Returns the notification when the host set an attribute away from its
    /// default before init.
    pub fn init(attributes: A, pin: P) -> (Self, Option<InputChange>) {
        let mut polled = Self {
            sensor: HallSensor::with_inputs(default_field(), default_inverted()),
            attributes,
            pin,
        };
        let change = polled.tick();
        log::info!("A3144 Hall Effect Sensor initialized");
        (polled, change)
    }

    /// One poll period: read attributes, update the model, write the pin.
    ///
    /// The pin is written every tick; only the notification is edge-triggered.
    pub fn tick(&mut self) -> Option<InputChange> {
        let (field, inverted) = read_inputs(&self.attributes);
        let change = self.sensor.set_input(field, inverted);
        self.drive_pin();
        change
    }

    #[inline]
    pub fn sensor(&self) -> &HallSensor {
        &self.sensor
    }

    #[inline]
    pub fn attributes(&self) -> &A {
        &self.attributes
    }

    #[inline]
    pub fn attributes_mut(&mut self) -> &mut A {
        &mut self.attributes
    }

    #[inline]
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Tear down, handing the host its collaborators back.
    pub fn deinit(self) -> (A, P) {
        log::info!("A3144 Hall Effect Sensor deinitialized");
        (self.attributes, self.pin)
    }

    fn drive_pin(&mut self) {
        let level = self.sensor.output_level();
        if let Err(e) = self.pin.write(level) {
            log::warn!("failed to drive {OUT_PIN_NAME} {level}: {e}");
        }
    }
}

fn default_field() -> FieldIndicator {
    FieldIndicator::Strength(f64::from(Attribute::MagneticField.default_value()))
}

fn default_inverted() -> bool {
    Attribute::OutputInverted.default_value() != 0
}

fn read_inputs(attributes: &impl AttributeSource) -> (FieldIndicator, bool) {
    let strength = attributes.read(Attribute::MagneticField);
    let inverted = attributes.read(Attribute::OutputInverted) != 0;
    (FieldIndicator::Strength(f64::from(strength)), inverted)
}
