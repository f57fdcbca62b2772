pub mod chip;
pub mod control;
pub mod mock;
pub mod polling;

pub use chip::{FieldIndicator, HallSensor, InputChange, OutputLevel};
pub use polling::Attribute;

/// Trait for driving the simulated chip's output pin.
///
/// Abstracts over the simulator's pin API and in-memory mocks,
/// giving the adapters a uniform way to publish the computed level.
pub trait OutputPin {
    /// Error type for pin write failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Drive the pin to the given level.
    fn write(&mut self, level: OutputLevel) -> Result<(), Self::Error>;
}

/// Trait for reading host-owned chip attributes.
///
/// Mirrors [`OutputPin`] on the input side. Attribute reads cannot fail:
/// the host registered every [`Attribute`] with its default at init.
pub trait AttributeSource {
    /// Current raw value of the attribute.
    fn read(&self, attribute: Attribute) -> u32;
}
