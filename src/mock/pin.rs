use thiserror::Error;

use crate::{OutputLevel, OutputPin};

/// Write failure injected through [`MockPin::fail_writes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pin write rejected")]
pub struct PinWriteError;

/// In-memory `OUT` pin that records every level written to it.
#[derive(Debug, Clone, Default)]
pub struct MockPin {
    writes: Vec<OutputLevel>,
    failing: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last level successfully written, if any.
    #[inline]
    pub fn level(&self) -> Option<OutputLevel> {
        self.writes.last().copied()
    }

    /// Every successful write, oldest first.
    #[inline]
    pub fn writes(&self) -> &[OutputLevel] {
        &self.writes
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn fail_writes(&mut self, failing: bool) {
        self.failing = failing;
    }
}

impl OutputPin for MockPin {
    type Error = PinWriteError;

    fn write(&mut self, level: OutputLevel) -> Result<(), Self::Error> {
        if self.failing {
            return Err(PinWriteError);
        }
        self.writes.push(level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_pin_empty_on_creation() {
        let pin = MockPin::new();
        assert_eq!(pin.level(), None);
        assert!(pin.writes().is_empty());
    }

    #[test]
    fn test_mock_pin_records_writes() {
        let mut pin = MockPin::new();
        pin.write(OutputLevel::High).unwrap();
        pin.write(OutputLevel::Low).unwrap();

        assert_eq!(pin.writes(), &[OutputLevel::High, OutputLevel::Low]);
        assert_eq!(pin.level(), Some(OutputLevel::Low));
    }

    #[test]
    fn test_mock_pin_failing_write_is_not_recorded() {
        let mut pin = MockPin::new();
        pin.fail_writes(true);

        assert_eq!(pin.write(OutputLevel::Low), Err(PinWriteError));
        assert_eq!(pin.level(), None);
    }
}
