use std::fmt;

/// Field strength above which a magnet counts as detected.
///
/// Strictly greater-than: a strength of exactly 50 is still "absent".
pub const DETECTION_THRESHOLD: f64 = 50.0;

/// Sensitivity reported before the host writes one.
pub const DEFAULT_SENSITIVITY_MT: f64 = 30.0;

/// Logic level on the `OUT` pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputLevel {
    High,
    Low,
}

impl OutputLevel {
    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<bool> for OutputLevel {
    #[inline]
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl From<OutputLevel> for bool {
    #[inline]
    fn from(level: OutputLevel) -> Self {
        level.is_high()
    }
}

impl fmt::Display for OutputLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "HIGH",
            Self::Low => "LOW",
        })
    }
}

/// Raw magnetic field input, as the host supplied it.
///
/// Hosts either report presence directly or hand over a strength in the
/// nominal 0-100 range. Out-of-range strengths are taken as-is.
#[derive(Debug, Clone, Copy)]
pub enum FieldIndicator {
    Present(bool),
    Strength(f64),
}

impl FieldIndicator {
    /// Whether this input means a magnet is near the sensing face.
    #[inline]
    pub fn is_present(self) -> bool {
        match self {
            Self::Present(present) => present,
            Self::Strength(strength) => strength > DETECTION_THRESHOLD,
        }
    }
}

// Bitwise on strengths so a NaN input compares equal to itself and does not
// re-notify on every poll.
impl PartialEq for FieldIndicator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Present(a), Self::Present(b)) => a == b,
            (Self::Strength(a), Self::Strength(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl fmt::Display for FieldIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(true) => f.write_str("present"),
            Self::Present(false) => f.write_str("absent"),
            Self::Strength(strength) => write!(f, "{strength}"),
        }
    }
}

/// Edge notification emitted by [`HallSensor::set_input`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputChange {
    pub field: FieldIndicator,
    pub inverted: bool,
    pub output: OutputLevel,
}

impl fmt::Display for InputChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A3144: Magnetic field={}, Inverted={}, Output={}",
            self.field,
            u8::from(self.inverted),
            self.output
        )
    }
}

/// Behavioral model of an A3144 Hall-effect switch.
///
/// The output is never stored independently of its inputs: every write to the
/// field or the polarity recomputes it on the spot. Notifications are
/// edge-triggered against the last-seen raw inputs.
#[derive(Debug, Clone)]
pub struct HallSensor {
    field: FieldIndicator,
    inverted: bool,
    sensitivity_mt: f64,
    output_high: bool,
}

impl Default for HallSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl HallSensor {
    /// No magnet, active-LOW, 30 mT. Output starts HIGH.
    pub fn new() -> Self {
        Self::with_inputs(FieldIndicator::Present(false), true)
    }

    /// Start from the given raw inputs without emitting a notification.
    pub fn with_inputs(field: FieldIndicator, inverted: bool) -> Self {
        Self {
            field,
            inverted,
            sensitivity_mt: DEFAULT_SENSITIVITY_MT,
            output_high: compute_output(field.is_present(), inverted),
        }
    }

    /// Apply new inputs and recompute the output.
    ///
    /// Returns the notification when either input differs from its last-seen
    /// value, `None` otherwise. The notification is also logged at `info`.
    pub fn set_input(&mut self, field: FieldIndicator, inverted: bool) -> Option<InputChange> {
        let changed = field != self.field || inverted != self.inverted;

        self.field = field;
        self.inverted = inverted;
        self.output_high = compute_output(field.is_present(), inverted);

        if !changed {
            return None;
        }

        let change = InputChange {
            field,
            inverted,
            output: self.output_level(),
        };
        log::info!("{change}");
        Some(change)
    }

    #[inline]
    pub fn read_output(&self) -> bool {
        self.output_high
    }

    #[inline]
    pub fn output_level(&self) -> OutputLevel {
        self.output_high.into()
    }

    /// Store the sensitivity. Detection still uses [`DETECTION_THRESHOLD`].
    #[inline]
    pub fn set_sensitivity(&mut self, millitesla: f64) {
        self.sensitivity_mt = millitesla;
    }

    #[inline]
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity_mt
    }

    #[inline]
    pub fn magnetic_field_present(&self) -> bool {
        self.field.is_present()
    }

    #[inline]
    pub fn output_inverted(&self) -> bool {
        self.inverted
    }

    /// Last raw field input.
    #[inline]
    pub fn field(&self) -> FieldIndicator {
        self.field
    }
}

#[inline]
fn compute_output(field_present: bool, inverted: bool) -> bool {
    field_present != inverted
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_output_is_high() {
        let sensor = HallSensor::new();
        assert!(sensor.read_output());
        assert!(!sensor.magnetic_field_present());
        assert!(sensor.output_inverted());
        assert_eq!(sensor.sensitivity(), 30.0);
    }

    #[test_case(false, false, false; "absent, active high")]
    #[test_case(true, false, true; "present, active high")]
    #[test_case(false, true, true; "absent, active low")]
    #[test_case(true, true, false; "present, active low")]
    fn test_output_truth_table(field: bool, inverted: bool, expected: bool) {
        let mut sensor = HallSensor::new();
        sensor.set_input(FieldIndicator::Present(field), inverted);
        assert_eq!(sensor.read_output(), expected);
    }

    #[test_case(0.0, false; "zero")]
    #[test_case(50.0, false; "boundary is absent")]
    #[test_case(50.5, true; "just above")]
    #[test_case(51.0, true; "first integer above")]
    #[test_case(100.0, true; "full scale")]
    #[test_case(250.0, true; "out of range accepted")]
    #[test_case(-10.0, false; "negative accepted")]
    fn test_strength_threshold(strength: f64, present: bool) {
        assert_eq!(FieldIndicator::Strength(strength).is_present(), present);
    }

    #[test]
    fn test_threshold_over_nominal_range() {
        for f in 0..=100u32 {
            let mut sensor = HallSensor::new();
            sensor.set_input(FieldIndicator::Strength(f64::from(f)), false);
            assert_eq!(sensor.magnetic_field_present(), f > 50, "strength {f}");
        }
    }

    #[test]
    fn test_identical_input_notifies_once() {
        let mut sensor = HallSensor::new();
        let first = sensor.set_input(FieldIndicator::Present(true), true);
        let second = sensor.set_input(FieldIndicator::Present(true), true);

        assert_eq!(
            first,
            Some(InputChange {
                field: FieldIndicator::Present(true),
                inverted: true,
                output: OutputLevel::Low,
            })
        );
        assert_eq!(second, None);
    }

    #[test]
    fn test_defaults_are_silent() {
        let mut sensor = HallSensor::new();
        assert_eq!(sensor.set_input(FieldIndicator::Present(false), true), None);
    }

    #[test]
    fn test_polarity_change_notifies() {
        let mut sensor = HallSensor::new();
        let change = sensor.set_input(FieldIndicator::Present(false), false);
        assert_eq!(change.map(|c| c.output), Some(OutputLevel::Low));
    }

    #[test]
    fn test_strength_change_below_threshold_still_notifies() {
        let mut sensor = HallSensor::with_inputs(FieldIndicator::Strength(0.0), true);
        let change = sensor.set_input(FieldIndicator::Strength(20.0), true);

        assert!(change.is_some());
        assert!(sensor.read_output(), "still no field, still HIGH");
    }

    #[test]
    fn test_nan_strength_is_stable() {
        let mut sensor = HallSensor::new();
        assert!(sensor.set_input(FieldIndicator::Strength(f64::NAN), true).is_some());
        assert!(sensor.set_input(FieldIndicator::Strength(f64::NAN), true).is_none());
        assert!(!sensor.magnetic_field_present());
    }

    #[test]
    fn test_sensitivity_does_not_affect_output() {
        let mut sensor = HallSensor::new();
        sensor.set_input(FieldIndicator::Strength(60.0), true);
        let before = sensor.read_output();

        sensor.set_sensitivity(45.0);
        assert_eq!(sensor.sensitivity(), 45.0);
        assert_eq!(sensor.read_output(), before);

        sensor.set_sensitivity(-1000.0);
        assert_eq!(sensor.read_output(), before);
    }

    #[test]
    fn test_notification_text() {
        let change = InputChange {
            field: FieldIndicator::Strength(75.0),
            inverted: true,
            output: OutputLevel::Low,
        };
        assert_eq!(
            change.to_string(),
            "A3144: Magnetic field=75, Inverted=1, Output=LOW"
        );
    }

    #[test]
    fn test_output_level_bool_conversion() {
        assert_eq!(OutputLevel::from(true), OutputLevel::High);
        assert!(!bool::from(OutputLevel::Low));
    }
}
