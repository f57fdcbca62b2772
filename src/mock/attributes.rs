use crate::{Attribute, AttributeSource};

/// In-memory attribute store, seeded with each attribute's default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAttributes {
    magnetic_field: u32,
    output_inverted: u32,
}

impl Default for MockAttributes {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAttributes {
    pub fn new() -> Self {
        Self {
            magnetic_field: Attribute::MagneticField.default_value(),
            output_inverted: Attribute::OutputInverted.default_value(),
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: u32) {
        *self.slot_mut(attribute) = value;
    }

    fn slot_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::MagneticField => &mut self.magnetic_field,
            Attribute::OutputInverted => &mut self.output_inverted,
        }
    }
}

impl AttributeSource for MockAttributes {
    fn read(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::MagneticField => self.magnetic_field,
            Attribute::OutputInverted => self.output_inverted,
        }
    }
}
