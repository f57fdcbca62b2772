use std::collections::VecDeque;

use thiserror::Error;

use super::MockAttributes;
use crate::{Attribute, AttributeSource};

/// Error when parsing a stimulus script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid stimulus token: '{0}'")]
pub struct ParseError(String);

type Batch = Vec<(Attribute, u32)>;

/// A scriptable attribute source for driving the polling adapter.
///
/// Holds the current attribute values and applies queued batches on demand.
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAttributes {
    attributes: MockAttributes,
    pending_batches: VecDeque<Batch>,
}

impl ScriptedAttributes {
    /// Start with every attribute at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional script for execution.
    ///
    /// Format:
    /// - `f<n>` sets `magneticField` to `n`
    /// - `i<n>` sets `outputInverted` to `n`
    /// - Whitespace separates tokens in the same batch
    /// - A period closes the batch
    ///
    /// Examples:
    /// - `"f80."` - Bring a magnet close, then tick
    /// - `"f80 i0."` - Magnet and active-HIGH together, then tick
    /// - `"f80. f20."` - Magnet in, tick, magnet out, tick
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let batches = parse_script(script)?;
        self.pending_batches.extend(batches);
        Ok(())
    }

    /// Apply the next pending batch. Returns false if nothing was pending.
    pub fn tick(&mut self) -> bool {
        let Some(batch) = self.pending_batches.pop_front() else {
            return false;
        };
        for (attribute, value) in batch {
            self.attributes.set(attribute, value);
        }
        true
    }

    /// Number of batches still queued.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending_batches.len()
    }

    /// Set an attribute immediately, bypassing the queue.
    pub fn set(&mut self, attribute: Attribute, value: u32) {
        self.attributes.set(attribute, value);
    }
}

impl AttributeSource for ScriptedAttributes {
    fn read(&self, attribute: Attribute) -> u32 {
        self.attributes.read(attribute)
    }
}

/// Parse a stimulus script into batches of attribute writes.
fn parse_script(script: &str) -> Result<Vec<Batch>, ParseError> {
    let mut batches: Vec<Batch> = vec![Vec::new()];

    for segment in script.split_inclusive('.') {
        let (body, closes) = match segment.strip_suffix('.') {
            Some(body) => (body, true),
            None => (segment, false),
        };
        for token in body.split_whitespace() {
            let write = parse_token(token)?;
            batches
                .last_mut()
                .expect("batches should never be empty")
                .push(write);
        }
        if closes {
            batches.push(Vec::new());
        }
    }

    // Remove empty batches
    batches.retain(|b| !b.is_empty());
    Ok(batches)
}

fn parse_token(token: &str) -> Result<(Attribute, u32), ParseError> {
    let invalid = || ParseError(token.to_string());

    let mut chars = token.chars();
    let attribute = match chars.next() {
        Some('f') => Attribute::MagneticField,
        Some('i') => Attribute::OutputInverted,
        _ => return Err(invalid()),
    };
    let value = chars.as_str().parse().map_err(|_| invalid())?;
    Ok((attribute, value))
}
