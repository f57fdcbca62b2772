mod attributes;
mod pin;
mod script;
mod terminal;

pub use attributes::MockAttributes;
pub use pin::{MockPin, PinWriteError};
pub use script::{ParseError, ScriptedAttributes};
pub use terminal::run_interactive_terminal;
