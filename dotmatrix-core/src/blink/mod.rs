//! Cursor blink state machine
//!
//! Blinking is explicit and tick-driven: the machine never owns a timer.
//! The host reports elapsed time and the machine answers with the action
//! the pixel has to take.

pub mod machine;

pub use machine::{BlinkAction, BlinkEvent, BlinkState, Blinker};
