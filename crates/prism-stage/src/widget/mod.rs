//! Interactive widget sprites.
//!
//! Rendering is the host's job; these widgets own the interaction
//! semantics and tell the renderer *which* texture to draw via their
//! `update` hooks.

mod button;
mod checkbox;
mod slider;

#[cfg(test)]
mod tests;

pub use button::{Button, ButtonConfig};
pub use checkbox::{Checkbox, CheckboxConfig};
pub use slider::{Slider, SliderConfig};
