//! Flystick wands: a 6DOF body with buttons and analog controls.

use super::Body;

/// One tracked Flystick.
///
/// Button and analog counts are fixed per device and reported in every
/// datagram; an index at or beyond the reported count is a caller usage
/// mistake and answered with `None`, never conflated with a parse error.
#[derive(Debug, Clone, PartialEq)]
pub struct Flystick {
    /// The wand's 6DOF pose.
    pub body: Body,
    /// Pressed state per button, index 0 first.
    buttons: Vec<bool>,
    /// Analog values (joystick axes, trigger), index 0 first.
    analogs: Vec<f32>,
}

impl Flystick {
    /// Create a Flystick from one parsed entity block.
    pub fn new(body: Body, buttons: Vec<bool>, analogs: Vec<f32>) -> Self {
        Self {
            body,
            buttons,
            analogs,
        }
    }

    /// Number of buttons on this device.
    pub fn num_buttons(&self) -> usize {
        self.buttons.len()
    }

    /// Number of analog controls on this device.
    pub fn num_analogs(&self) -> usize {
        self.analogs.len()
    }

    /// Pressed state of button `idx`, or `None` beyond the reported count.
    pub fn button(&self, idx: usize) -> Option<bool> {
        self.buttons.get(idx).copied()
    }

    /// Value of analog control `idx`, or `None` beyond the reported count.
    pub fn analog(&self, idx: usize) -> Option<f32> {
        self.analogs.get(idx).copied()
    }

    /// All button states in index order.
    pub fn buttons(&self) -> &[bool] {
        &self.buttons
    }

    /// All analog values in index order.
    pub fn analogs(&self) -> &[f32] {
        &self.analogs
    }
}
