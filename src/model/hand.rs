//! Fingertracking hands and fingers.

use super::Body;

/// Which hand a fingertracking glove is worn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandSide {
    /// Left hand (wire value 0).
    Left,
    /// Right hand (any non-zero wire value).
    Right,
}

impl From<i32> for HandSide {
    fn from(lr: i32) -> Self {
        if lr == 0 { HandSide::Left } else { HandSide::Right }
    }
}

/// Finger indices in reporting order.
pub mod finger_index {
    /// Thumb.
    pub const THUMB: usize = 0;
    /// Index finger.
    pub const INDEX: usize = 1;
    /// Middle finger.
    pub const MIDDLE: usize = 2;
    /// Ring finger.
    pub const RING: usize = 3;
    /// Pinky.
    pub const PINKY: usize = 4;
}

/// One tracked finger: its own local pose plus phalanx geometry.
///
/// Geometry scalars come straight off the wire: tip radius, then the
/// outer, middle and inner phalanx lengths with the flex angle between
/// each segment and the next one inward (degrees).
#[derive(Debug, Clone, PartialEq)]
pub struct Finger {
    /// The finger's local 6DOF pose; quality is inherited from the hand.
    pub body: Body,
    /// Fingertip radius in millimeters.
    pub tip_radius: f32,
    /// Outer phalanx length in millimeters.
    pub length_outer: f32,
    /// Flex angle between outer and middle phalanx, degrees.
    pub angle_outer_middle: f32,
    /// Middle phalanx length in millimeters.
    pub length_middle: f32,
    /// Flex angle between middle and inner phalanx, degrees.
    pub angle_middle_inner: f32,
    /// Inner phalanx length in millimeters.
    pub length_inner: f32,
}

/// One tracked hand with its fingers.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    /// The back-of-hand 6DOF pose.
    pub body: Body,
    /// Left or right hand.
    pub side: HandSide,
    /// Fingers in reporting order, thumb first. The device reports the
    /// length; fewer than five fingers is valid.
    pub fingers: Vec<Finger>,
}

impl Hand {
    /// Create a hand from one parsed entity block.
    pub fn new(body: Body, side: HandSide, fingers: Vec<Finger>) -> Self {
        Self {
            body,
            side,
            fingers,
        }
    }

    /// Finger at `idx` (see [`finger_index`]), or `None` if not reported.
    pub fn finger(&self, idx: usize) -> Option<&Finger> {
        self.fingers.get(idx)
    }
}
