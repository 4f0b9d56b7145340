//! Standard 6DOF bodies and measurement tools.

use std::sync::OnceLock;

use super::{Quat, Rotation};

/// One tracked rigid body: position and orientation with a tracking
/// quality. All positions are millimeters as transmitted.
///
/// The quaternion is derived from the rotation matrix on first use and
/// memoized; frames that never touch orientation pay nothing for it.
#[derive(Debug, Clone)]
pub struct Body {
    /// Wire ID, zero-based.
    pub id: i32,
    /// Tracking quality; negative means not tracked this frame.
    pub quality: f32,
    /// Location in millimeters.
    pub loc: [f32; 3],
    /// Rotation matrix as transmitted.
    pub rot: Rotation,

    quat: OnceLock<Quat>,
}

impl Body {
    /// Create a body from one parsed entity block.
    pub fn new(id: i32, quality: f32, loc: [f32; 3], rot: Rotation) -> Self {
        Self {
            id,
            quality,
            loc,
            rot,
            quat: OnceLock::new(),
        }
    }

    /// Orientation as a unit quaternion, computed on first call.
    pub fn quat(&self) -> Quat {
        *self.quat.get_or_init(|| self.rot.to_quat())
    }

    /// Whether the controller tracked this body in the current frame.
    /// The exact threshold is device-defined; by convention a
    /// non-negative quality means tracked.
    pub fn is_tracked(&self) -> bool {
        self.quality >= 0.0
    }
}

// The memoized quaternion is derived state and excluded from equality.
impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.quality == other.quality
            && self.loc == other.loc
            && self.rot == other.rot
    }
}

/// One tracked measurement tool. Shares the body wire shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTool {
    /// The tool's 6DOF pose.
    pub body: Body,
}

impl MeasurementTool {
    /// Create a measurement tool from one parsed entity block.
    pub fn new(body: Body) -> Self {
        Self { body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quat_is_memoized_and_identity_for_identity_matrix() {
        let body = Body::new(0, 0.98, [100.0, 200.0, 300.0], Rotation::IDENTITY);
        let q = body.quat();
        assert_eq!(q, Quat::IDENTITY);
        // Second call returns the memoized value.
        assert_eq!(body.quat(), q);
    }

    #[test]
    fn equality_ignores_memoized_quat() {
        let a = Body::new(1, 0.5, [0.0, 0.0, 0.0], Rotation::IDENTITY);
        let b = Body::new(1, 0.5, [0.0, 0.0, 0.0], Rotation::IDENTITY);
        let _ = a.quat();
        assert_eq!(a, b);
    }

    #[test]
    fn negative_quality_means_untracked() {
        let body = Body::new(0, -1.0, [0.0; 3], Rotation::IDENTITY);
        assert!(!body.is_tracked());
    }
}
