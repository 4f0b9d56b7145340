//! Rotation matrix and quaternion types.
//!
//! DTRACK transmits orientation as nine scalars of a right-handed,
//! orthonormal 3x3 matrix, filling columns first. The quaternion
//! conversion below reproduces the reference branch selection exactly;
//! picking the numerically largest of the four candidate scaling terms
//! avoids the precision loss of the trace-only formula when the trace is
//! near -1.

/// Unit quaternion in `[w, x, y, z]` component order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    /// Scalar part.
    pub w: f32,
    /// First vector component.
    pub x: f32,
    /// Second vector component.
    pub y: f32,
    /// Third vector component.
    pub z: f32,
}

impl Quat {
    /// Identity rotation.
    pub const IDENTITY: Quat = Quat {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Component array in wire order `[w, x, y, z]`.
    pub fn to_array(self) -> [f32; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Whether `self` and `other` describe the same rotation within
    /// `tol`, treating `q` and `-q` as equal.
    pub fn approx_eq(self, other: Quat, tol: f32) -> bool {
        let direct = self
            .to_array()
            .iter()
            .zip(other.to_array())
            .all(|(a, b)| (a - b).abs() <= tol);
        let negated = self
            .to_array()
            .iter()
            .zip(other.to_array())
            .all(|(a, b)| (a + b).abs() <= tol);
        direct || negated
    }
}

/// 3x3 rotation matrix, stored column-major as transmitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation(pub [f32; 9]);

impl Rotation {
    /// Identity matrix.
    pub const IDENTITY: Rotation = Rotation([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Matrix element at `row`, `col`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.0[col * 3 + row]
    }

    /// Convert to a unit quaternion.
    ///
    /// Branch structure follows the reference implementation: compare
    /// `r22` against 0 and `r00` against `±r11` to select the largest of
    /// `1+trace`, `1+r00-r11-r22`, `1-r00+r11-r22`, `1-r00-r11+r22` as
    /// the scaling term `t`. `t` is clamped to >= 0 before the square
    /// root; floating round-off can push it slightly negative.
    pub fn to_quat(&self) -> Quat {
        let r = |row, col| self.at(row, col);

        let (t, x, y, z, w);
        if r(2, 2) < 0.0 {
            if r(0, 0) > r(1, 1) {
                t = 1.0 + r(0, 0) - r(1, 1) - r(2, 2);
                x = t;
                y = r(0, 1) + r(1, 0);
                z = r(2, 0) + r(0, 2);
                w = r(2, 1) - r(1, 2);
            } else {
                t = 1.0 - r(0, 0) + r(1, 1) - r(2, 2);
                x = r(0, 1) + r(1, 0);
                y = t;
                z = r(1, 2) + r(2, 1);
                w = r(0, 2) - r(2, 0);
            }
        } else if r(0, 0) < -r(1, 1) {
            t = 1.0 - r(0, 0) - r(1, 1) + r(2, 2);
            x = r(2, 0) + r(0, 2);
            y = r(1, 2) + r(2, 1);
            z = t;
            w = r(1, 0) - r(0, 1);
        } else {
            t = 1.0 + r(0, 0) + r(1, 1) + r(2, 2);
            x = r(2, 1) - r(1, 2);
            y = r(0, 2) - r(2, 0);
            z = r(1, 0) - r(0, 1);
            w = t;
        }

        let s = 0.5 / f32::max(0.0, t).sqrt();
        Quat {
            w: s * w,
            x: s * x,
            y: s * y,
            z: s * z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-5;

    /// Column-major matrix for a rotation of `angle` radians about `axis`.
    fn axis_angle(axis: [f32; 3], angle: f32) -> Rotation {
        let norm = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        let (ux, uy, uz) = (axis[0] / norm, axis[1] / norm, axis[2] / norm);
        let (s, c) = angle.sin_cos();
        let ic = 1.0 - c;
        // Row-major Rodrigues matrix, transposed into column-major storage.
        let rows = [
            [c + ux * ux * ic, ux * uy * ic - uz * s, ux * uz * ic + uy * s],
            [uy * ux * ic + uz * s, c + uy * uy * ic, uy * uz * ic - ux * s],
            [uz * ux * ic - uy * s, uz * uy * ic + ux * s, c + uz * uz * ic],
        ];
        let mut m = [0.0; 9];
        for (row, vals) in rows.iter().enumerate() {
            for (col, v) in vals.iter().enumerate() {
                m[col * 3 + row] = *v;
            }
        }
        Rotation(m)
    }

    fn expected_quat(axis: [f32; 3], angle: f32) -> Quat {
        let norm = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        let half = angle / 2.0;
        let s = half.sin() / norm;
        Quat {
            w: half.cos(),
            x: axis[0] * s,
            y: axis[1] * s,
            z: axis[2] * s,
        }
    }

    #[test]
    fn identity_converts_to_identity_quat() {
        let q = Rotation::IDENTITY.to_quat();
        assert!(q.approx_eq(Quat::IDENTITY, TOL));
    }

    #[test]
    fn axis_angle_round_trip() {
        let cases = [
            ([1.0, 0.0, 0.0], 0.5),
            ([0.0, 1.0, 0.0], 1.2),
            ([0.0, 0.0, 1.0], -0.7),
            ([1.0, 1.0, 1.0], 2.0),
            ([0.3, -0.4, 0.866], 3.0),
        ];
        for (axis, angle) in cases {
            let q = axis_angle(axis, angle).to_quat();
            let want = expected_quat(axis, angle);
            assert!(
                q.approx_eq(want, TOL),
                "axis {axis:?} angle {angle}: got {q:?}, want {want:?}"
            );
        }
    }

    #[test]
    fn near_trace_minus_one_stays_finite() {
        // 180 degree rotations have trace -1; every branch except the
        // trace branch must be exercised without producing NaN.
        for axis in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
            let q = axis_angle(axis, std::f32::consts::PI).to_quat();
            let [w, x, y, z] = q.to_array();
            assert!(w.is_finite() && x.is_finite() && y.is_finite() && z.is_finite());
            let want = expected_quat(axis, std::f32::consts::PI);
            assert!(q.approx_eq(want, TOL));
        }
    }

    #[test]
    fn quat_sign_ambiguity_is_tolerated() {
        let q = Quat {
            w: 0.5,
            x: 0.5,
            y: 0.5,
            z: 0.5,
        };
        let neg = Quat {
            w: -0.5,
            x: -0.5,
            y: -0.5,
            z: -0.5,
        };
        assert!(q.approx_eq(neg, TOL));
    }
}
