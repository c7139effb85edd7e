// Affine transform value type used to pose primitives

use nalgebra_glm as glm;

/// Immutable affine transform over a homogeneous 4x4 matrix.
///
/// Every compose operation post-multiplies and returns a fresh value, so a
/// child transform is always built from a copy of its parent:
/// `let femur = coxa.translated(..).rotated(..);` leaves `coxa` untouched.
/// Chained calls read in the local frame established by the prior calls:
/// move, then rotate, then scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: glm::Mat4,
}

impl Transform {
    /// No displacement.
    pub fn identity() -> Self {
        Self {
            matrix: glm::Mat4::identity(),
        }
    }

    /// Translate in the current local frame.
    pub fn translated(&self, dx: f32, dy: f32, dz: f32) -> Self {
        Self {
            matrix: glm::translate(&self.matrix, &glm::vec3(dx, dy, dz)),
        }
    }

    /// Rotate about the given axis, right-handed. Degrees at the public
    /// boundary.
    pub fn rotated(&self, degrees: f32, x: f32, y: f32, z: f32) -> Self {
        Self {
            matrix: glm::rotate(&self.matrix, degrees.to_radians(), &glm::vec3(x, y, z)),
        }
    }

    /// Non-uniform scale in the current local frame.
    pub fn scaled(&self, sx: f32, sy: f32, sz: f32) -> Self {
        Self {
            matrix: glm::scale(&self.matrix, &glm::vec3(sx, sy, sz)),
        }
    }

    pub fn matrix(&self) -> &glm::Mat4 {
        &self.matrix
    }

    /// Translation component (fourth column).
    pub fn translation(&self) -> glm::Vec3 {
        glm::vec3(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        )
    }

    /// Column-major array for GPU upload.
    pub fn to_cols_array(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        out.copy_from_slice(self.matrix.as_slice());
        out
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn vec_close(a: glm::Vec3, b: glm::Vec3) -> bool {
        (a - b).norm() < EPS
    }

    #[test]
    fn identity_has_no_displacement() {
        let t = Transform::identity();
        assert_eq!(*t.matrix(), glm::Mat4::identity());
        assert!(vec_close(t.translation(), glm::vec3(0.0, 0.0, 0.0)));
    }

    #[test]
    fn rotation_uses_degrees() {
        // 90 degrees about +Z sends +X to +Y.
        let t = Transform::identity().rotated(90.0, 0.0, 0.0, 1.0);
        let x = t.matrix() * glm::vec4(1.0, 0.0, 0.0, 0.0);
        assert!(vec_close(x.xyz(), glm::vec3(0.0, 1.0, 0.0)));
    }

    #[test]
    fn composition_is_post_multiplied() {
        // Translate then rotate: a later translation happens in the
        // rotated local frame.
        let t = Transform::identity()
            .rotated(90.0, 0.0, 0.0, 1.0)
            .translated(1.0, 0.0, 0.0);
        // Local +X displacement lands on world +Y.
        assert!(vec_close(t.translation(), glm::vec3(0.0, 1.0, 0.0)));
    }

    #[test]
    fn scale_affects_later_translations() {
        let t = Transform::identity()
            .scaled(1.0, 1.0, 0.15)
            .translated(0.0, 0.0, 1.0);
        // One local z unit is one scaled length in the world.
        assert!(vec_close(t.translation(), glm::vec3(0.0, 0.0, 0.15)));
    }

    #[test]
    fn composing_copies_instead_of_aliasing() {
        let parent = Transform::identity().translated(1.0, 2.0, 3.0);
        let before = *parent.matrix();
        let child = parent.rotated(45.0, 0.0, 1.0, 0.0).scaled(2.0, 2.0, 2.0);
        assert_eq!(*parent.matrix(), before);
        assert_ne!(*child.matrix(), before);
    }

    #[test]
    fn non_finite_inputs_do_not_panic() {
        let t = Transform::identity()
            .rotated(f32::NAN, 0.0, 0.0, 1.0)
            .translated(f32::INFINITY, 0.0, 0.0)
            .scaled(f32::NEG_INFINITY, 1.0, 1.0);
        let _ = t.to_cols_array();
    }
}
