// Pose builder: expands the joint-angle parameters into the frame's
// primitive list using the fixed ant topology.

use super::params::PoseParameters;
use super::primitive::{Color, Primitive};
use super::transform::Transform;

/// Primitives per frame: 3 body + 4 antenna + 18 leg + 2 eye segments.
pub const FRAME_PRIMITIVE_COUNT: usize = 27;

/// Leg pairs per side.
const LEG_PAIRS: usize = 3;
/// Body-axis spacing between consecutive leg pairs.
const LEG_SPACING: f32 = 0.2;
/// Full leg reach; each segment derives its length from this.
const LEG_LENGTH: f32 = 0.35;

// Rest-pose offsets for the three leg joints. Cosmetic tuning; there is
// no kinematic derivation behind the values.
const COXA_BASE_DEG: f32 = 30.0;
const FEMUR_BASE_DEG: f32 = 25.0;
const TIBIA_BASE_DEG: f32 = 15.0;
/// The tibia follows the knee signal at half strength.
const TIBIA_FOLLOW_FACTOR: f32 = 0.5;

const ANTENNA_TILT_DEG: f32 = 30.0;

const BODY_COLOR: Color = [0.3, 0.2, 0.2, 1.0];
const JOINT_COLOR: Color = [0.25, 0.15, 0.15, 1.0];
const TIBIA_COLOR: Color = [0.35, 0.25, 0.25, 1.0];
const EYE_COLOR: Color = [0.0, 0.0, 0.0, 1.0];

/// Expands [`PoseParameters`] into the ordered primitive list for one
/// frame.
///
/// The list is an arena: allocated once, cleared and refilled every tick,
/// always in the same fixed topology order (body, antennae, legs, eyes).
/// Insertion order only matters for the coloring convention; depth testing
/// in the renderer resolves visibility.
pub struct PoseBuilder {
    primitives: Vec<Primitive>,
}

impl PoseBuilder {
    pub fn new() -> Self {
        Self {
            primitives: Vec::with_capacity(FRAME_PRIMITIVE_COUNT),
        }
    }

    /// Rebuilds the full primitive list for one frame.
    ///
    /// Total over the reals: any angle values, finite or not, yield the
    /// same 27-entry list without panicking.
    pub fn build(&mut self, params: PoseParameters) -> &[Primitive] {
        self.primitives.clear();

        self.push_body();

        // Right antenna, then left.
        self.push_antenna(0.02, 1.0);
        self.push_antenna(-0.02, -1.0);

        // Three leg pairs front to back, right leg then left per pair.
        for pair in 0..LEG_PAIRS {
            let z = -0.15 + pair as f32 * LEG_SPACING;
            self.push_leg(0.12, z, -1.0, params);
            self.push_leg(-0.12, z, 1.0, params);
        }

        self.push_eyes();

        debug_assert_eq!(self.primitives.len(), FRAME_PRIMITIVE_COUNT);
        &self.primitives
    }

    /// The list built by the most recent [`build`](Self::build) call.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    fn push(&mut self, color: Color, transform: Transform) {
        self.primitives.push(Primitive::new(color, transform));
    }

    fn push_body(&mut self) {
        let head = Transform::identity()
            .translated(-0.08, 0.05, -0.15)
            .scaled(0.15, 0.15, 0.15);
        self.push(BODY_COLOR, head);

        let thorax = Transform::identity()
            .translated(-0.1, 0.0, 0.0)
            .scaled(0.2, 0.15, 0.2);
        self.push(BODY_COLOR, thorax);

        let abdomen = Transform::identity()
            .translated(-0.15, -0.03, 0.2)
            .scaled(0.3, 0.25, 0.35);
        self.push(BODY_COLOR, abdomen);
    }

    /// Two chained segments tilted away from the head. The tip composes
    /// onto a copy of the base's transform, so it originates exactly where
    /// the base ends (one base length along the base's scaled local z).
    fn push_antenna(&mut self, x: f32, side: f32) {
        let base = Transform::identity()
            .translated(x, 0.15, -0.2)
            .rotated(side * ANTENNA_TILT_DEG, 1.0, 0.0, 0.0)
            .scaled(0.01, 0.01, 0.15);
        self.push(JOINT_COLOR, base);

        let tip = base
            .translated(0.0, 0.0, 1.0)
            .rotated(side * ANTENNA_TILT_DEG, 1.0, 0.0, 0.0)
            .scaled(1.0, 1.0, 0.8);
        self.push(BODY_COLOR, tip);
    }

    /// Coxa, femur, tibia. The joint signal is inherited and attenuated
    /// down the chain: the coxa reads the full upper angle, the femur the
    /// full lower angle, the tibia half of it. `side` flips the rotation
    /// direction so the two sides flex mirror-symmetrically.
    fn push_leg(&mut self, x: f32, z: f32, side: f32, params: PoseParameters) {
        let segment = LEG_LENGTH / 3.0;

        let coxa = Transform::identity()
            .translated(x, -0.05, z)
            .rotated(side * (COXA_BASE_DEG + params.upper_angle), 0.0, 0.0, 1.0)
            .scaled(0.03, 0.03, segment);
        self.push(JOINT_COLOR, coxa);

        let femur = coxa
            .translated(0.0, 0.0, segment)
            .rotated(side * (FEMUR_BASE_DEG + params.lower_angle), 0.0, 0.0, 1.0)
            .scaled(1.0, 1.0, 1.4);
        self.push(BODY_COLOR, femur);

        let tibia = femur
            .translated(0.0, 0.0, segment * 1.4)
            .rotated(
                side * (TIBIA_BASE_DEG + params.lower_angle * TIBIA_FOLLOW_FACTOR),
                0.0,
                0.0,
                1.0,
            )
            .scaled(0.8, 0.8, 1.5);
        self.push(TIBIA_COLOR, tibia);
    }

    fn push_eyes(&mut self) {
        for x in [-0.03, 0.03] {
            let eye = Transform::identity()
                .translated(x, 0.1, -0.22)
                .scaled(0.03, 0.03, 0.03);
            self.push(EYE_COLOR, eye);
        }
    }
}

impl Default for PoseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_glm as glm;

    const EPS: f32 = 1e-4;

    // Frame list layout: 0..3 body, 3..7 antennae (right base/tip, left
    // base/tip), 7..25 legs, 25..27 eyes.
    const LEG_BASE: usize = 7;
    const RIGHT: usize = 0;
    const LEFT: usize = 1;
    const COXA: usize = 0;
    const FEMUR: usize = 1;
    const TIBIA: usize = 2;

    fn leg_index(pair: usize, side: usize, segment: usize) -> usize {
        LEG_BASE + pair * 6 + side * 3 + segment
    }

    fn build(upper: f32, lower: f32) -> Vec<Primitive> {
        let mut builder = PoseBuilder::new();
        builder
            .build(PoseParameters {
                upper_angle: upper,
                lower_angle: lower,
                global_yaw: 0.0,
            })
            .to_vec()
    }

    /// Z-rotation angle of a leg-segment matrix in degrees, read from the
    /// normalized first basis column (scale divides out).
    fn z_rotation_deg(m: &glm::Mat4) -> f32 {
        m[(1, 0)].atan2(m[(0, 0)]).to_degrees()
    }

    #[test]
    fn frame_has_fixed_primitive_count_for_any_angles() {
        for (upper, lower) in [
            (0.0, 0.0),
            (15.0, -20.0),
            (-720.0, 1234.5),
            (1e9, -1e9),
            (f32::NAN, f32::INFINITY),
        ] {
            let frame = build(upper, lower);
            assert_eq!(frame.len(), FRAME_PRIMITIVE_COUNT);
        }
    }

    #[test]
    fn frame_order_is_topology_fixed() {
        let frame = build(10.0, 5.0);
        // Body shares the base color, eyes are black, tibiae carry the
        // lightest shade.
        for prim in &frame[0..3] {
            assert_eq!(prim.color, BODY_COLOR);
        }
        for prim in &frame[25..27] {
            assert_eq!(prim.color, EYE_COLOR);
        }
        for pair in 0..3 {
            for side in [RIGHT, LEFT] {
                assert_eq!(frame[leg_index(pair, side, COXA)].color, JOINT_COLOR);
                assert_eq!(frame[leg_index(pair, side, FEMUR)].color, BODY_COLOR);
                assert_eq!(frame[leg_index(pair, side, TIBIA)].color, TIBIA_COLOR);
            }
        }
    }

    #[test]
    fn rebuild_with_same_inputs_is_bit_identical() {
        let a = build(12.25, -7.5);
        let b = build(12.25, -7.5);
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.transform.matrix(), pb.transform.matrix());
            assert_eq!(pa.color, pb.color);
        }
    }

    #[test]
    fn rest_pose_rotations_are_the_base_offsets() {
        let frame = build(0.0, 0.0);
        for pair in 0..3 {
            let right_coxa = &frame[leg_index(pair, RIGHT, COXA)];
            let left_coxa = &frame[leg_index(pair, LEFT, COXA)];
            assert!((z_rotation_deg(right_coxa.transform.matrix()) + COXA_BASE_DEG).abs() < EPS);
            assert!((z_rotation_deg(left_coxa.transform.matrix()) - COXA_BASE_DEG).abs() < EPS);

            // Femur and tibia rotations accumulate down the chain.
            let left_femur = &frame[leg_index(pair, LEFT, FEMUR)];
            let left_tibia = &frame[leg_index(pair, LEFT, TIBIA)];
            assert!(
                (z_rotation_deg(left_femur.transform.matrix()) - (COXA_BASE_DEG + FEMUR_BASE_DEG))
                    .abs()
                    < EPS
            );
            assert!(
                (z_rotation_deg(left_tibia.transform.matrix())
                    - (COXA_BASE_DEG + FEMUR_BASE_DEG + TIBIA_BASE_DEG))
                    .abs()
                    < EPS
            );
        }
    }

    #[test]
    fn left_and_right_legs_are_mirror_symmetric() {
        let frame = build(9.0, -4.0);
        for pair in 0..3 {
            for segment in [COXA, FEMUR, TIBIA] {
                let right = frame[leg_index(pair, RIGHT, segment)].transform;
                let left = frame[leg_index(pair, LEFT, segment)].transform;
                let r = z_rotation_deg(right.matrix());
                let l = z_rotation_deg(left.matrix());
                assert!((r + l).abs() < EPS, "pair {pair} segment {segment}: {r} vs {l}");
            }
        }
    }

    #[test]
    fn tibia_chains_continuously_onto_the_coxa() {
        // Everything below the coxa depends only on the lower angle, so
        // coxa^-1 * tibia must not move when the upper angle changes.
        // Looser tolerance: the coxa inverse divides out its 0.03 scale.
        let eps = 1e-3;
        let lower = -6.0;
        let frames = [build(0.0, lower), build(37.0, lower)];
        for pair in 0..3 {
            for side in [RIGHT, LEFT] {
                let rel: Vec<glm::Mat4> = frames
                    .iter()
                    .map(|frame| {
                        let coxa = frame[leg_index(pair, side, COXA)].transform;
                        let tibia = frame[leg_index(pair, side, TIBIA)].transform;
                        glm::inverse(coxa.matrix()) * tibia.matrix()
                    })
                    .collect();
                let diff: f32 = (rel[0] - rel[1]).abs().max();
                assert!(diff < eps, "pair {pair} side {side}: drift {diff}");
            }
        }
    }

    #[test]
    fn antenna_tip_starts_where_base_ends() {
        let frame = build(0.0, 0.0);
        for (base_idx, tip_idx) in [(3, 4), (5, 6)] {
            let base = frame[base_idx].transform;
            let tip = frame[tip_idx].transform;
            // One base length along the base's local z is the base's far
            // end in world space.
            let base_end = base.translated(0.0, 0.0, 1.0).translation();
            assert!((tip.translation() - base_end).norm() < EPS);
        }
    }
}
