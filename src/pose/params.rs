/// Per-frame animation parameters, all in degrees.
///
/// Produced by the animation driver each tick and passed by value into the
/// pose builder; no other writer exists. While animating, `upper_angle`
/// and `lower_angle` are always derived from one shared phase value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseParameters {
    /// Hip joint signal, read by the coxa segments.
    pub upper_angle: f32,
    /// Knee joint signal, read (attenuated) by femur and tibia segments.
    pub lower_angle: f32,
    /// Whole-figure rotation about +Y, applied by the renderer before
    /// every primitive's model matrix.
    pub global_yaw: f32,
}
