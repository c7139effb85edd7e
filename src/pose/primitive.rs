use super::transform::Transform;

/// RGBA color, each component in [0, 1].
pub type Color = [f32; 4];

/// One independently colored, independently transformed unit cube.
///
/// Owned by the frame list and rebuilt from scratch every tick; a
/// primitive has no identity beyond its position in that list. Only one
/// shape kind exists, so there is no render polymorphism here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub color: Color,
    pub transform: Transform,
}

impl Primitive {
    pub fn new(color: Color, transform: Transform) -> Self {
        Self { color, transform }
    }
}
