// Hierarchical transform and procedural pose engine
//
// Per frame: the AnimationDriver maps elapsed time to PoseParameters, the
// PoseBuilder expands them into the fixed 27-primitive frame list, and the
// renderer draws the list in order.

pub mod builder;
pub mod driver;
pub mod params;
pub mod primitive;
pub mod transform;

pub use builder::*;
pub use driver::*;
pub use params::*;
pub use primitive::*;
pub use transform::*;
