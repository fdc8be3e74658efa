//! Procedural tree geometry generation
//!
//! Pure functions over numeric parameters plus an explicit RNG: the branch
//! builder emits one tapered trunk per call and the child transforms for the
//! next recursion level, the leaf builder emits the blade quads attached to
//! terminal branches. Nothing here touches the GPU.

pub mod rng;
pub mod branch;
pub mod leaf;

pub use rng::SimpleRng;
pub use branch::{BranchGeometry, ChildBranchSpec, TrunkSpec};
pub use leaf::LeafMesh;
