//! Scene assembly: trees, ground and palette

pub mod config;
pub mod assembler;

pub use assembler::{Scene, SceneStats, assemble};
pub use config::SceneConfig;

use glam::Vec3;

/// Sky / clear color
pub const SKY_COLOR: Vec3 = Vec3::new(0.404, 0.671, 0.922);
/// Bark surface color
pub const BARK_COLOR: Vec3 = Vec3::new(0.235, 0.2, 0.165);
/// Foliage surface color
pub const FOLIAGE_COLOR: Vec3 = Vec3::new(0.106, 0.318, 0.176);
/// Ground plane color
pub const GROUND_COLOR: Vec3 = Vec3::new(0.859, 0.745, 0.631);
/// Grid helper line color
pub const GRID_COLOR: Vec3 = Vec3::new(0.5, 0.5, 0.5);

/// Directional light position; the light points from here toward the origin
pub const SUN_POSITION: Vec3 = Vec3::new(5.0, 50.0, 5.0);
/// Flat ambient term added to the directional light
pub const AMBIENT_LIGHT: Vec3 = Vec3::new(0.498, 0.498, 0.498);
