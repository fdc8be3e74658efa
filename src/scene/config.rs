//! Scene configuration

use glam::Vec3;

/// Parameters driving scene assembly.
///
/// Everything random in the scene derives from `seed`, so equal configs
/// assemble identical scenes.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Seed for all procedural randomness
    pub seed: u64,
    /// Recursion depth of each tree
    pub level: i32,
    /// Ground positions where trees are planted
    pub root_positions: Vec<Vec3>,
    /// Trunk height; randomized per tree when `None`
    pub base_height: Option<f32>,
    /// Trunk base radius; randomized per tree when `None`
    pub base_radius: Option<f32>,
}

impl SceneConfig {
    /// Single tree at the origin with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Plant an `n` by `n` grid of trees, 5 units apart, centered on the origin
    pub fn with_grid(mut self, n: u32) -> Self {
        let n = n.max(1) as i32;
        let spacing = 5.0;
        let offset = (n - 1) as f32 * spacing / 2.0;

        self.root_positions = (0..n)
            .flat_map(|ix| {
                (0..n).map(move |iz| {
                    Vec3::new(
                        ix as f32 * spacing - offset,
                        0.0,
                        iz as f32 * spacing - offset,
                    )
                })
            })
            .collect();
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            level: 6,
            root_positions: vec![Vec3::ZERO],
            base_height: None,
            base_radius: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_single_tree() {
        let config = SceneConfig::new(7);
        assert_eq!(config.seed, 7);
        assert_eq!(config.level, 6);
        assert_eq!(config.root_positions, vec![Vec3::ZERO]);
    }

    #[test]
    fn test_grid_positions() {
        let config = SceneConfig::new(0).with_grid(3);
        assert_eq!(config.root_positions.len(), 9);

        // Centered on the origin, corners at +-5
        assert_eq!(config.root_positions[0], Vec3::new(-5.0, 0.0, -5.0));
        assert_eq!(config.root_positions[8], Vec3::new(5.0, 0.0, 5.0));
        assert!(config.root_positions.contains(&Vec3::ZERO));
    }

    #[test]
    fn test_grid_floor() {
        let config = SceneConfig::new(0).with_grid(0);
        assert_eq!(config.root_positions.len(), 1);
    }
}
