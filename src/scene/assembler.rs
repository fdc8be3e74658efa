//! Expands tree geometry into flat meshes ready for upload

use glam::{Mat4, Vec3};

use crate::generation::{SimpleRng, branch};
use crate::mesh::{TriangleMesh, cylinder};
use crate::scene::config::SceneConfig;

/// Side length of the square ground plane
pub const GROUND_SIZE: f32 = 10.0;
/// Number of grid helper divisions across the ground
pub const GRID_DIVISIONS: u32 = 10;

/// Range trunk heights are drawn from when not fixed by the config
const HEIGHT_RANGE: (f32, f32) = (1.0, 3.0);
/// Range trunk radii are drawn from when not fixed by the config
const RADIUS_RANGE: (f32, f32) = (0.05, 0.2);

/// Counters gathered while expanding the scene
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub tree_count: usize,
    pub branch_count: usize,
    pub leaf_cluster_count: usize,
    /// Deepest branch below a tree root, root itself being depth 0
    pub max_depth: u32,
}

/// Fully expanded scene geometry in world space
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub bark: TriangleMesh,
    pub foliage: TriangleMesh,
    pub ground: TriangleMesh,
    /// Grid helper as a line list, two points per segment
    pub grid_lines: Vec<Vec3>,
    pub stats: SceneStats,
}

/// Assemble the whole scene described by `config`.
///
/// Each tree gets its own RNG derived from the scene seed and the tree's
/// index, so adding trees never reshuffles the existing ones.
pub fn assemble(config: &SceneConfig) -> Scene {
    let mut scene = Scene {
        ground: ground_plane(),
        grid_lines: grid_lines(),
        ..Default::default()
    };
    scene.stats.tree_count = config.root_positions.len();

    for (index, &root) in config.root_positions.iter().enumerate() {
        let mut rng = SimpleRng::new(config.seed.wrapping_add(index as u64));
        let height = config
            .base_height
            .unwrap_or_else(|| rng.range(HEIGHT_RANGE.0, HEIGHT_RANGE.1));
        let radius = config
            .base_radius
            .unwrap_or_else(|| rng.range(RADIUS_RANGE.0, RADIUS_RANGE.1));

        expand_tree(&mut scene, config.level, height, radius, root, &mut rng);
    }

    scene
}

/// Expand one tree iteratively, accumulating world-space geometry
fn expand_tree(
    scene: &mut Scene,
    level: i32,
    height: f32,
    radius: f32,
    root: Vec3,
    rng: &mut SimpleRng,
) {
    struct Pending {
        level: i32,
        height: f32,
        radius: f32,
        acc_scale_down: f32,
        transform: Mat4,
        depth: u32,
    }

    let mut stack = vec![Pending {
        level,
        height,
        radius,
        acc_scale_down: 1.0,
        transform: Mat4::from_translation(root),
        depth: 0,
    }];

    while let Some(item) = stack.pop() {
        let geo = branch::build(item.level, item.height, item.radius, item.acc_scale_down, rng);

        if let Some(trunk) = geo.trunk {
            let mesh = cylinder::tessellate(
                trunk.base_radius,
                trunk.top_radius,
                trunk.height,
                trunk.radial_segments,
            );
            append_transformed(&mut scene.bark, &mesh, &item.transform);
            scene.stats.branch_count += 1;
            scene.stats.max_depth = scene.stats.max_depth.max(item.depth);
        }

        if let Some(leaves) = geo.leaves {
            append_transformed(&mut scene.foliage, &leaves, &item.transform);
            scene.stats.leaf_cluster_count += 1;
        }

        for child in geo.children {
            stack.push(Pending {
                level: child.level,
                height: child.height,
                radius: child.radius,
                acc_scale_down: child.acc_scale_down,
                transform: item.transform * child.local_transform(item.height),
                depth: item.depth + 1,
            });
        }
    }
}

/// Append `src` to `dst` with `transform` applied.
///
/// All branch transforms are rotation, uniform scale and translation, so
/// transforming the normal directly and renormalizing is exact.
fn append_transformed(dst: &mut TriangleMesh, src: &TriangleMesh, transform: &Mat4) {
    for (position, normal) in src.positions.iter().zip(&src.normals) {
        dst.push_vertex(
            transform.transform_point3(*position),
            transform.transform_vector3(*normal).normalize(),
        );
    }
}

fn ground_plane() -> TriangleMesh {
    let half = GROUND_SIZE / 2.0;
    let mut mesh = TriangleMesh::with_capacity(6);

    let corners = [
        Vec3::new(-half, 0.0, -half),
        Vec3::new(half, 0.0, -half),
        Vec3::new(half, 0.0, half),
        Vec3::new(-half, 0.0, half),
    ];
    mesh.push_triangle(corners[0], corners[2], corners[1], Vec3::Y);
    mesh.push_triangle(corners[0], corners[3], corners[2], Vec3::Y);
    mesh
}

fn grid_lines() -> Vec<Vec3> {
    let half = GROUND_SIZE / 2.0;
    let step = GROUND_SIZE / GRID_DIVISIONS as f32;
    // Lifted slightly above the ground plane so the lines do not z-fight it
    let y = 0.002;

    let mut lines = Vec::with_capacity((GRID_DIVISIONS as usize + 1) * 4);
    for i in 0..=GRID_DIVISIONS {
        let d = -half + i as f32 * step;
        lines.push(Vec3::new(d, y, -half));
        lines.push(Vec3::new(d, y, half));
        lines.push(Vec3::new(-half, y, d));
        lines.push(Vec3::new(half, y, d));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_tree(seed: u64, level: i32) -> Scene {
        assemble(&SceneConfig {
            seed,
            level,
            ..Default::default()
        })
    }

    #[test]
    fn test_branch_and_leaf_counts_level_6() {
        // Level 6 fans out 4 children, levels 5..3 fan out 3, level 2 fans
        // out 2 and levels 2 and 1 carry leaves:
        // branches 1 + 4 + 12 + 36 + 108 + 216, clusters 108 + 216
        let scene = single_tree(42, 6);

        assert_eq!(scene.stats.tree_count, 1);
        assert_eq!(scene.stats.branch_count, 377);
        assert_eq!(scene.stats.leaf_cluster_count, 324);
        assert_eq!(scene.stats.max_depth, 5);
    }

    #[test]
    fn test_mesh_sizes_match_stats() {
        let scene = single_tree(1, 6);

        // 6 segments * (2 side + 2 cap) triangles * 3 vertices per branch
        assert_eq!(scene.bark.vertex_count(), scene.stats.branch_count * 72);
        // 20 leaves * 6 vertices per cluster
        assert_eq!(
            scene.foliage.vertex_count(),
            scene.stats.leaf_cluster_count * 120
        );
    }

    #[test]
    fn test_level_zero_tree_is_bare() {
        let scene = single_tree(5, 0);
        assert!(scene.bark.is_empty());
        assert!(scene.foliage.is_empty());
        assert_eq!(scene.stats.branch_count, 0);
        // Ground and grid are always present
        assert_eq!(scene.ground.triangle_count(), 2);
        assert!(!scene.grid_lines.is_empty());
    }

    #[test]
    fn test_deterministic_per_seed() {
        let a = single_tree(123, 6);
        let b = single_tree(123, 6);
        assert_eq!(a.bark.positions, b.bark.positions);
        assert_eq!(a.foliage.positions, b.foliage.positions);

        let c = single_tree(124, 6);
        assert_ne!(a.bark.positions, c.bark.positions);
    }

    #[test]
    fn test_tree_rooted_at_position() {
        let root = Vec3::new(5.0, 0.0, -5.0);
        let scene = assemble(&SceneConfig {
            seed: 9,
            level: 1,
            root_positions: vec![root],
            base_height: Some(2.0),
            base_radius: Some(0.1),
            ..Default::default()
        });

        // A single level-1 branch is a trunk rooted at `root`
        for p in &scene.bark.positions {
            assert!((p.x - root.x).abs() <= 0.1 + 1e-5);
            assert!((p.z - root.z).abs() <= 0.1 + 1e-5);
            assert!(p.y >= -1e-5 && p.y <= 2.0 + 1e-5);
        }
    }

    #[test]
    fn test_grid_of_trees() {
        let scene = assemble(&SceneConfig::new(3).with_grid(3));
        assert_eq!(scene.stats.tree_count, 9);
        assert_eq!(scene.stats.branch_count, 9 * 377);
    }

    #[test]
    fn test_fixed_dimensions_override_random() {
        let scene = assemble(&SceneConfig {
            seed: 0,
            level: 1,
            base_height: Some(2.5),
            base_radius: Some(0.3),
            ..Default::default()
        });

        let max_y = scene.bark.positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert!((max_y - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_ground_and_grid_extent() {
        let scene = single_tree(0, 0);
        for p in &scene.ground.positions {
            assert!(p.x.abs() <= 5.0 && p.z.abs() <= 5.0);
            assert_eq!(p.y, 0.0);
        }
        // 11 lines in each direction, two points per line
        assert_eq!(scene.grid_lines.len(), 44);
    }
}
