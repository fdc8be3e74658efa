//! Recursive branch geometry builder
//!
//! One call describes one branch: the tapered trunk segment to draw, an
//! optional leaf cluster, and the transforms of the child branches to recurse
//! into. The builder itself never recurses; the scene assembler expands the
//! returned child specs, so the geometry stays decoupled from whatever
//! consumes it.

use glam::{Mat4, Quat, Vec3};

use crate::generation::leaf::{self, LeafMesh};
use crate::generation::rng::SimpleRng;

/// Shrink factor applied per recursion level, both to the trunk's top radius
/// and to each child's uniform transform scale
pub const SCALE_DOWN: f32 = 0.75;

/// Attachment fraction of the first child — the "leader" branch that keeps
/// the tree growing near the top
pub const LEADER_ATTACH_FRACTION: f32 = 0.97;

/// Lowest attachment fraction for non-leader children
pub const MIN_ATTACH_FRACTION: f32 = 0.5;

/// Lean angle range in degrees — always positive, branches reach outward and
/// upward, never droop
pub const LEAN_RANGE_DEG: (f32, f32) = (20.0, 60.0);

/// Radial segments of every trunk cylinder
pub const TRUNK_SEGMENTS: u32 = 6;

/// Highest level that still gets a leaf cluster
const LEAF_LEVEL_MAX: i32 = 2;

/// One tapered trunk cylinder, spanning `[0, height]` along the branch axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrunkSpec {
    pub base_radius: f32,
    pub top_radius: f32,
    pub height: f32,
    pub radial_segments: u32,
}

/// Parameters for one child branch, derived from its parent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildBranchSpec {
    /// Fixed angle around the parent's vertical axis, from the level's angle set
    pub azimuth_deg: f32,
    /// Random jitter within the child's angular sector
    pub twist_deg: f32,
    /// Outward lean away from the parent axis
    pub lean_deg: f32,
    /// Attachment height as a fraction of the parent's height
    pub attach_fraction: f32,
    /// Remaining recursion depth for the child
    pub level: i32,
    /// Height passed to the child (unchanged; shrink comes from the transform scale)
    pub height: f32,
    /// Radius passed to the child (unchanged, as above)
    pub radius: f32,
    /// Parent's accumulated scale-down times [`SCALE_DOWN`]
    pub acc_scale_down: f32,
}

impl ChildBranchSpec {
    /// Local transform of the child relative to its parent branch frame.
    ///
    /// Uniform scale commutes with rotation, so the azimuth and twist yaw
    /// angles collapse into a single Y rotation ahead of the lean.
    pub fn local_transform(&self, parent_height: f32) -> Mat4 {
        let attach = Vec3::new(0.0, self.attach_fraction * parent_height, 0.0);
        let rotation = Quat::from_rotation_y((self.azimuth_deg + self.twist_deg).to_radians())
            * Quat::from_rotation_z(self.lean_deg.to_radians());
        Mat4::from_scale_rotation_translation(Vec3::splat(SCALE_DOWN), rotation, attach)
    }
}

/// Everything one branch contributes to the tree
#[derive(Clone, Debug, Default)]
pub struct BranchGeometry {
    pub trunk: Option<TrunkSpec>,
    pub leaves: Option<LeafMesh>,
    pub children: Vec<ChildBranchSpec>,
}

impl BranchGeometry {
    /// Whether this branch produced no geometry and no children
    pub fn is_empty(&self) -> bool {
        self.trunk.is_none() && self.leaves.is_none() && self.children.is_empty()
    }
}

/// Azimuth angle set for a level: more branches fan out near the trunk,
/// fewer toward the tips
fn branch_angles(level: i32) -> &'static [f32] {
    if level > 5 {
        &[0.0, 90.0, 180.0, 270.0]
    } else if level > 2 {
        &[0.0, 120.0, 240.0]
    } else {
        &[0.0, 180.0]
    }
}

/// Build the geometry for one branch.
///
/// `level` is the remaining recursion depth; zero or below is the terminal
/// case and returns an empty result. `acc_scale_down` is the product of all
/// ancestor scale factors, used to keep leaf sizes visually consistent.
pub fn build(
    level: i32,
    height: f32,
    radius: f32,
    acc_scale_down: f32,
    rng: &mut SimpleRng,
) -> BranchGeometry {
    if level <= 0 {
        return BranchGeometry::default();
    }

    let trunk = TrunkSpec {
        base_radius: radius,
        top_radius: radius * SCALE_DOWN,
        height,
        radial_segments: TRUNK_SEGMENTS,
    };

    let leaves = (level <= LEAF_LEVEL_MAX)
        .then(|| leaf::build(height, radius, acc_scale_down, rng));

    let mut children = Vec::new();
    if level > 1 {
        let angles = branch_angles(level);
        let sector = 360.0 / angles.len() as f32;

        for (index, &azimuth_deg) in angles.iter().enumerate() {
            // The first child always attaches near the tip so every branch
            // keeps a leader continuing its direction
            let attach_fraction = if index == 0 {
                LEADER_ATTACH_FRACTION
            } else {
                rng.range(MIN_ATTACH_FRACTION, LEADER_ATTACH_FRACTION)
            };
            let lean_deg = rng.range(LEAN_RANGE_DEG.0, LEAN_RANGE_DEG.1);
            let twist_deg = rng.range(-sector / 2.0, sector / 2.0);

            children.push(ChildBranchSpec {
                azimuth_deg,
                twist_deg,
                lean_deg,
                attach_fraction,
                level: level - 1,
                height,
                radius,
                acc_scale_down: acc_scale_down * SCALE_DOWN,
            });
        }
    }

    BranchGeometry {
        trunk: Some(trunk),
        leaves,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_level_is_empty() {
        for level in [0, -1, -10] {
            let mut rng = SimpleRng::new(1);
            let geo = build(level, 2.0, 0.1, 1.0, &mut rng);
            assert!(geo.is_empty(), "level {} should produce nothing", level);
        }
    }

    #[test]
    fn test_trunk_dimensions() {
        let mut rng = SimpleRng::new(1);
        let geo = build(4, 2.5, 0.2, 1.0, &mut rng);

        let trunk = geo.trunk.expect("level >= 1 always has a trunk");
        assert_eq!(trunk.base_radius, 0.2);
        assert!((trunk.top_radius - 0.15).abs() < 1e-6);
        assert_eq!(trunk.height, 2.5);
        assert_eq!(trunk.radial_segments, 6);
    }

    #[test]
    fn test_leaves_only_near_tips() {
        for (level, expect_leaves) in [(1, true), (2, true), (3, false), (6, false)] {
            let mut rng = SimpleRng::new(3);
            let geo = build(level, 1.0, 0.1, 0.5625, &mut rng);
            assert_eq!(
                geo.leaves.is_some(),
                expect_leaves,
                "level {} leaves",
                level
            );
        }
    }

    #[test]
    fn test_child_count_per_level() {
        for (level, expected) in [(0, 0), (1, 0), (2, 2), (3, 3), (5, 3), (6, 4), (8, 4)] {
            let mut rng = SimpleRng::new(10);
            let geo = build(level, 1.0, 0.1, 1.0, &mut rng);
            assert_eq!(geo.children.len(), expected, "level {}", level);
        }
    }

    #[test]
    fn test_leader_attaches_near_tip() {
        for seed in 0..50 {
            let mut rng = SimpleRng::new(seed);
            let geo = build(6, 1.0, 0.1, 1.0, &mut rng);
            assert_eq!(geo.children[0].attach_fraction, LEADER_ATTACH_FRACTION);
        }
    }

    #[test]
    fn test_non_leader_attach_range() {
        for seed in 0..50 {
            let mut rng = SimpleRng::new(seed);
            let geo = build(6, 1.0, 0.1, 1.0, &mut rng);
            for child in &geo.children[1..] {
                assert!(child.attach_fraction >= MIN_ATTACH_FRACTION);
                assert!(child.attach_fraction <= LEADER_ATTACH_FRACTION);
            }
        }
    }

    #[test]
    fn test_lean_always_outward() {
        for seed in 0..50 {
            let mut rng = SimpleRng::new(seed);
            let geo = build(4, 1.0, 0.1, 1.0, &mut rng);
            for child in &geo.children {
                assert!(child.lean_deg >= LEAN_RANGE_DEG.0);
                assert!(child.lean_deg <= LEAN_RANGE_DEG.1);
            }
        }
    }

    #[test]
    fn test_twist_within_sector() {
        // 3 angles at level 4 leaves a 120 degree sector, so +-60 of jitter
        for seed in 0..50 {
            let mut rng = SimpleRng::new(seed);
            let geo = build(4, 1.0, 0.1, 1.0, &mut rng);
            for child in &geo.children {
                assert!(child.twist_deg.abs() <= 60.0);
            }
        }
        // 4 angles at level 6: +-45
        for seed in 0..50 {
            let mut rng = SimpleRng::new(seed);
            let geo = build(6, 1.0, 0.1, 1.0, &mut rng);
            for child in &geo.children {
                assert!(child.twist_deg.abs() <= 45.0);
            }
        }
    }

    #[test]
    fn test_scale_down_chain() {
        // Following any child chain from level 6 multiplies the accumulated
        // scale by 0.75 per level: 1.0, 0.75, 0.5625, ...
        let mut rng = SimpleRng::new(42);
        let mut level = 6;
        let mut acc = 1.0f32;
        let mut expected = 1.0f32;

        for _ in 0..5 {
            assert!((acc - expected).abs() < 1e-6);
            let geo = build(level, 1.0, 0.1, acc, &mut rng);
            let child = &geo.children[0];
            assert!((child.acc_scale_down - acc * SCALE_DOWN).abs() < 1e-6);
            level = child.level;
            acc = child.acc_scale_down;
            expected *= SCALE_DOWN;
        }

        // Level 1 remains: trunk and leaves, no further children
        let geo = build(level, 1.0, 0.1, acc, &mut rng);
        assert_eq!(level, 1);
        assert!(geo.trunk.is_some());
        assert!(geo.children.is_empty());
    }

    #[test]
    fn test_child_inherits_dimensions() {
        let mut rng = SimpleRng::new(8);
        let geo = build(5, 2.0, 0.3, 1.0, &mut rng);
        for child in &geo.children {
            assert_eq!(child.height, 2.0);
            assert_eq!(child.radius, 0.3);
            assert_eq!(child.level, 4);
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let mut a = SimpleRng::new(77);
        let mut b = SimpleRng::new(77);
        let geo_a = build(6, 1.5, 0.12, 1.0, &mut a);
        let geo_b = build(6, 1.5, 0.12, 1.0, &mut b);
        assert_eq!(geo_a.children, geo_b.children);
    }

    #[test]
    fn test_local_transform_attaches_on_axis() {
        let spec = ChildBranchSpec {
            azimuth_deg: 120.0,
            twist_deg: -15.0,
            lean_deg: 30.0,
            attach_fraction: 0.97,
            level: 3,
            height: 2.0,
            radius: 0.1,
            acc_scale_down: 0.75,
        };

        let m = spec.local_transform(2.0);
        // The child's origin lands on the parent axis at the attach height
        let origin = m.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.97 * 2.0, 0.0)).length() < 1e-5);

        // Directions shrink by the fixed per-level scale
        let unit = m.transform_vector3(Vec3::Y);
        assert!((unit.length() - SCALE_DOWN).abs() < 1e-5);
    }
}
