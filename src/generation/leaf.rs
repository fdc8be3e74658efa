//! Leaf cluster builder
//!
//! Builds the small flat blades attached along the upper part of a terminal
//! branch. Each leaf is two triangles: a horizontal blade pointing away from
//! the branch axis, and a vertical cross-fold at the blade's outer reach so
//! the leaf stays visible edge-on.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::generation::rng::SimpleRng;
use crate::mesh::TriangleMesh;

/// Mesh for one cluster of leaves, positions and normals fully derived from
/// the owning branch's geometry.
pub type LeafMesh = TriangleMesh;

/// Number of leaves in every cluster
pub const LEAF_COUNT: usize = 20;

/// Vertices each leaf contributes (two triangles)
pub const VERTICES_PER_LEAF: usize = 6;

/// Fraction of the branch length where the lowest leaf sits
const START_OFFSET: f32 = 0.2;
/// Fraction of the branch length where the highest leaf sits
const END_OFFSET: f32 = 1.0;

/// Leaf blade length at accumulated scale 1.0
const LEAF_LENGTH_BASE: f32 = 0.15;
/// Leaf blade width at accumulated scale 1.0
const LEAF_WIDTH_BASE: f32 = 0.1;

/// Build the leaf cluster for a branch of the given `length` and `radius`.
///
/// Leaf size is divided by `acc_scale_down` so that leaves on deeply nested,
/// already-shrunk branches come out at a consistent absolute size once the
/// ancestor scales are applied. Attachment angles are random; heights along
/// the branch are fixed by leaf index.
pub fn build(length: f32, radius: f32, acc_scale_down: f32, rng: &mut SimpleRng) -> LeafMesh {
    let leaf_length = LEAF_LENGTH_BASE / acc_scale_down;
    let leaf_width = LEAF_WIDTH_BASE / acc_scale_down;
    let half_width = leaf_width / 2.0;

    let mut mesh = TriangleMesh::with_capacity(LEAF_COUNT * VERTICES_PER_LEAF);

    for i in 0..LEAF_COUNT {
        let t = i as f32 / (LEAF_COUNT - 1) as f32;
        let angle = rng.range(0.0, TAU);
        let h = length * (START_OFFSET + t * (END_OFFSET - START_OFFSET));

        // Radial direction away from the branch axis and its perpendicular
        let (vx, vz) = (angle.cos(), angle.sin());
        let reach = radius + leaf_length;

        // Inner point on the branch surface
        let inner = Vec3::new(radius * vx, h, radius * vz);

        // Blade: inner point plus two outer points offset sideways
        let left = Vec3::new(
            reach * vx - half_width * vz,
            h,
            reach * vz + half_width * vx,
        );
        let right = Vec3::new(
            reach * vx + half_width * vz,
            h,
            reach * vz - half_width * vx,
        );
        mesh.push_triangle(inner, left, right, Vec3::Z);

        // Cross-fold: same inner point, outer points offset vertically
        let upper = Vec3::new(reach * vx, h + half_width, reach * vz);
        let lower = Vec3::new(reach * vx, h - half_width, reach * vz);
        mesh.push_triangle(inner, upper, lower, Vec3::Y);
    }

    mesh
}
