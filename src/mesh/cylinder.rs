//! Tapered cylinder tessellation

use std::f32::consts::TAU;

use glam::Vec3;

use crate::mesh::TriangleMesh;

/// Tessellate an open-ended tapered cylinder spanning `y` in `[0, height]`,
/// with `base_radius` at the bottom and `top_radius` at the top.
///
/// Side normals are smooth per ring position and tilted to account for the
/// taper. Both end caps are filled with triangle fans.
pub fn tessellate(base_radius: f32, top_radius: f32, height: f32, segments: u32) -> TriangleMesh {
    let segments = segments.max(3);
    // 2 side triangles plus 2 cap triangles per segment
    let mut mesh = TriangleMesh::with_capacity(segments as usize * 12);

    // The taper tilts the side normal: (cos, slope, sin) normalized, where
    // slope = (rb - rt) / h for the cone's surface
    let slope = if height.abs() > f32::EPSILON {
        (base_radius - top_radius) / height
    } else {
        0.0
    };

    let ring_point = |i: u32, radius: f32, y: f32| {
        let a = TAU * (i % segments) as f32 / segments as f32;
        (Vec3::new(radius * a.cos(), y, radius * a.sin()), a)
    };
    let side_normal = |a: f32| Vec3::new(a.cos(), slope, a.sin()).normalize();

    for i in 0..segments {
        let (b0, a0) = ring_point(i, base_radius, 0.0);
        let (b1, a1) = ring_point(i + 1, base_radius, 0.0);
        let (t0, _) = ring_point(i, top_radius, height);
        let (t1, _) = ring_point(i + 1, top_radius, height);

        let n0 = side_normal(a0);
        let n1 = side_normal(a1);

        // Side quad, wound counter-clockwise seen from outside
        mesh.push_vertex(b0, n0);
        mesh.push_vertex(t1, n1);
        mesh.push_vertex(t0, n0);

        mesh.push_vertex(b0, n0);
        mesh.push_vertex(b1, n1);
        mesh.push_vertex(t1, n1);

        // Bottom cap faces down, top cap faces up
        mesh.push_triangle(Vec3::ZERO, b0, b1, Vec3::NEG_Y);
        mesh.push_triangle(Vec3::new(0.0, height, 0.0), t1, t0, Vec3::Y);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_count() {
        let mesh = tessellate(1.0, 0.75, 2.0, 6);
        // 2 side + 2 cap triangles per segment
        assert_eq!(mesh.triangle_count(), 6 * 4);
        assert_eq!(mesh.positions.len(), mesh.normals.len());
    }

    #[test]
    fn test_segment_floor() {
        let mesh = tessellate(1.0, 1.0, 1.0, 0);
        assert_eq!(mesh.triangle_count(), 3 * 4);
    }

    #[test]
    fn test_spans_zero_to_height() {
        let mesh = tessellate(0.5, 0.25, 3.0, 6);
        let min_y = mesh.positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        let max_y = mesh.positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert_eq!(min_y, 0.0);
        assert_eq!(max_y, 3.0);
    }

    #[test]
    fn test_ring_radii() {
        let mesh = tessellate(0.4, 0.3, 2.0, 8);
        for p in &mesh.positions {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            if p.y == 0.0 {
                assert!(r <= 0.4 + 1e-5);
            } else if p.y == 2.0 {
                assert!(r <= 0.3 + 1e-5);
            }
        }
    }

    #[test]
    fn test_normals_unit_length() {
        let mesh = tessellate(1.0, 0.5, 2.0, 6);
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_side_normals_tilt_with_taper() {
        // A strongly tapered cylinder has side normals pointing upward as
        // well as outward
        let mesh = tessellate(1.0, 0.0, 1.0, 6);
        let side = mesh.normals[0];
        assert!(side.y > 0.0);

        // No taper means horizontal side normals
        let straight = tessellate(1.0, 1.0, 1.0, 6);
        assert!(straight.normals[0].y.abs() < 1e-6);
    }
}
