//! Shape generation for scene primitives

use glam::Vec3;

use super::vertex::{LineVertex, MeshVertex, colors};
use crate::sim::{FloatingBody, StaticObstacle, Trail};

/// Boat hull in model space: a box with a pointed bow toward -Z
///
/// Ten shared vertices (bottom quad, top quad, bow bottom, bow top) with
/// flat up/down normals; the bow tip sits half a hull-length past the bow.
pub fn hull_mesh(boat: &FloatingBody) -> (Vec<MeshVertex>, Vec<u32>) {
    let hw = boat.width() / 2.0;
    let hl = boat.length() / 2.0;
    let h = boat.height();
    let tip = -hl - hl / 2.0;
    let bow_down = Vec3::new(0.0, -1.0, -1.0).normalize();
    let bow_up = Vec3::new(0.0, 1.0, -1.0).normalize();

    let vertices = vec![
        // Bottom
        MeshVertex::new(Vec3::new(-hw, 0.0, -hl), Vec3::NEG_Y, [0.0, 0.0]),
        MeshVertex::new(Vec3::new(hw, 0.0, -hl), Vec3::NEG_Y, [1.0, 0.0]),
        MeshVertex::new(Vec3::new(hw, 0.0, hl), Vec3::NEG_Y, [1.0, 1.0]),
        MeshVertex::new(Vec3::new(-hw, 0.0, hl), Vec3::NEG_Y, [0.0, 1.0]),
        // Top
        MeshVertex::new(Vec3::new(-hw, h, -hl), Vec3::Y, [0.0, 0.0]),
        MeshVertex::new(Vec3::new(hw, h, -hl), Vec3::Y, [1.0, 0.0]),
        MeshVertex::new(Vec3::new(hw, h, hl), Vec3::Y, [1.0, 1.0]),
        MeshVertex::new(Vec3::new(-hw, h, hl), Vec3::Y, [0.0, 1.0]),
        // Bow tip
        MeshVertex::new(Vec3::new(0.0, 0.0, tip), bow_down, [0.5, 0.0]),
        MeshVertex::new(Vec3::new(0.0, h, tip), bow_up, [0.5, 0.0]),
    ];

    #[rustfmt::skip]
    let indices = vec![
        0, 1, 3, 1, 2, 3,       // bottom
        0, 4, 1, 1, 4, 5,       // bow-side wall
        1, 5, 2, 2, 5, 6,       // starboard
        2, 6, 3, 3, 6, 7,       // stern
        3, 7, 0, 0, 7, 4,       // port
        4, 7, 5, 5, 7, 6,       // deck
        0, 8, 1,                // bow bottom
        4, 9, 5,                // bow deck
        0, 4, 8, 4, 9, 8,       // bow port
        1, 8, 5, 5, 8, 9,       // bow starboard
    ];

    (vertices, indices)
}

/// Face table for a unit cube: (normal, four corners as sign triples)
const CUBE_FACES: [(Vec3, [[f32; 3]; 4]); 6] = [
    (Vec3::X, [[1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0]]),
    (Vec3::NEG_X, [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]]),
    (Vec3::Y, [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]]),
    (Vec3::NEG_Y, [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]]),
    (Vec3::Z, [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]]),
    (Vec3::NEG_Z, [[1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]]),
];

const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// World-space box for an obstacle: 4 vertices per face so normals stay flat
pub fn box_mesh(obstacle: &StaticObstacle) -> (Vec<MeshVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in CUBE_FACES {
        let base = vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(QUAD_UVS) {
            let position = obstacle.center + Vec3::from_array(*corner) * obstacle.half_extents;
            vertices.push(MeshVertex::new(position, normal, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// Line strip through the trail, transparent at the oldest point
pub fn trail_line(trail: &Trail) -> Vec<LineVertex> {
    let count = trail.len();
    let [r, g, b] = colors::TRAIL;

    trail
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let alpha = if count > 1 {
                i as f32 / (count - 1) as f32
            } else {
                1.0
            };
            LineVertex::new(point.to_array(), [r, g, b, alpha])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureId;

    #[test]
    fn test_hull_shape() {
        let boat = FloatingBody::default();
        let (vertices, indices) = hull_mesh(&boat);
        assert_eq!(vertices.len(), 10);
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));

        // Bow points along the boat's heading at yaw 0
        let tip = vertices[8].position;
        assert!((tip[2] + boat.length() * 0.75).abs() < 1e-6);
        assert_eq!(vertices[9].position[1], boat.height());
    }

    #[test]
    fn test_box_mesh_matches_extents() {
        let obstacle = StaticObstacle::new(
            3,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(2.0, 4.0, 6.0),
            TextureId::Wood,
        );
        let (vertices, indices) = box_mesh(&obstacle);
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);

        for v in &vertices {
            let p = Vec3::from_array(v.position);
            let n = Vec3::from_array(v.normal);
            // Every vertex lies on a corner, on the face its normal names
            assert!((p - obstacle.closest_point(p)).length() < 1e-6);
            let face = obstacle.center + n * obstacle.half_extents;
            assert!(((p - face) * n).length() < 1e-6);
        }
    }

    #[test]
    fn test_box_winding_faces_outward() {
        let obstacle = StaticObstacle::new(0, Vec3::ZERO, Vec3::splat(2.0), TextureId::Metal);
        let (vertices, indices) = box_mesh(&obstacle);
        for tri in indices.chunks(3) {
            let a = Vec3::from_array(vertices[tri[0] as usize].position);
            let b = Vec3::from_array(vertices[tri[1] as usize].position);
            let c = Vec3::from_array(vertices[tri[2] as usize].position);
            let n = Vec3::from_array(vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }

    #[test]
    fn test_trail_line_fades_in() {
        let mut trail = Trail::default();
        for i in 0..5 {
            trail.record(Vec3::new(i as f32 * 2.0, 1.0, 0.0));
        }
        let line = trail_line(&trail);
        assert_eq!(line.len(), 5);
        assert_eq!(line[0].color[3], 0.0);
        assert_eq!(line[4].color[3], 1.0);
        assert!(line.windows(2).all(|w| w[0].color[3] < w[1].color[3]));
        assert_eq!(line[2].position, [4.0, 1.0, 0.0]);
    }

    #[test]
    fn test_trail_line_edge_cases() {
        assert!(trail_line(&Trail::default()).is_empty());
        let mut trail = Trail::default();
        trail.record(Vec3::ZERO);
        let line = trail_line(&trail);
        assert_eq!(line.len(), 1);
        assert_eq!(line[0].color[3], 1.0);
    }
}
