//! Sea surface grid mesh, re-sampled from the wave field each frame

use glam::Vec3;

use super::vertex::MeshVertex;
use crate::sim::WaveField;

/// Square grid on the XZ plane centred at the origin
pub struct SeaMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    grid_size: usize,
    width: f32,
}

impl SeaMesh {
    /// `grid_size` vertices per side (at least 2) spanning `width` units
    pub fn new(grid_size: usize, width: f32) -> Self {
        let grid_size = grid_size.max(2);
        let half_width = width / 2.0;
        let cell = width / (grid_size - 1) as f32;
        let last = (grid_size - 1) as f32;

        let mut vertices = Vec::with_capacity(grid_size * grid_size);
        for z in 0..grid_size {
            for x in 0..grid_size {
                let position = Vec3::new(
                    x as f32 * cell - half_width,
                    0.0,
                    z as f32 * cell - half_width,
                );
                vertices.push(MeshVertex::new(
                    position,
                    Vec3::Y,
                    [x as f32 / last, z as f32 / last],
                ));
            }
        }

        // Two counter-clockwise triangles per cell
        let mut indices = Vec::with_capacity((grid_size - 1) * (grid_size - 1) * 6);
        for z in 0..grid_size - 1 {
            for x in 0..grid_size - 1 {
                let top_left = (z * grid_size + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * grid_size + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        log::debug!(
            "Sea mesh: {} vertices, {} triangles",
            vertices.len(),
            indices.len() / 3
        );

        Self {
            vertices,
            indices,
            grid_size,
            width,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Move every vertex to the wave surface and recompute its normal
    pub fn update(&mut self, sea: &WaveField) {
        for vertex in &mut self.vertices {
            let [x, _, z] = vertex.position;
            vertex.position[1] = sea.height_at(x, z);
            vertex.normal = sea.normal_at(x, z).to_array();
        }
    }
}
