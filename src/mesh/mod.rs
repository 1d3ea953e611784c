//! CPU-side mesh generation for the renderer
//!
//! Produces plain vertex/index buffers; uploading them is the host's job.

pub mod sea;
pub mod shapes;
pub mod vertex;

pub use sea::SeaMesh;
pub use shapes::{box_mesh, hull_mesh, trail_line};
pub use vertex::{LineVertex, MeshVertex, colors};
