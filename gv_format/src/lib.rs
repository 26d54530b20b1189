pub mod aabb;
pub mod error;
pub mod mesh;

pub use aabb::Aabb;
pub use error::{FormatError, Result};
pub use mesh::{FaceVertex, Material, Mesh, Submesh, SLOTS_PER_VERTEX};
