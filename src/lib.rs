//! View-side helpers for a small WebGL style renderer: a [`camera::Camera`]
//! producing view matrices and Wavefront `.obj` loading into upload-ready
//! meshes.

pub mod camera;

pub use camera::{Camera, CameraBuilder};
pub use gv_asset::obj;
pub use gv_format as format;

pub mod prelude {
    pub use crate::camera::{Camera, CameraBuilder};
    pub use glam::{Mat4, Vec2, Vec3};
    pub use gv_asset::obj::{load_obj_mesh, load_obj_mesh_with, ObjMeta};
    pub use gv_format::{Aabb, FaceVertex, Material, Mesh, Submesh};
}
