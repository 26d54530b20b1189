//! Wavefront `.obj` loading.
//!
//! The text is scanned once, line by line. Faces are grouped into one
//! submesh per `usemtl` key and flattened into [`Mesh::verts`] at the end.

mod builder;
mod meta;
mod parser;

use gv_format::Mesh;
use log::info;

pub use self::meta::{ObjError, ObjMeta};

/// Builds a mesh from the contents of an `.obj` file.
pub fn load_obj_mesh(text: &str) -> Mesh {
    load_obj_mesh_with(text, ObjMeta::default())
}

/// Like [`load_obj_mesh`], applying the loader options in `meta`.
pub fn load_obj_mesh_with(text: &str, meta: ObjMeta) -> Mesh {
    let mesh = parser::parse(text, meta).build_mesh();

    info!(
        "Loaded obj mesh: {} points, {} normals, {} uvs, {} vertices in {} submeshes",
        mesh.points.len(),
        mesh.normals.as_ref().map_or(0, Vec::len),
        mesh.uvs.as_ref().map_or(0, Vec::len),
        mesh.verts.len(),
        mesh.submeshes.len()
    );

    mesh
}
