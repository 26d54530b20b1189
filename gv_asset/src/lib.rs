pub mod obj;

pub use obj::{load_obj_mesh, load_obj_mesh_with, ObjError, ObjMeta};
