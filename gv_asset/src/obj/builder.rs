use std::collections::HashMap;

use glam::{Vec2, Vec3};
use gv_format::{Aabb, FaceVertex, Material, Mesh, Submesh, SLOTS_PER_VERTEX};
use log::{debug, warn};

use super::meta::ObjMeta;

/// Collects the data of a single `.obj` pass. Submeshes are kept in the
/// order their key was first seen, `keys` maps a key to its position.
#[derive(Debug, Default)]
pub(crate) struct ObjMeshBuilder {
    pub(crate) points: Vec<Vec3>,
    pub(crate) normals: Vec<Vec3>,
    pub(crate) uvs: Vec<Vec2>,
    pub(crate) bbox: Aabb,
    pub(crate) submeshes: Vec<Submesh>,
    pub(crate) keys: HashMap<Option<String>, usize>,
    pub(crate) current_key: Option<String>,
    pub(crate) meta: ObjMeta,
}

impl ObjMeshBuilder {
    pub(crate) fn new(meta: ObjMeta) -> Self {
        Self {
            meta,
            ..Self::default()
        }
    }

    pub(crate) fn push_point(&mut self, point: [f32; 3]) {
        let [x, y, z] = self.meta.flip(point);
        self.bbox.add(x, y, z);
        self.points.push(Vec3::new(x, y, z));
    }

    pub(crate) fn push_normal(&mut self, normal: [f32; 3]) {
        self.normals.push(self.meta.flip(normal).into());
    }

    pub(crate) fn push_uv(&mut self, uv: [f32; 2]) {
        self.uvs.push(uv.into());
    }

    /// `usemtl`: switches the current key and creates its submesh on first use.
    pub(crate) fn use_material(&mut self, name: &str) {
        self.current_key = Some(name.into());
        self.submesh_index(Some(name.into()));
    }

    /// `newmtl`: only switches the current key, the submesh has to come from
    /// an earlier `usemtl`.
    pub(crate) fn select_material(&mut self, name: &str) {
        self.current_key = Some(name.into());
    }

    /// Applies a material attribute to the submesh of the current key.
    pub(crate) fn set_material(&mut self, command: &str, apply: impl FnOnce(&mut Material)) {
        let key = match &self.current_key {
            Some(key) => key,
            None => {
                debug!("Dropping `{}` declared before any material", command);
                return;
            }
        };

        match self.keys.get(&Some(key.clone())) {
            Some(&idx) => apply(&mut self.submeshes[idx].material),
            None => warn!(
                "Dropping `{}` for material \"{}\", which no `usemtl` referenced yet",
                command, key
            ),
        }
    }

    /// Fan-triangulates a polygon around its first vertex into the submesh of
    /// the current key.
    pub(crate) fn push_face(&mut self, face: &[FaceVertex]) {
        if face.len() < 3 {
            warn!("Ignoring face with {} vertices", face.len());
            return;
        }

        let idx = self.submesh_index(self.current_key.clone());
        let submesh = &mut self.submeshes[idx];
        for i in 2..face.len() {
            debug!(
                "Create triangle between {}, {}, {}",
                face[0].point,
                face[i - 1].point,
                face[i].point
            );

            submesh.verts.push(face[0]);
            submesh.verts.push(face[i - 1]);
            submesh.verts.push(face[i]);
            submesh.num_verts += 3;
        }
    }

    fn submesh_index(&mut self, key: Option<String>) -> usize {
        if let Some(&idx) = self.keys.get(&key) {
            return idx;
        }

        let idx = self.submeshes.len();
        self.submeshes.push(Submesh::new(key.clone()));
        self.keys.insert(key, idx);
        idx
    }

    pub(crate) fn build_mesh(self) -> Mesh {
        let mut submeshes = self.submeshes;
        let mut verts = Vec::new();

        // offsets count buffer slots, not vertices
        let mut offset = 0;
        for submesh in &mut submeshes {
            submesh.offset = offset;
            verts.extend_from_slice(&submesh.verts);
            offset += submesh.verts.len() * SLOTS_PER_VERTEX;
        }

        Mesh {
            points: self.points,
            normals: if self.normals.is_empty() {
                None
            } else {
                Some(self.normals)
            },
            uvs: if self.uvs.is_empty() {
                None
            } else {
                Some(self.uvs)
            },
            verts,
            submeshes,
            bbox: self.bbox,
        }
    }
}
