use crate::{
    aabb::Aabb,
    error::{FormatError, Result},
};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Number of buffer slots every vertex occupies in the packed attribute
/// buffers, independent of which attributes it references.
pub const SLOTS_PER_VERTEX: usize = 4;

/// One corner of a triangle. Indices are 0-based into the mesh's point,
/// uv and normal lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceVertex {
    pub point: usize,
    pub uv: Option<usize>,
    pub normal: Option<usize>,
}

impl FaceVertex {
    pub fn new(point: usize) -> Self {
        Self {
            point,
            ..Self::default()
        }
    }

    pub fn has_uv(&self) -> bool {
        self.uv.is_some()
    }

    pub fn has_normal(&self) -> bool {
        self.normal.is_some()
    }
}

/// Material attributes declared for a submesh, each one only present if the
/// source declared it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// specular exponent (`Ns`)
    pub ns: Option<f32>,
    /// ambient color (`Ka`)
    pub ka: Option<Vec3>,
    /// diffuse color (`Kd`)
    pub kd: Option<Vec3>,
    /// specular color (`Ks`)
    pub ks: Option<Vec3>,
    /// opacity (`d`)
    pub d: Option<f32>,
}

/// The triangles of a mesh that share a material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submesh {
    /// Material key, `None` for faces declared before any material.
    pub name: Option<String>,
    pub verts: Vec<FaceVertex>,
    pub num_verts: usize,
    /// First slot of this submesh in the packed attribute buffers.
    pub offset: usize,
    pub material: Material,
}

impl Submesh {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn num_triangles(&self) -> usize {
        self.num_verts / 3
    }

    /// Range of this submesh's vertices inside [`Mesh::verts`].
    pub fn vertex_range(&self) -> Range<usize> {
        let start = self.offset / SLOTS_PER_VERTEX;
        start..start + self.num_verts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub points: Vec<Vec3>,
    /// `None` if the source did not define a single normal.
    pub normals: Option<Vec<Vec3>>,
    /// `None` if the source did not define a single texture coordinate.
    pub uvs: Option<Vec<Vec2>>,
    /// Every submesh's vertices, concatenated in submesh order.
    pub verts: Vec<FaceVertex>,
    /// Submeshes in the order they were first referenced.
    pub submeshes: Vec<Submesh>,
    pub bbox: Aabb,
}

impl Mesh {
    pub fn submesh(&self, name: Option<&str>) -> Option<&Submesh> {
        self.submeshes.iter().find(|s| s.name.as_deref() == name)
    }

    pub fn num_verts(&self) -> usize {
        self.verts.len()
    }

    /// Positions packed as `x, y, z, 1` per vertex.
    pub fn position_buffer(&self) -> Vec<f32> {
        let mut buffer = Vec::with_capacity(self.verts.len() * SLOTS_PER_VERTEX);
        for vert in &self.verts {
            let p = self.points.get(vert.point).copied().unwrap_or(Vec3::ZERO);
            buffer.extend_from_slice(&[p.x, p.y, p.z, 1.0]);
        }
        buffer
    }

    /// Normals packed as `x, y, z, 0` per vertex; vertices without a normal
    /// get zeros.
    pub fn normal_buffer(&self) -> Option<Vec<f32>> {
        let normals = self.normals.as_ref()?;
        let mut buffer = Vec::with_capacity(self.verts.len() * SLOTS_PER_VERTEX);
        for vert in &self.verts {
            let n = vert
                .normal
                .and_then(|i| normals.get(i).copied())
                .unwrap_or(Vec3::ZERO);
            buffer.extend_from_slice(&[n.x, n.y, n.z, 0.0]);
        }
        Some(buffer)
    }

    /// Texture coordinates packed as `u, v, 0, 0` per vertex.
    pub fn uv_buffer(&self) -> Option<Vec<f32>> {
        let uvs = self.uvs.as_ref()?;
        let mut buffer = Vec::with_capacity(self.verts.len() * SLOTS_PER_VERTEX);
        for vert in &self.verts {
            let t = vert
                .uv
                .and_then(|i| uvs.get(i).copied())
                .unwrap_or(Vec2::ZERO);
            buffer.extend_from_slice(&[t.x, t.y, 0.0, 0.0]);
        }
        Some(buffer)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        bincode::deserialize::<Mesh>(&bytes).map_err(|source| FormatError::Decode {
            len: bytes.len(),
            source,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self).map_err(FormatError::Encode)
    }
}
