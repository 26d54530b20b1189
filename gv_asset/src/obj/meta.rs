use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum ObjError {
    #[error("Failed to parse obj meta: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Loader options, usually kept in a `.toml` file next to the mesh.
/// The default leaves the parsed data untouched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ObjMeta {
    /// negate the x, y or z component of positions and normals
    pub flip_axis: [bool; 3],
    /// report unknown commands as warnings instead of debug output
    pub warn_unknown: bool,
}

impl ObjMeta {
    pub fn from_toml(text: &str) -> Result<Self, ObjError> {
        let meta: Self = toml::from_str(text)?;
        Ok(meta)
    }

    pub(crate) fn flip(&self, mut values: [f32; 3]) -> [f32; 3] {
        for n in 0..3 {
            if self.flip_axis[n] {
                values[n] = -values[n];
            }
        }
        values
    }
}
