use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, FormatError>;

/// Failures when moving a [`crate::Mesh`] in or out of its binary form.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Could not encode mesh: {0}")]
    Encode(#[source] bincode::Error),
    #[error("Could not decode mesh from {len} bytes: {source}")]
    Decode {
        len: usize,
        #[source]
        source: bincode::Error,
    },
}
