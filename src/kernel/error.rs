use thiserror::Error;

use crate::models::FileTreeError;

/// Failure of a single store operation. The store is left exactly as it was
/// before the operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("an entry named '{name}' already exists")]
    NameCollision { name: String },
    #[error("nothing is open or active for this operation")]
    NotOpen,
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<FileTreeError> for StoreError {
    fn from(err: FileTreeError) -> Self {
        match err {
            FileTreeError::NotFound => StoreError::NotFound,
            FileTreeError::NameExists(name) => StoreError::NameCollision { name },
            FileTreeError::ParentNotFolder
            | FileTreeError::NotAFile
            | FileTreeError::EmptyName
            | FileTreeError::NameHasSeparator
            | FileTreeError::RootImmutable => StoreError::InvalidInput(err.to_string()),
        }
    }
}
