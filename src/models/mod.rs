//! Data models for the workspace: the project file tree and its persisted form.

pub mod entity;
pub mod file_tree;

pub use entity::FileEntity;
pub use file_tree::{
    normalize_name, EntityId, FileTree, FileTreeError, FileTreeRow, NodeKind, PATH_SEPARATOR,
};
