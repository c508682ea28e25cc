//! Owned, serialisable view of file-tree entities.
//!
//! This is the shape handed to the persistence collaborator and read back
//! when a project is restored.

use serde::{Deserialize, Serialize};

use crate::kernel::language::LanguageId;

use super::file_tree::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileEntity {
    File {
        #[serde(default)]
        id: EntityId,
        name: String,
        #[serde(default)]
        path: String,
        #[serde(default)]
        content: String,
        #[serde(default)]
        language: LanguageId,
    },
    Folder {
        #[serde(default)]
        id: EntityId,
        name: String,
        #[serde(default)]
        path: String,
        #[serde(default)]
        children: Vec<FileEntity>,
    },
}

impl FileEntity {
    pub fn id(&self) -> EntityId {
        match self {
            Self::File { id, .. } | Self::Folder { id, .. } => *id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Folder { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::File { path, .. } | Self::Folder { path, .. } => path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Self::File { content, .. } => Some(content),
            Self::Folder { .. } => None,
        }
    }

    pub fn language(&self) -> Option<LanguageId> {
        match self {
            Self::File { language, .. } => Some(*language),
            Self::Folder { .. } => None,
        }
    }

    pub fn children(&self) -> &[FileEntity] {
        match self {
            Self::Folder { children, .. } => children,
            Self::File { .. } => &[],
        }
    }
}
