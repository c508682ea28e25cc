//! Project file tree: an arena of files and folders keyed by stable ids.

use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

use crate::kernel::language::LanguageId;

use super::entity::FileEntity;

new_key_type! { pub struct EntityId; }

pub const PATH_SEPARATOR: char = '/';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileTreeError {
    #[error("entity not found")]
    NotFound,
    #[error("parent is not a folder")]
    ParentNotFolder,
    #[error("entity is not a file")]
    NotAFile,
    #[error("'{0}' already exists in this folder")]
    NameExists(String),
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must not contain '/'")]
    NameHasSeparator,
    #[error("the workspace root cannot be renamed or deleted")]
    RootImmutable,
}

#[derive(Debug, Clone)]
enum Payload {
    File {
        content: String,
        language: LanguageId,
    },
    Folder {
        children: Vec<EntityId>,
    },
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    path: String,
    parent: Option<EntityId>,
    payload: Payload,
}

impl Node {
    fn kind(&self) -> NodeKind {
        match self.payload {
            Payload::File { .. } => NodeKind::File,
            Payload::Folder { .. } => NodeKind::Folder,
        }
    }

    fn children(&self) -> Option<&Vec<EntityId>> {
        match &self.payload {
            Payload::Folder { children } => Some(children),
            Payload::File { .. } => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<EntityId>> {
        match &mut self.payload {
            Payload::Folder { children } => Some(children),
            Payload::File { .. } => None,
        }
    }
}

/// The root is an unnamed folder with an empty path, so root-level entities
/// get paths like `/README.md`.
#[derive(Debug, Clone)]
pub struct FileTree {
    arena: SlotMap<EntityId, Node>,
    root: EntityId,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Trims `name` and checks it can be used as a single path segment.
pub fn normalize_name(name: &str) -> Result<&str, FileTreeError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FileTreeError::EmptyName);
    }
    if name.contains(PATH_SEPARATOR) {
        return Err(FileTreeError::NameHasSeparator);
    }
    Ok(name)
}

fn join_path(parent_path: &str, name: &str) -> String {
    let mut path = String::with_capacity(parent_path.len() + name.len() + 1);
    path.push_str(parent_path);
    path.push(PATH_SEPARATOR);
    path.push_str(name);
    path
}

impl FileTree {
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node {
            name: String::new(),
            path: String::new(),
            parent: None,
            payload: Payload::Folder {
                children: Vec::new(),
            },
        });
        Self { arena, root }
    }

    pub fn root(&self) -> EntityId {
        self.root
    }

    /// Number of entities, not counting the root.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: EntityId) -> bool {
        id != self.root && self.arena.contains_key(id)
    }

    pub fn kind(&self, id: EntityId) -> Option<NodeKind> {
        self.node(id).map(Node::kind)
    }

    pub fn is_folder(&self, id: EntityId) -> bool {
        self.kind(id) == Some(NodeKind::Folder)
    }

    pub fn is_file(&self, id: EntityId) -> bool {
        self.kind(id) == Some(NodeKind::File)
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    pub fn path(&self, id: EntityId) -> Option<&str> {
        self.node(id).map(|n| n.path.as_str())
    }

    /// Parent folder; the root for root-level entities.
    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn content(&self, id: EntityId) -> Option<&str> {
        match &self.node(id)?.payload {
            Payload::File { content, .. } => Some(content.as_str()),
            Payload::Folder { .. } => None,
        }
    }

    pub fn language(&self, id: EntityId) -> Option<LanguageId> {
        match self.node(id)?.payload {
            Payload::File { language, .. } => Some(language),
            Payload::Folder { .. } => None,
        }
    }

    /// Children of a folder in insertion order. Accepts the root id.
    pub fn children(&self, id: EntityId) -> Option<&[EntityId]> {
        self.arena
            .get(id)
            .and_then(Node::children)
            .map(Vec::as_slice)
    }

    pub fn root_entries(&self) -> &[EntityId] {
        self.children(self.root).unwrap_or(&[])
    }

    pub fn child_named(&self, parent: EntityId, name: &str) -> Option<EntityId> {
        self.children(parent)?
            .iter()
            .copied()
            .find(|&child| self.arena.get(child).is_some_and(|n| n.name == name))
    }

    fn node(&self, id: EntityId) -> Option<&Node> {
        if id == self.root {
            return None;
        }
        self.arena.get(id)
    }

    pub fn insert_file(
        &mut self,
        parent: EntityId,
        name: &str,
        content: impl Into<String>,
    ) -> Result<EntityId, FileTreeError> {
        let name = normalize_name(name)?;
        let payload = Payload::File {
            content: content.into(),
            language: LanguageId::from_name(name),
        };
        self.insert(parent, name, payload)
    }

    pub fn insert_folder(&mut self, parent: EntityId, name: &str) -> Result<EntityId, FileTreeError> {
        let name = normalize_name(name)?;
        self.insert(
            parent,
            name,
            Payload::Folder {
                children: Vec::new(),
            },
        )
    }

    fn insert(
        &mut self,
        parent: EntityId,
        name: &str,
        payload: Payload,
    ) -> Result<EntityId, FileTreeError> {
        let parent_path = {
            let parent_node = self.arena.get(parent).ok_or(FileTreeError::NotFound)?;
            if parent_node.children().is_none() {
                return Err(FileTreeError::ParentNotFolder);
            }
            if self.child_named(parent, name).is_some() {
                return Err(FileTreeError::NameExists(name.to_string()));
            }
            parent_node.path.clone()
        };

        let id = self.arena.insert(Node {
            name: name.to_string(),
            path: join_path(&parent_path, name),
            parent: Some(parent),
            payload,
        });

        self.arena
            .get_mut(parent)
            .and_then(Node::children_mut)
            .ok_or(FileTreeError::ParentNotFolder)?
            .push(id);

        Ok(id)
    }

    /// Renames `id` and rewrites the paths of its whole subtree. Files get
    /// their language re-inferred from the new name. Returns `false` when the
    /// name did not change.
    pub fn rename(&mut self, id: EntityId, new_name: &str) -> Result<bool, FileTreeError> {
        if id == self.root {
            return Err(FileTreeError::RootImmutable);
        }
        let new_name = normalize_name(new_name)?;
        let (parent, old_name) = {
            let node = self.arena.get(id).ok_or(FileTreeError::NotFound)?;
            (node.parent, node.name.clone())
        };

        if old_name == new_name {
            return Ok(false);
        }

        if let Some(parent_id) = parent {
            if self.child_named(parent_id, new_name).is_some() {
                return Err(FileTreeError::NameExists(new_name.to_string()));
            }
        }

        let node = self.arena.get_mut(id).ok_or(FileTreeError::NotFound)?;
        node.name = new_name.to_string();
        if let Payload::File { language, .. } = &mut node.payload {
            *language = LanguageId::from_name(new_name);
        }

        self.refresh_paths(id);
        Ok(true)
    }

    fn refresh_paths(&mut self, id: EntityId) {
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            let parent_path = self
                .arena
                .get(node_id)
                .and_then(|n| n.parent)
                .and_then(|p| self.arena.get(p))
                .map(|p| p.path.clone())
                .unwrap_or_default();

            let Some(node) = self.arena.get_mut(node_id) else {
                continue;
            };
            node.path = join_path(&parent_path, &node.name);
            if let Some(children) = node.children() {
                stack.extend(children.iter().copied());
            }
        }
    }

    pub fn set_content(&mut self, id: EntityId, text: &str) -> Result<(), FileTreeError> {
        if id == self.root {
            return Err(FileTreeError::NotAFile);
        }
        let node = self.arena.get_mut(id).ok_or(FileTreeError::NotFound)?;
        match &mut node.payload {
            Payload::File { content, .. } => {
                content.clear();
                content.push_str(text);
                Ok(())
            }
            Payload::Folder { .. } => Err(FileTreeError::NotAFile),
        }
    }

    /// Every file in the subtree rooted at `id`, including `id` itself when
    /// it is a file, in depth-first order.
    pub fn file_ids_under(&self, id: EntityId) -> Vec<EntityId> {
        let mut files = Vec::new();
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            let Some(node) = self.arena.get(node_id) else {
                continue;
            };
            match &node.payload {
                Payload::File { .. } => files.push(node_id),
                Payload::Folder { children } => stack.extend(children.iter().rev().copied()),
            }
        }
        files
    }

    /// Removes `id` and its descendants. Returns the removed file ids.
    pub fn delete(&mut self, id: EntityId) -> Result<Vec<EntityId>, FileTreeError> {
        if id == self.root {
            return Err(FileTreeError::RootImmutable);
        }
        let parent = self.arena.get(id).ok_or(FileTreeError::NotFound)?.parent;
        let removed_files = self.file_ids_under(id);

        if let Some(children) = parent
            .and_then(|p| self.arena.get_mut(p))
            .and_then(Node::children_mut)
        {
            children.retain(|&child| child != id);
        }

        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            if let Some(node) = self.arena.remove(node_id) {
                if let Payload::Folder { children } = node.payload {
                    stack.extend(children);
                }
            }
        }

        Ok(removed_files)
    }

    pub fn find_by_path(&self, path: &str) -> Option<EntityId> {
        let mut current = self.root;
        for segment in path.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            current = self.child_named(current, segment)?;
        }
        (current != self.root).then_some(current)
    }

    /// Depth-first, children-order traversal of all entities.
    pub fn depth_first(&self) -> Vec<EntityId> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<EntityId> = self.root_entries().iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(children) = self.children(id) {
                stack.extend(children.iter().rev().copied());
            }
        }
        order
    }

    /// Owned snapshot of one entity; folders include their full subtree.
    pub fn entity(&self, id: EntityId) -> Option<FileEntity> {
        let node = self.node(id)?;
        Some(match &node.payload {
            Payload::File { content, language } => FileEntity::File {
                id,
                name: node.name.clone(),
                path: node.path.clone(),
                content: content.clone(),
                language: *language,
            },
            Payload::Folder { children } => FileEntity::Folder {
                id,
                name: node.name.clone(),
                path: node.path.clone(),
                children: children.iter().filter_map(|&c| self.entity(c)).collect(),
            },
        })
    }

    pub fn snapshot(&self) -> Vec<FileEntity> {
        self.root_entries()
            .iter()
            .filter_map(|&id| self.entity(id))
            .collect()
    }

    /// Rebuilds a tree from persisted entities. Ids and paths are reassigned;
    /// languages are kept as stored.
    pub fn from_entities(entities: Vec<FileEntity>) -> Result<Self, FileTreeError> {
        let mut tree = Self::new();
        let mut stack: Vec<(EntityId, FileEntity)> = Vec::new();
        let root = tree.root;
        stack.extend(entities.into_iter().rev().map(|e| (root, e)));

        while let Some((parent, entity)) = stack.pop() {
            match entity {
                FileEntity::File {
                    name,
                    content,
                    language,
                    ..
                } => {
                    let name = normalize_name(&name)?;
                    tree.insert(parent, name, Payload::File { content, language })?;
                }
                FileEntity::Folder { name, children, .. } => {
                    let id = tree.insert_folder(parent, &name)?;
                    stack.extend(children.into_iter().rev().map(|c| (id, c)));
                }
            }
        }

        Ok(tree)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeRow {
    pub id: EntityId,
    pub depth: u16,
    pub name: String,
    pub is_folder: bool,
}

impl FileTree {
    pub fn flatten_for_view(&self) -> Vec<FileTreeRow> {
        let mut rows = Vec::with_capacity(self.len());
        let mut stack: Vec<(EntityId, u16)> =
            self.root_entries().iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            rows.push(FileTreeRow {
                id,
                depth,
                name: node.name.clone(),
                is_folder: node.kind() == NodeKind::Folder,
            });
            if let Some(children) = node.children() {
                stack.extend(children.iter().rev().map(|&c| (c, depth + 1)));
            }
        }

        rows
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
