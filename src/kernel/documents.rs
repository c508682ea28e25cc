use serde::{Deserialize, Serialize};

use crate::kernel::error::StoreError;
use crate::kernel::language::LanguageId;
use crate::models::EntityId;

/// How edits in an open document reach the file tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSync {
    /// Every edit is written through to the tree; documents are never dirty.
    #[default]
    Eager,
    /// Edits stay in the open copy until the document is saved.
    OnSave,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDocument {
    pub id: EntityId,
    pub name: String,
    pub path: String,
    pub content: String,
    pub language: LanguageId,
    pub dirty: bool,
}

/// Documents open in the editor, in open order, with at most one active.
#[derive(Debug, Default)]
pub struct DocumentsState {
    docs: Vec<OpenDocument>,
    active: Option<EntityId>,
    sync: DocumentSync,
    bootstrapped: bool,
}

impl DocumentsState {
    pub fn new(sync: DocumentSync) -> Self {
        Self {
            sync,
            ..Self::default()
        }
    }

    pub fn sync(&self) -> DocumentSync {
        self.sync
    }

    pub fn documents(&self) -> &[OpenDocument] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn active(&self) -> Option<EntityId> {
        self.active
    }

    pub fn active_document(&self) -> Option<&OpenDocument> {
        self.get(self.active?)
    }

    pub fn get(&self, id: EntityId) -> Option<&OpenDocument> {
        self.docs.iter().find(|d| d.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut OpenDocument> {
        self.docs.iter_mut().find(|d| d.id == id)
    }

    pub fn is_open(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn dirty_ids(&self) -> Vec<EntityId> {
        self.docs.iter().filter(|d| d.dirty).map(|d| d.id).collect()
    }

    /// Appends `doc` unless a document with the same id is already open, and
    /// makes it active either way.
    pub(crate) fn insert_or_activate(&mut self, doc: OpenDocument) -> bool {
        let id = doc.id;
        let inserted = if self.is_open(id) {
            false
        } else {
            self.docs.push(doc);
            true
        };
        let prev = self.active.replace(id);
        inserted || prev != Some(id)
    }

    pub fn set_active(&mut self, id: EntityId) -> Result<bool, StoreError> {
        if !self.is_open(id) {
            return Err(StoreError::NotOpen);
        }
        let prev = self.active.replace(id);
        Ok(prev != Some(id))
    }

    /// Removes `id`. When it was active, the document before it in open order
    /// becomes active, else the first remaining one.
    pub fn close(&mut self, id: EntityId) -> bool {
        let Some(index) = self.docs.iter().position(|d| d.id == id) else {
            return false;
        };
        self.docs.remove(index);

        if self.active == Some(id) {
            self.active = index
                .checked_sub(1)
                .and_then(|prev| self.docs.get(prev))
                .or_else(|| self.docs.first())
                .map(|d| d.id);
        }
        true
    }

    /// Replaces the live content of an open document. Under
    /// [`DocumentSync::OnSave`] the document is dirty while its text differs
    /// from `saved`, the content last written to the tree.
    pub(crate) fn set_content(
        &mut self,
        id: EntityId,
        text: &str,
        saved: &str,
    ) -> Result<bool, StoreError> {
        let sync = self.sync;
        let doc = self.get_mut(id).ok_or(StoreError::NotOpen)?;
        if doc.content == text {
            return Ok(false);
        }
        doc.content.clear();
        doc.content.push_str(text);
        doc.dirty = sync == DocumentSync::OnSave && text != saved;
        Ok(true)
    }

    pub fn is_dirty(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(|d| d.dirty)
    }

    pub(crate) fn mark_saved(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(doc) if doc.dirty => {
                doc.dirty = false;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` exactly once, the first time it is called.
    pub(crate) fn begin_bootstrap(&mut self) -> bool {
        !std::mem::replace(&mut self.bootstrapped, true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/documents.rs"]
mod tests;
