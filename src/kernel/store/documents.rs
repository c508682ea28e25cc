use crate::kernel::documents::{DocumentSync, OpenDocument};
use crate::kernel::effect::NoticeLevel;
use crate::kernel::{Action, Effect, StoreError};
use crate::models::EntityId;

impl super::Store {
    /// Opens a file in the editor, or activates it if it is already open.
    /// Unknown ids and folders are ignored.
    pub fn open_document(&mut self, id: EntityId) -> bool {
        let workspace = &self.state.workspace;
        if !workspace.is_file(id) {
            tracing::debug!("open ignored: not a file");
            return false;
        }
        if self.state.documents.is_open(id) {
            return self.state.documents.set_active(id).unwrap_or(false);
        }

        let doc = OpenDocument {
            id,
            name: workspace.name(id).unwrap_or_default().to_string(),
            path: workspace.path(id).unwrap_or_default().to_string(),
            content: workspace.content(id).unwrap_or_default().to_string(),
            language: workspace.language(id).unwrap_or_default(),
            dirty: false,
        };
        tracing::debug!(path = %doc.path, "document opened");
        self.state.documents.insert_or_activate(doc)
    }

    /// Closes a document. Unsaved edits are dropped; the tree keeps its last
    /// saved content.
    pub fn close_document(&mut self, id: EntityId) -> bool {
        if self.state.documents.is_dirty(id) {
            tracing::warn!(
                path = self.state.workspace.path(id),
                "closing document with unsaved edits"
            );
        }
        self.state.documents.close(id)
    }

    pub fn set_active_document(&mut self, id: EntityId) -> Result<bool, StoreError> {
        self.state.documents.set_active(id)
    }

    pub fn active_document(&self) -> Option<&OpenDocument> {
        self.state.documents.active_document()
    }

    /// Replaces the text of an open document. With eager sync the tree file
    /// is updated in the same step.
    pub fn update_content(&mut self, id: EntityId, text: &str) -> Result<bool, StoreError> {
        if !self.state.documents.is_open(id) {
            return Err(StoreError::NotOpen);
        }
        if !self.state.workspace.is_file(id) {
            return Err(StoreError::NotFound);
        }

        let saved = self.state.workspace.content(id).unwrap_or_default();
        let changed = self.state.documents.set_content(id, text, saved)?;
        if changed && self.state.documents.sync() == DocumentSync::Eager {
            self.state.workspace.set_content(id, text)?;
        }
        Ok(changed)
    }

    /// Writes a dirty document back to the tree. Returns `false` when there
    /// was nothing to save.
    pub fn save_document(&mut self, id: EntityId) -> Result<bool, StoreError> {
        let doc = self.state.documents.get(id).ok_or(StoreError::NotOpen)?;
        if !doc.dirty {
            return Ok(false);
        }
        self.state.workspace.set_content(id, &doc.content)?;
        self.state.documents.mark_saved(id);
        tracing::debug!(path = self.state.workspace.path(id), "document saved");
        Ok(true)
    }

    pub fn save_all(&mut self) -> Vec<EntityId> {
        let mut saved = Vec::new();
        for id in self.state.documents.dirty_ids() {
            match self.save_document(id) {
                Ok(true) => saved.push(id),
                Ok(false) => {}
                Err(err) => tracing::warn!(error = %err, "failed to save document"),
            }
        }
        saved
    }

    pub(super) fn reduce_document_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::OpenDocument { id } => super::DispatchResult::changed(self.open_document(id)),
            Action::CloseDocument { id } => {
                let discarded = self
                    .state
                    .documents
                    .get(id)
                    .filter(|doc| doc.dirty)
                    .map(|doc| doc.name.clone());
                let result = super::DispatchResult::changed(self.close_document(id));
                match discarded {
                    Some(name) => result.with_effect(Effect::Notify {
                        level: NoticeLevel::Warning,
                        message: format!("Unsaved changes to {name} were discarded"),
                    }),
                    None => result,
                }
            }
            Action::SetActiveDocument { id } => match self.set_active_document(id) {
                Ok(changed) => super::DispatchResult::changed(changed),
                Err(err) => super::DispatchResult::failed(err),
            },
            Action::UpdateContent { id, text } => match self.update_content(id, &text) {
                Ok(true) if self.state.documents.sync() == DocumentSync::Eager => {
                    super::DispatchResult::changed(true).with_effect(Effect::PersistWorkspace)
                }
                Ok(changed) => super::DispatchResult::changed(changed),
                Err(err) => super::DispatchResult::failed(err),
            },
            Action::SaveDocument { id } => match self.save_document(id) {
                Ok(true) => {
                    super::DispatchResult::changed(true).with_effect(Effect::PersistWorkspace)
                }
                Ok(false) => super::DispatchResult::changed(false),
                Err(err) => super::DispatchResult::failed(err),
            },
            Action::SaveAll => {
                let saved = self.save_all();
                let result = super::DispatchResult::changed(!saved.is_empty());
                if saved.is_empty() {
                    result
                } else {
                    result.with_effect(Effect::PersistWorkspace)
                }
            }
            _ => unreachable!("non-document action passed to reduce_document_action"),
        }
    }
}
