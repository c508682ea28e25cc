use crate::kernel::effect::NoticeLevel;
use crate::kernel::import::{pre_filter, ImportReport, ImportedFile, SkipReason, SkippedImport};
use crate::kernel::state::PendingAction;
use crate::kernel::{Action, Effect, StoreError};
use crate::models::{normalize_name, EntityId, FileEntity, FileTreeError};

impl super::Store {
    pub fn find_by_id(&self, id: EntityId) -> Option<FileEntity> {
        self.state.workspace.entity(id)
    }

    /// Looks a file up, preferring the live copy of an open document over
    /// the tree entity.
    pub fn get_file(&self, id: EntityId) -> Option<FileEntity> {
        if let Some(doc) = self.state.documents.get(id) {
            return Some(FileEntity::File {
                id,
                name: doc.name.clone(),
                path: doc.path.clone(),
                content: doc.content.clone(),
                language: doc.language,
            });
        }
        self.state
            .workspace
            .entity(id)
            .filter(|entity| !entity.is_folder())
    }

    fn resolve_parent(&self, parent: Option<EntityId>) -> Result<EntityId, StoreError> {
        let Some(parent) = parent else {
            return Ok(self.state.workspace.root());
        };
        if !self.state.workspace.contains(parent) {
            return Err(StoreError::NotFound);
        }
        if !self.state.workspace.is_folder(parent) {
            return Err(FileTreeError::ParentNotFolder.into());
        }
        Ok(parent)
    }

    /// Creates an empty file under `parent`, or at the root when `parent` is
    /// `None`.
    pub fn create_file(
        &mut self,
        name: &str,
        parent: Option<EntityId>,
    ) -> Result<EntityId, StoreError> {
        let parent = self.resolve_parent(parent)?;
        let id = self.state.workspace.insert_file(parent, name, String::new())?;
        tracing::debug!(path = self.state.workspace.path(id), "file created");
        Ok(id)
    }

    pub fn create_folder(
        &mut self,
        name: &str,
        parent: Option<EntityId>,
    ) -> Result<EntityId, StoreError> {
        let parent = self.resolve_parent(parent)?;
        let id = self.state.workspace.insert_folder(parent, name)?;
        tracing::debug!(path = self.state.workspace.path(id), "folder created");
        Ok(id)
    }

    /// Renames an entity and keeps open documents inside it in step.
    /// Returns `false` if the name was unchanged.
    pub fn rename_entity(&mut self, id: EntityId, new_name: &str) -> Result<bool, StoreError> {
        if !self.state.workspace.contains(id) {
            return Err(StoreError::NotFound);
        }
        let old_path = self.state.workspace.path(id).unwrap_or_default().to_string();
        if !self.state.workspace.rename(id, new_name)? {
            return Ok(false);
        }

        self.refresh_open_documents_under(id);
        tracing::debug!(
            from = %old_path,
            to = self.state.workspace.path(id),
            "entity renamed"
        );
        Ok(true)
    }

    fn refresh_open_documents_under(&mut self, id: EntityId) {
        let workspace = &self.state.workspace;
        for file_id in workspace.file_ids_under(id) {
            let Some(doc) = self.state.documents.get_mut(file_id) else {
                continue;
            };
            if let Some(name) = workspace.name(file_id) {
                doc.name = name.to_string();
            }
            if let Some(path) = workspace.path(file_id) {
                doc.path = path.to_string();
            }
            if let Some(language) = workspace.language(file_id) {
                doc.language = language;
            }
        }
    }

    /// Removes an entity and its subtree, closing any open documents inside
    /// it first. Returns the ids of the removed files.
    pub fn delete_entity(&mut self, id: EntityId) -> Result<Vec<EntityId>, StoreError> {
        if !self.state.workspace.contains(id) {
            return Err(StoreError::NotFound);
        }

        for file_id in self.state.workspace.file_ids_under(id) {
            self.state.documents.close(file_id);
        }
        let path = self.state.workspace.path(id).unwrap_or_default().to_string();
        let removed = self.state.workspace.delete(id)?;

        if matches!(
            self.state.ui.confirm_dialog.on_confirm,
            Some(PendingAction::DeleteEntity { id: pending }) if !self.state.workspace.contains(pending)
        ) {
            self.state.ui.confirm_dialog.reset();
        }

        tracing::debug!(%path, files = removed.len(), "entity deleted");
        Ok(removed)
    }

    /// Asks the UI to confirm deleting `id`. Nothing is removed until the
    /// dialog is accepted.
    pub fn request_delete(&mut self, id: EntityId) -> Result<(), StoreError> {
        let name = self
            .state
            .workspace
            .name(id)
            .ok_or(StoreError::NotFound)?
            .to_string();
        let message = if self.state.workspace.is_folder(id) {
            format!("Are you sure you want to delete \"{name}\" and all of its contents?")
        } else {
            format!("Are you sure you want to delete \"{name}\"?")
        };

        let dialog = &mut self.state.ui.confirm_dialog;
        dialog.visible = true;
        dialog.message = message;
        dialog.on_confirm = Some(PendingAction::DeleteEntity { id });
        Ok(())
    }

    /// Runs the pending action and closes the dialog. The dialog is closed
    /// even when the pending action turns out to be stale.
    pub fn accept_confirm_dialog(&mut self) -> Result<bool, StoreError> {
        let Some(pending) = self.state.ui.confirm_dialog.on_confirm.take() else {
            return Ok(self.state.ui.confirm_dialog.reset());
        };
        self.state.ui.confirm_dialog.reset();

        match pending {
            PendingAction::DeleteEntity { id } => self.delete_entity(id).map(|_| true),
        }
    }

    pub fn cancel_confirm_dialog(&mut self) -> bool {
        self.state.ui.confirm_dialog.reset()
    }

    /// Adds picked files at the root. Individual entries that cannot be added
    /// are reported, never fatal.
    pub fn import_flat(&mut self, files: Vec<ImportedFile>) -> ImportReport {
        let mut report = ImportReport::default();
        let root = self.state.workspace.root();

        for file in files {
            let reason = pre_filter(&file).or_else(|| match normalize_name(&file.name) {
                Ok(name) if self.state.workspace.child_named(root, name).is_some() => {
                    Some(SkipReason::NameCollision)
                }
                Ok(_) => None,
                Err(_) => Some(SkipReason::InvalidName),
            });
            if let Some(reason) = reason {
                if reason.is_warning() {
                    tracing::warn!(name = %file.name, %reason, "import skipped");
                }
                report.skipped.push(SkippedImport {
                    name: file.name,
                    reason,
                });
                continue;
            }

            match self
                .state
                .workspace
                .insert_file(root, &file.name, file.content)
            {
                Ok(id) => report.imported.push(id),
                Err(err) => {
                    tracing::warn!(name = %file.name, error = %err, "import skipped");
                    report.skipped.push(SkippedImport {
                        name: file.name,
                        reason: SkipReason::InvalidName,
                    });
                }
            }
        }

        tracing::info!(
            imported = report.imported.len(),
            skipped = report.skipped.len(),
            "files imported"
        );
        report
    }

    pub(super) fn reduce_explorer_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::CreateFile { name, parent } => match self.create_file(&name, parent) {
                Ok(_) => super::DispatchResult::changed(true).with_effect(Effect::PersistWorkspace),
                Err(err) => super::DispatchResult::failed(err),
            },
            Action::CreateFolder { name, parent } => match self.create_folder(&name, parent) {
                Ok(_) => super::DispatchResult::changed(true).with_effect(Effect::PersistWorkspace),
                Err(err) => super::DispatchResult::failed(err),
            },
            Action::RenameEntity { id, new_name } => match self.rename_entity(id, &new_name) {
                Ok(true) => {
                    super::DispatchResult::changed(true).with_effect(Effect::PersistWorkspace)
                }
                Ok(false) => super::DispatchResult::changed(false),
                Err(err) => super::DispatchResult::failed(err),
            },
            Action::DeleteEntity { id } => match self.delete_entity(id) {
                Ok(_) => super::DispatchResult::changed(true).with_effect(Effect::PersistWorkspace),
                Err(err) => super::DispatchResult::failed(err),
            },
            Action::RequestDelete { id } => match self.request_delete(id) {
                Ok(()) => super::DispatchResult::changed(true),
                Err(err) => super::DispatchResult::failed(err),
            },
            Action::ConfirmDialogAccept => {
                let had_pending = self.state.ui.confirm_dialog.on_confirm.is_some();
                match self.accept_confirm_dialog() {
                    Ok(changed) if had_pending => super::DispatchResult::changed(changed)
                        .with_effect(Effect::PersistWorkspace),
                    Ok(changed) => super::DispatchResult::changed(changed),
                    Err(err) => super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: true,
                        error: Some(err),
                    },
                }
            }
            Action::ConfirmDialogCancel => {
                super::DispatchResult::changed(self.cancel_confirm_dialog())
            }
            Action::ImportFiles { files } => {
                let report = self.import_flat(files);
                let mut result = super::DispatchResult::changed(!report.imported.is_empty());
                if !report.imported.is_empty() {
                    result.effects.push(Effect::PersistWorkspace);
                }
                for skipped in report.warnings() {
                    result.effects.push(Effect::Notify {
                        level: NoticeLevel::Warning,
                        message: format!("Skipped \"{}\": {}", skipped.name, skipped.reason),
                    });
                }
                result
            }
            _ => unreachable!("non-explorer action passed to reduce_explorer_action"),
        }
    }
}
