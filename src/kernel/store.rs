//! The workspace store: sole owner of [`AppState`].
//!
//! Callers mutate state either through the typed operations (grouped by
//! component in the `store/` submodules) or by sending an [`Action`] to
//! [`Store::dispatch`], which also reports effects for collaborators.

mod documents;
mod explorer;
mod layout;
mod terminal;

use super::{Action, AppState, Effect, StoreError};

pub use layout::StatusSummary;

#[derive(Debug, Default)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
    pub error: Option<StoreError>,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
            error: None,
        }
    }

    fn failed(error: StoreError) -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
            error: Some(error),
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    /// One-time start-up: provisions the first terminal session and opens the
    /// root `README.md` when nothing else is open. Later calls do nothing.
    pub fn bootstrap(&mut self) -> bool {
        if !self.state.documents.begin_bootstrap() {
            return false;
        }

        let (_, created) = self.state.terminal.ensure_session();
        let mut changed = created;

        if self.state.auto_open_readme && self.state.documents.is_empty() {
            let root = self.state.workspace.root();
            if let Some(readme) = self.state.workspace.child_named(root, "README.md") {
                changed |= self.open_document(readme);
            }
        }

        tracing::debug!(changed, "store bootstrapped");
        changed
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let result = match action {
            Action::Bootstrap => DispatchResult::changed(self.bootstrap()),
            action @ (Action::CreateFile { .. }
            | Action::CreateFolder { .. }
            | Action::RenameEntity { .. }
            | Action::DeleteEntity { .. }
            | Action::RequestDelete { .. }
            | Action::ConfirmDialogAccept
            | Action::ConfirmDialogCancel
            | Action::ImportFiles { .. }) => self.reduce_explorer_action(action),
            action @ (Action::OpenDocument { .. }
            | Action::CloseDocument { .. }
            | Action::SetActiveDocument { .. }
            | Action::UpdateContent { .. }
            | Action::SaveDocument { .. }
            | Action::SaveAll) => self.reduce_document_action(action),
            action @ (Action::TerminalCreate
            | Action::TerminalClose { .. }
            | Action::TerminalSetActive { .. }
            | Action::TerminalAppend { .. }
            | Action::TerminalClear { .. }
            | Action::TerminalRunCommand { .. }
            | Action::RunActiveFile) => self.reduce_terminal_action(action),
            action @ (Action::SetActiveView { .. }
            | Action::SetActivePanel { .. }
            | Action::ToggleBottomPanel
            | Action::SetBottomPanelOpen { .. }
            | Action::SetRightPanelOpen { .. }) => self.reduce_layout_action(action),
        };

        if let Some(err) = &result.error {
            tracing::warn!(error = %err, "store operation rejected");
        }
        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
