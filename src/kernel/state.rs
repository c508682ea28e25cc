use serde::{Deserialize, Serialize};

use crate::kernel::services::ports::settings::Settings;
use crate::models::{EntityId, FileTree};

use super::documents::DocumentsState;
use super::terminal::TerminalState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarView {
    #[default]
    Explorer,
    Ai,
    Chat,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BottomPanelTab {
    #[default]
    Terminal,
    Problems,
    Output,
    Debug,
}

impl BottomPanelTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Terminal => "Terminal",
            Self::Problems => "Problems",
            Self::Output => "Output",
            Self::Debug => "Debug Console",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BottomPanelState {
    pub visible: bool,
    pub active_tab: BottomPanelTab,
}

impl Default for BottomPanelState {
    fn default() -> Self {
        Self {
            visible: true,
            active_tab: BottomPanelTab::Terminal,
        }
    }
}

/// Operation waiting on the user's answer to a confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteEntity { id: EntityId },
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmDialogState {
    pub visible: bool,
    pub message: String,
    pub on_confirm: Option<PendingAction>,
}

impl ConfirmDialogState {
    pub fn reset(&mut self) -> bool {
        let was_visible = self.visible;
        *self = Self::default();
        was_visible
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub sidebar_view: SidebarView,
    pub bottom_panel: BottomPanelState,
    pub right_panel_open: bool,
    pub confirm_dialog: ConfirmDialogState,
}

#[derive(Debug)]
pub struct AppState {
    pub workspace: FileTree,
    pub documents: DocumentsState,
    pub terminal: TerminalState,
    pub ui: UiState,
    pub auto_open_readme: bool,
}

impl AppState {
    pub fn new(workspace: FileTree) -> Self {
        Self::with_settings(workspace, &Settings::default())
    }

    pub fn with_settings(workspace: FileTree, settings: &Settings) -> Self {
        let ui = UiState {
            sidebar_view: settings.layout.sidebar_view,
            bottom_panel: BottomPanelState {
                visible: settings.layout.bottom_panel_open,
                active_tab: BottomPanelTab::Terminal,
            },
            right_panel_open: settings.layout.right_panel_open,
            confirm_dialog: ConfirmDialogState::default(),
        };

        Self {
            workspace,
            documents: DocumentsState::new(settings.editor.sync),
            terminal: TerminalState::with_prompt(settings.terminal.prompt.clone()),
            ui,
            auto_open_readme: settings.editor.auto_open_readme,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
