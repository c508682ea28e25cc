use serde::{Deserialize, Serialize};

use crate::kernel::documents::DocumentSync;
use crate::kernel::state::SidebarView;
use crate::kernel::terminal::DEFAULT_PROMPT;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub terminal: TerminalSettings,
    #[serde(default)]
    pub editor: EditorSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub workspace: WorkspaceSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    pub prompt: String,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub sync: DocumentSync,
    pub auto_open_readme: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            sync: DocumentSync::Eager,
            auto_open_readme: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub sidebar_view: SidebarView,
    pub bottom_panel_open: bool,
    pub right_panel_open: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            sidebar_view: SidebarView::Explorer,
            bottom_panel_open: true,
            right_panel_open: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    pub seed_sample_project: bool,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            seed_sample_project: true,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
