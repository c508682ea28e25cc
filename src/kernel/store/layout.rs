use crate::kernel::language::LanguageId;
use crate::kernel::state::{BottomPanelTab, SidebarView};
use crate::kernel::Action;

/// What a status bar shows about the current editor and terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub document: Option<String>,
    pub language: LanguageId,
    pub terminal: Option<String>,
}

impl super::Store {
    pub fn set_active_view(&mut self, view: SidebarView) -> bool {
        let prev = std::mem::replace(&mut self.state.ui.sidebar_view, view);
        prev != view
    }

    /// Switches the bottom panel tab. Choosing the terminal also expands the
    /// panel and makes sure a session exists.
    pub fn set_active_panel(&mut self, panel: BottomPanelTab) -> bool {
        let bottom = &mut self.state.ui.bottom_panel;
        let mut changed = std::mem::replace(&mut bottom.active_tab, panel) != panel;

        if panel == BottomPanelTab::Terminal {
            changed |= !std::mem::replace(&mut bottom.visible, true);
            changed |= self.state.terminal.ensure_session().1;
        }
        changed
    }

    pub fn toggle_bottom_panel(&mut self) -> bool {
        let bottom = &mut self.state.ui.bottom_panel;
        bottom.visible = !bottom.visible;
        true
    }

    pub fn set_bottom_panel_open(&mut self, open: bool) -> bool {
        std::mem::replace(&mut self.state.ui.bottom_panel.visible, open) != open
    }

    pub fn set_right_panel_open(&mut self, open: bool) -> bool {
        std::mem::replace(&mut self.state.ui.right_panel_open, open) != open
    }

    pub fn status_summary(&self) -> StatusSummary {
        let doc = self.state.documents.active_document();
        StatusSummary {
            document: doc.map(|d| d.name.clone()),
            language: doc.map(|d| d.language).unwrap_or_default(),
            terminal: self.state.terminal.active_session().map(|s| s.name.clone()),
        }
    }

    pub(super) fn reduce_layout_action(&mut self, action: Action) -> super::DispatchResult {
        let changed = match action {
            Action::SetActiveView { view } => self.set_active_view(view),
            Action::SetActivePanel { panel } => self.set_active_panel(panel),
            Action::ToggleBottomPanel => self.toggle_bottom_panel(),
            Action::SetBottomPanelOpen { open } => self.set_bottom_panel_open(open),
            Action::SetRightPanelOpen { open } => self.set_right_panel_open(open),
            _ => unreachable!("non-layout action passed to reduce_layout_action"),
        };
        super::DispatchResult::changed(changed)
    }
}
