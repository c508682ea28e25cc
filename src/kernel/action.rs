use crate::kernel::import::ImportedFile;
use crate::kernel::state::{BottomPanelTab, SidebarView};
use crate::kernel::terminal::TerminalId;
use crate::models::EntityId;

#[derive(Debug, Clone)]
pub enum Action {
    Bootstrap,
    CreateFile {
        name: String,
        parent: Option<EntityId>,
    },
    CreateFolder {
        name: String,
        parent: Option<EntityId>,
    },
    RenameEntity {
        id: EntityId,
        new_name: String,
    },
    /// Deletes without asking; the caller already has the user's consent.
    DeleteEntity {
        id: EntityId,
    },
    RequestDelete {
        id: EntityId,
    },
    ConfirmDialogAccept,
    ConfirmDialogCancel,
    ImportFiles {
        files: Vec<ImportedFile>,
    },
    OpenDocument {
        id: EntityId,
    },
    CloseDocument {
        id: EntityId,
    },
    SetActiveDocument {
        id: EntityId,
    },
    UpdateContent {
        id: EntityId,
        text: String,
    },
    SaveDocument {
        id: EntityId,
    },
    SaveAll,
    TerminalCreate,
    TerminalClose {
        id: TerminalId,
    },
    TerminalSetActive {
        id: TerminalId,
    },
    TerminalAppend {
        id: TerminalId,
        line: String,
        is_command_echo: bool,
    },
    TerminalClear {
        id: TerminalId,
    },
    TerminalRunCommand {
        id: TerminalId,
        input: String,
    },
    RunActiveFile,
    SetActiveView {
        view: SidebarView,
    },
    SetActivePanel {
        panel: BottomPanelTab,
    },
    ToggleBottomPanel,
    SetBottomPanelOpen {
        open: bool,
    },
    SetRightPanelOpen {
        open: bool,
    },
}
