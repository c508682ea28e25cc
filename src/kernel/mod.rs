//! Headless workspace core: state, actions, and the store that owns them.

pub mod action;
pub mod documents;
pub mod effect;
pub mod error;
pub mod import;
pub mod language;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;
pub mod terminal;

pub use action::Action;
pub use documents::{DocumentSync, DocumentsState, OpenDocument};
pub use effect::{Effect, NoticeLevel};
pub use error::StoreError;
pub use import::{ImportReport, ImportedFile, SkipReason, SkippedImport};
pub use language::LanguageId;
pub use state::{
    AppState, BottomPanelState, BottomPanelTab, ConfirmDialogState, PendingAction, SidebarView,
    UiState,
};
pub use store::{DispatchResult, StatusSummary, Store};
pub use terminal::{TerminalCommand, TerminalId, TerminalSession, TerminalState};
