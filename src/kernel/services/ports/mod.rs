//! Service ports: data contracts.

pub mod settings;

pub use settings::{
    EditorSettings, LayoutSettings, Settings, TerminalSettings, WorkspaceSettings,
};
