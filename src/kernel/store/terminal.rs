use crate::kernel::effect::NoticeLevel;
use crate::kernel::language::LanguageId;
use crate::kernel::state::BottomPanelTab;
use crate::kernel::terminal::{TerminalCommand, TerminalId};
use crate::kernel::{Action, Effect, StoreError};

/// Line printed for the bundled samples when they are "run".
fn simulated_output(name: &str, language: LanguageId) -> Option<&'static str> {
    match (name, language) {
        ("example.py", LanguageId::Python) => Some("Hello, Arcode User!"),
        ("app.js", LanguageId::JavaScript) => {
            Some("JavaScript execution would typically happen in the browser console.")
        }
        _ => None,
    }
}

impl super::Store {
    pub fn create_terminal(&mut self) -> TerminalId {
        self.state.terminal.create()
    }

    pub fn close_terminal(&mut self, id: TerminalId) -> Result<(), StoreError> {
        self.state.terminal.close(id)
    }

    pub fn set_active_terminal(&mut self, id: TerminalId) -> Result<bool, StoreError> {
        self.state.terminal.set_active(id)
    }

    pub fn append_terminal_output(
        &mut self,
        id: TerminalId,
        line: &str,
        is_command_echo: bool,
    ) -> Result<(), StoreError> {
        self.state.terminal.append_output(id, line, is_command_echo)
    }

    pub fn clear_terminal(&mut self, id: TerminalId) -> Result<(), StoreError> {
        self.state.terminal.clear_output(id)
    }

    pub fn run_terminal_command(
        &mut self,
        id: TerminalId,
        raw: &str,
    ) -> Result<TerminalCommand, StoreError> {
        self.state.terminal.interpret(id, raw)
    }

    /// Returns the active session, creating or activating one if needed.
    pub fn ensure_active_terminal(&mut self) -> TerminalId {
        self.state.terminal.ensure_session().0
    }

    /// Shows the terminal panel and prints a simulated run of the active
    /// document. Nothing is executed.
    pub fn run_active_file(&mut self) -> Result<TerminalId, StoreError> {
        let (name, language) = self
            .state
            .documents
            .active_document()
            .map(|doc| (doc.name.clone(), doc.language))
            .ok_or(StoreError::NotOpen)?;

        let panel = &mut self.state.ui.bottom_panel;
        panel.visible = true;
        panel.active_tab = BottomPanelTab::Terminal;
        let id = self.ensure_active_terminal();

        let terminal = &mut self.state.terminal;
        terminal.append_output(id, &format!("Running {name}..."), false)?;
        if let Some(line) = simulated_output(&name, language) {
            terminal.append_output(id, line, false)?;
        }
        terminal.append_output(id, "Execution finished.", false)?;

        tracing::info!(file = %name, terminal = id, "simulated run");
        Ok(id)
    }

    pub(super) fn reduce_terminal_action(&mut self, action: Action) -> super::DispatchResult {
        let result = match action {
            Action::TerminalCreate => {
                self.create_terminal();
                Ok(true)
            }
            Action::TerminalClose { id } => self.close_terminal(id).map(|()| true),
            Action::TerminalSetActive { id } => self.set_active_terminal(id),
            Action::TerminalAppend {
                id,
                line,
                is_command_echo,
            } => self
                .append_terminal_output(id, &line, is_command_echo)
                .map(|()| true),
            Action::TerminalClear { id } => self.clear_terminal(id).map(|()| true),
            Action::TerminalRunCommand { id, input } => {
                self.run_terminal_command(id, &input).map(|_| true)
            }
            Action::RunActiveFile => {
                return match self.run_active_file() {
                    Ok(_) => {
                        let name = self
                            .active_document()
                            .map(|doc| doc.name.clone())
                            .unwrap_or_default();
                        super::DispatchResult::changed(true).with_effect(Effect::Notify {
                            level: NoticeLevel::Info,
                            message: format!("Running {name}"),
                        })
                    }
                    Err(err) => super::DispatchResult::failed(err).with_effect(Effect::Notify {
                        level: NoticeLevel::Error,
                        message: "No file is open to run.".to_string(),
                    }),
                };
            }
            _ => unreachable!("non-terminal action passed to reduce_terminal_action"),
        };

        match result {
            Ok(changed) => super::DispatchResult::changed(changed),
            Err(err) => super::DispatchResult::failed(err),
        }
    }
}
