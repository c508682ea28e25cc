use chrono::{DateTime, Local};
use rustc_hash::FxHashSet;

use crate::kernel::error::StoreError;

pub type TerminalId = u64;

/// Source of wall-clock time for banners and timestamped lines.
pub type Clock = fn() -> DateTime<Local>;

pub const DEFAULT_PROMPT: &str = "user@arcode:~$";
pub const HELP_TEXT: &str = "Available commands: clear, date, help, echo [text]";

const SESSION_NAME_PREFIX: &str = "Terminal";

/// Builtins understood by the session interpreter. Anything else is reported
/// as not found; there is no process execution behind a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalCommand {
    Clear,
    Date,
    Help,
    Echo,
    Unknown,
}

impl TerminalCommand {
    pub fn parse(raw: &str) -> Self {
        let command = raw.to_lowercase();
        match command.as_str() {
            "clear" => Self::Clear,
            "date" => Self::Date,
            "help" => Self::Help,
            _ if command.starts_with("echo ") => Self::Echo,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TerminalSession {
    pub id: TerminalId,
    pub name: String,
    pub created_at: DateTime<Local>,
    output: Vec<String>,
}

impl TerminalSession {
    fn new(id: TerminalId, name: String, now: DateTime<Local>) -> Self {
        let banner = banner_line(&name, now);
        Self {
            id,
            name,
            created_at: now,
            output: vec![banner],
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn last_line(&self) -> Option<&str> {
        self.output.last().map(String::as_str)
    }
}

fn banner_line(name: &str, now: DateTime<Local>) -> String {
    format!("{name} session started at {}", now.format("%H:%M:%S"))
}

#[derive(Debug)]
pub struct TerminalState {
    sessions: Vec<TerminalSession>,
    active: Option<TerminalId>,
    next_id: TerminalId,
    prompt: String,
    clock: Clock,
}

impl Default for TerminalState {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            active: None,
            next_id: 1,
            prompt: DEFAULT_PROMPT.to_string(),
            clock: Local::now,
        }
    }
}

impl TerminalState {
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn sessions(&self) -> &[TerminalSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn active(&self) -> Option<TerminalId> {
        self.active
    }

    pub fn active_session(&self) -> Option<&TerminalSession> {
        self.session(self.active?)
    }

    pub fn session(&self, id: TerminalId) -> Option<&TerminalSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    fn session_mut(&mut self, id: TerminalId) -> Result<&mut TerminalSession, StoreError> {
        self.sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound)
    }

    fn next_name(&self) -> String {
        let used: FxHashSet<&str> = self.sessions.iter().map(|s| s.name.as_str()).collect();
        (1..)
            .map(|n| format!("{SESSION_NAME_PREFIX} {n}"))
            .find(|name| !used.contains(name.as_str()))
            .unwrap_or_else(|| format!("{SESSION_NAME_PREFIX} {}", self.next_id))
    }

    pub fn create(&mut self) -> TerminalId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        let name = self.next_name();
        let session = TerminalSession::new(id, name, (self.clock)());
        tracing::info!(terminal = id, name = %session.name, "terminal session created");
        self.sessions.push(session);
        self.active = Some(id);
        id
    }

    /// Makes sure some session is active, creating one when the registry is
    /// empty. Returns the active id and whether a session was created.
    pub fn ensure_session(&mut self) -> (TerminalId, bool) {
        if let Some(id) = self.active {
            if self.session(id).is_some() {
                return (id, false);
            }
        }

        if let Some(existing) = self.sessions.first().map(|s| s.id) {
            self.active = Some(existing);
            return (existing, false);
        }

        (self.create(), true)
    }

    /// Removes a session. When it was active, the session that slides into
    /// its slot becomes active, else the one before it.
    pub fn close(&mut self, id: TerminalId) -> Result<(), StoreError> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound)?;
        self.sessions.remove(index);

        if self.active == Some(id) {
            self.active = self
                .sessions
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|prev| self.sessions.get(prev)))
                .map(|s| s.id);
        }
        tracing::debug!(terminal = id, "terminal session closed");
        Ok(())
    }

    pub fn set_active(&mut self, id: TerminalId) -> Result<bool, StoreError> {
        if self.session(id).is_none() {
            return Err(StoreError::NotFound);
        }
        Ok(self.active.replace(id) != Some(id))
    }

    pub fn append_output(
        &mut self,
        id: TerminalId,
        line: &str,
        is_command_echo: bool,
    ) -> Result<(), StoreError> {
        let formatted = if is_command_echo {
            format!("{} {line}", self.prompt)
        } else {
            format!("{}: {line}", (self.clock)().format("%H:%M:%S"))
        };
        self.session_mut(id)?.output.push(formatted);
        Ok(())
    }

    fn push_plain(&mut self, id: TerminalId, line: String) -> Result<(), StoreError> {
        self.session_mut(id)?.output.push(line);
        Ok(())
    }

    pub fn clear_output(&mut self, id: TerminalId) -> Result<(), StoreError> {
        let now = (self.clock)();
        let session = self.session_mut(id)?;
        session.output.clear();
        let banner = banner_line(&session.name, now);
        session.output.push(banner);
        Ok(())
    }

    /// Runs one line through the builtin interpreter. Blank input is rejected
    /// without touching the output.
    pub fn interpret(&mut self, id: TerminalId, raw: &str) -> Result<TerminalCommand, StoreError> {
        if raw.trim().is_empty() {
            return Err(StoreError::InvalidInput("empty command".to_string()));
        }
        if self.session(id).is_none() {
            return Err(StoreError::NotFound);
        }

        self.append_output(id, raw, true)?;

        let command = TerminalCommand::parse(raw);
        match command {
            TerminalCommand::Clear => self.clear_output(id)?,
            TerminalCommand::Date => {
                let now = (self.clock)();
                self.push_plain(id, now.format("%a %b %d %Y %H:%M:%S GMT%z").to_string())?;
            }
            TerminalCommand::Help => self.push_plain(id, HELP_TEXT.to_string())?,
            TerminalCommand::Echo => {
                let text = raw.get("echo ".len()..).unwrap_or_default();
                self.push_plain(id, text.to_string())?;
            }
            TerminalCommand::Unknown => {
                self.push_plain(id, format!("Command not found: {raw}"))?;
            }
        }

        tracing::debug!(terminal = id, ?command, "terminal command interpreted");
        Ok(command)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/terminal.rs"]
mod tests;
