use std::io::{self, BufRead, Write};

use anyhow::Context as _;
use arcode::kernel::services::adapters::{ensure_settings_file, load_settings};
use arcode::kernel::{seed, Action, AppState, DispatchResult, Effect, NoticeLevel, Store};
use arcode::models::FileTree;

mod logging;

const HELP: &str = "\
:ls              list the workspace
:open <path>     open a file, e.g. :open /src/app.js
:cat             print the active document
:run             run the active document
:new-terminal    start another terminal session
:status          show the status bar
:logs            show where logs are written
:quit            exit
Anything else is sent to the active terminal.";

fn main() -> anyhow::Result<()> {
    if let Err(err) = ensure_settings_file() {
        eprintln!("arcode: cannot create settings file: {err}");
    }
    let settings = load_settings();
    let log_guard = logging::init(&settings);

    let workspace = if settings.workspace.seed_sample_project {
        seed::sample_project().context("failed to build the sample project")?
    } else {
        FileTree::new()
    };

    let mut store = Store::new(AppState::with_settings(workspace, &settings));
    report(store.dispatch(Action::Bootstrap));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut printed = print_terminal(&store, 0, &mut stdout)?;

    loop {
        write!(stdout, "{} ", store.state().terminal.prompt())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(&['\r', '\n'][..]);

        match line.split_once(' ').unwrap_or((line, "")) {
            ("", _) => continue,
            (":quit" | ":q", _) => break,
            (":help", _) => writeln!(stdout, "{HELP}")?,
            (":ls", _) => list_workspace(&store, &mut stdout)?,
            (":open", path) => match store.state().workspace.find_by_path(path.trim()) {
                Some(id) => report(store.dispatch(Action::OpenDocument { id })),
                None => writeln!(stdout, "no such file: {}", path.trim())?,
            },
            (":cat", _) => match store.active_document() {
                Some(doc) => writeln!(stdout, "{}", doc.content)?,
                None => writeln!(stdout, "no document is open")?,
            },
            (":run", _) => {
                report(store.dispatch(Action::RunActiveFile));
                printed = print_terminal(&store, printed, &mut stdout)?;
            }
            (":new-terminal", _) => {
                report(store.dispatch(Action::TerminalCreate));
                printed = print_terminal(&store, 0, &mut stdout)?;
            }
            (":logs", _) => match &log_guard {
                Some(guard) => writeln!(stdout, "{}", guard.log_dir().display())?,
                None => writeln!(stdout, "logging is disabled")?,
            },
            (":status", _) => {
                let status = store.status_summary();
                writeln!(
                    stdout,
                    "{} | {} | {}",
                    status.document.as_deref().unwrap_or("no file"),
                    status.language.display_name(),
                    status.terminal.as_deref().unwrap_or("no terminal"),
                )?;
            }
            _ => {
                let id = store.ensure_active_terminal();
                let before = store
                    .state()
                    .terminal
                    .session(id)
                    .map_or(0, |s| s.output().len());
                report(store.dispatch(Action::TerminalRunCommand {
                    id,
                    input: line.to_string(),
                }));
                // Skip the echoed command line; the user just typed it.
                let len = store
                    .state()
                    .terminal
                    .session(id)
                    .map_or(0, |s| s.output().len());
                let start = if len > before { before + 1 } else { 0 };
                printed = print_terminal(&store, start, &mut stdout)?;
            }
        }
    }

    tracing::info!("arcode exiting");
    Ok(())
}

/// Prints the active session's output from line `from`. Returns the number of
/// lines the session now holds.
fn print_terminal(store: &Store, from: usize, out: &mut impl Write) -> io::Result<usize> {
    let Some(session) = store.state().terminal.active_session() else {
        return Ok(0);
    };
    let lines = session.output();
    for line in lines.iter().skip(from) {
        writeln!(out, "{line}")?;
    }
    Ok(lines.len())
}

fn list_workspace(store: &Store, out: &mut impl Write) -> io::Result<()> {
    let state = store.state();
    for row in state.workspace.flatten_for_view() {
        let indent = "  ".repeat(usize::from(row.depth));
        let marker = if row.is_folder {
            "/"
        } else if state.documents.active() == Some(row.id) {
            " *"
        } else {
            ""
        };
        writeln!(out, "{indent}{}{marker}", row.name)?;
    }
    Ok(())
}

fn report(result: DispatchResult) {
    if let Some(err) = result.error {
        eprintln!("error: {err}");
    }
    for effect in result.effects {
        match effect {
            Effect::PersistWorkspace => tracing::debug!("workspace changed"),
            Effect::Notify { level, message } => match level {
                NoticeLevel::Info => eprintln!("{message}"),
                NoticeLevel::Warning => eprintln!("warning: {message}"),
                NoticeLevel::Error => eprintln!("error: {message}"),
            },
        }
    }
}
