use super::*;
use chrono::TimeZone;

fn fixed_clock() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 17, 9, 30, 15).unwrap()
}

fn terminals() -> TerminalState {
    let mut state = TerminalState::default();
    state.set_clock(fixed_clock);
    state
}

#[test]
fn parse_matches_builtins_case_insensitively() {
    assert_eq!(TerminalCommand::parse("clear"), TerminalCommand::Clear);
    assert_eq!(TerminalCommand::parse("DATE"), TerminalCommand::Date);
    assert_eq!(TerminalCommand::parse("Help"), TerminalCommand::Help);
    assert_eq!(TerminalCommand::parse("ECHO Hi"), TerminalCommand::Echo);
    assert_eq!(TerminalCommand::parse("echo"), TerminalCommand::Unknown);
    assert_eq!(TerminalCommand::parse("ls -la"), TerminalCommand::Unknown);
}

#[test]
fn create_names_and_activates_sessions() {
    let mut state = terminals();
    let first = state.create();
    let second = state.create();

    assert_ne!(first, second);
    assert_eq!(state.active(), Some(second));
    assert_eq!(state.session(first).unwrap().name, "Terminal 1");
    assert_eq!(state.session(second).unwrap().name, "Terminal 2");
    assert_eq!(
        state.session(first).unwrap().output(),
        &["Terminal 1 session started at 09:30:15".to_string()]
    );
}

#[test]
fn create_reuses_smallest_free_name() {
    let mut state = terminals();
    let first = state.create();
    let second = state.create();
    state.create();

    state.close(second).unwrap();
    let reused = state.create();
    assert_eq!(state.session(reused).unwrap().name, "Terminal 2");

    state.close(first).unwrap();
    let reused = state.create();
    assert_eq!(state.session(reused).unwrap().name, "Terminal 1");
    assert_eq!(state.len(), 3);
}

#[test]
fn close_active_promotes_neighbour() {
    let mut state = terminals();
    let a = state.create();
    let b = state.create();
    let c = state.create();

    state.set_active(b).unwrap();
    state.close(b).unwrap();
    assert_eq!(state.active(), Some(c));

    state.close(c).unwrap();
    assert_eq!(state.active(), Some(a));

    state.close(a).unwrap();
    assert_eq!(state.active(), None);
    assert!(state.is_empty());
}

#[test]
fn close_inactive_keeps_active() {
    let mut state = terminals();
    let a = state.create();
    let b = state.create();

    state.close(a).unwrap();
    assert_eq!(state.active(), Some(b));
    assert_eq!(state.close(a), Err(StoreError::NotFound));
}

#[test]
fn set_active_unknown_session_fails() {
    let mut state = terminals();
    let a = state.create();
    assert_eq!(state.set_active(a + 100), Err(StoreError::NotFound));
    assert_eq!(state.set_active(a), Ok(false));
}

#[test]
fn ensure_session_creates_only_when_empty() {
    let mut state = terminals();
    let (id, created) = state.ensure_session();
    assert!(created);

    let (again, created) = state.ensure_session();
    assert_eq!(again, id);
    assert!(!created);
    assert_eq!(state.len(), 1);
}

#[test]
fn append_output_formats_echo_and_info_lines() {
    let mut state = terminals();
    let id = state.create();

    state.append_output(id, "ls", true).unwrap();
    state.append_output(id, "done", false).unwrap();

    let session = state.session(id).unwrap();
    assert_eq!(session.output()[1], "user@arcode:~$ ls");
    assert_eq!(session.output()[2], "09:30:15: done");
    assert_eq!(state.append_output(id + 1, "x", false), Err(StoreError::NotFound));
}

#[test]
fn custom_prompt_is_used_for_echo() {
    let mut state = TerminalState::with_prompt("dev$");
    state.set_clock(fixed_clock);
    let id = state.create();

    state.interpret(id, "help").unwrap();
    assert_eq!(state.session(id).unwrap().output()[1], "dev$ help");
}

#[test]
fn interpret_builtins() {
    let mut state = terminals();
    let id = state.create();

    assert_eq!(state.interpret(id, "echo Hello World"), Ok(TerminalCommand::Echo));
    assert_eq!(state.session(id).unwrap().last_line(), Some("Hello World"));

    state.interpret(id, "help").unwrap();
    assert_eq!(state.session(id).unwrap().last_line(), Some(HELP_TEXT));

    state.interpret(id, "date").unwrap();
    let date = state.session(id).unwrap().last_line().unwrap().to_string();
    assert!(date.starts_with("Fri May 17 2024 09:30:15 GMT"), "{date}");

    state.interpret(id, "bogus").unwrap();
    assert_eq!(
        state.session(id).unwrap().last_line(),
        Some("Command not found: bogus")
    );
}

#[test]
fn interpret_clear_resets_to_banner() {
    let mut state = terminals();
    let id = state.create();
    state.interpret(id, "echo hi").unwrap();

    assert_eq!(state.interpret(id, "clear"), Ok(TerminalCommand::Clear));
    assert_eq!(
        state.session(id).unwrap().output(),
        &["Terminal 1 session started at 09:30:15".to_string()]
    );
}

#[test]
fn interpret_blank_input_is_rejected_without_output() {
    let mut state = terminals();
    let id = state.create();

    assert!(matches!(
        state.interpret(id, "   "),
        Err(StoreError::InvalidInput(_))
    ));
    assert_eq!(state.session(id).unwrap().output().len(), 1);
    assert_eq!(state.interpret(id + 1, "help"), Err(StoreError::NotFound));
}
