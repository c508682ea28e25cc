use super::*;
use crate::kernel::documents::DocumentSync;
use crate::kernel::effect::NoticeLevel;
use crate::kernel::import::{ImportedFile, SkipReason};
use crate::kernel::language::LanguageId;
use crate::kernel::seed::sample_project;
use crate::kernel::services::ports::settings::Settings;
use crate::kernel::state::{BottomPanelTab, PendingAction, SidebarView};
use crate::models::FileTree;
use chrono::{DateTime, Local, TimeZone};

fn fixed_clock() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 17, 9, 30, 15).unwrap()
}

fn new_store(tree: FileTree) -> Store {
    let mut state = AppState::new(tree);
    state.terminal.set_clock(fixed_clock);
    Store::new(state)
}

fn sample_store() -> Store {
    new_store(sample_project().unwrap())
}

fn path_id(store: &Store, path: &str) -> crate::models::EntityId {
    store.state().workspace.find_by_path(path).unwrap()
}

#[test]
fn bootstrap_opens_readme_and_provisions_terminal() {
    let mut store = sample_store();

    assert!(store.bootstrap());

    let readme = path_id(&store, "/README.md");
    assert_eq!(store.state().documents.active(), Some(readme));
    assert_eq!(store.state().terminal.len(), 1);
    assert!(!store.bootstrap());
    assert_eq!(store.state().terminal.len(), 1);
}

#[test]
fn bootstrap_respects_auto_open_setting() {
    let mut settings = Settings::default();
    settings.editor.auto_open_readme = false;
    let mut store = Store::new(AppState::with_settings(
        sample_project().unwrap(),
        &settings,
    ));

    store.bootstrap();
    assert!(store.state().documents.is_empty());
}

#[test]
fn create_file_at_root_and_in_folder() {
    let mut store = sample_store();
    let src = path_id(&store, "/src");

    let root_file = store.create_file("notes.md", None).unwrap();
    let nested = store.create_file("index.ts", Some(src)).unwrap();

    assert_eq!(store.state().workspace.path(root_file), Some("/notes.md"));
    assert_eq!(store.state().workspace.path(nested), Some("/src/index.ts"));
    assert_eq!(
        store.state().workspace.language(nested),
        Some(LanguageId::TypeScript)
    );
}

#[test]
fn create_rejects_collisions_and_bad_input() {
    let mut store = sample_store();
    let app = path_id(&store, "/src/app.js");
    let before = store.state().workspace.len();

    assert_eq!(
        store.create_file("README.md", None),
        Err(StoreError::NameCollision {
            name: "README.md".to_string()
        })
    );
    assert!(matches!(
        store.create_folder("  ", None),
        Err(StoreError::InvalidInput(_))
    ));
    assert!(matches!(
        store.create_file("src/index.ts", None),
        Err(StoreError::InvalidInput(_))
    ));
    assert!(matches!(
        store.create_file("x.js", Some(app)),
        Err(StoreError::InvalidInput(_))
    ));
    assert_eq!(store.state().workspace.len(), before);
}

#[test]
fn rename_refreshes_open_documents_in_subtree() {
    let mut store = sample_store();
    let src = path_id(&store, "/src");
    let css = path_id(&store, "/src/styles/main.css");
    store.open_document(css);

    assert_eq!(store.rename_entity(src, "source"), Ok(true));

    let doc = store.state().documents.get(css).unwrap();
    assert_eq!(doc.path, "/source/styles/main.css");
    assert_eq!(doc.name, "main.css");
}

#[test]
fn rename_open_file_updates_name_and_language() {
    let mut store = sample_store();
    let app = path_id(&store, "/src/app.js");
    store.open_document(app);

    store.rename_entity(app, "app.ts").unwrap();

    let doc = store.active_document().unwrap();
    assert_eq!(doc.name, "app.ts");
    assert_eq!(doc.language, LanguageId::TypeScript);
    assert_eq!(store.rename_entity(app, "app.ts"), Ok(false));
}

#[test]
fn rename_unknown_entity_fails() {
    let mut store = sample_store();
    let app = path_id(&store, "/src/app.js");
    store.delete_entity(app).unwrap();

    assert_eq!(store.rename_entity(app, "x.js"), Err(StoreError::NotFound));
}

#[test]
fn delete_folder_closes_documents_inside() {
    let mut store = sample_store();
    let src = path_id(&store, "/src");
    let app = path_id(&store, "/src/app.js");
    let css = path_id(&store, "/src/styles/main.css");
    let readme = path_id(&store, "/README.md");
    store.open_document(readme);
    store.open_document(app);
    store.open_document(css);

    let removed = store.delete_entity(src).unwrap();

    assert_eq!(removed.len(), 2);
    assert!(!store.state().documents.is_open(app));
    assert!(!store.state().documents.is_open(css));
    assert_eq!(store.state().documents.active(), Some(readme));
    assert!(store.find_by_id(src).is_none());
    assert_eq!(store.delete_entity(src), Err(StoreError::NotFound));
}

#[test]
fn get_file_prefers_open_copy() {
    let mut settings = Settings::default();
    settings.editor.sync = DocumentSync::OnSave;
    let mut store = Store::new(AppState::with_settings(
        sample_project().unwrap(),
        &settings,
    ));
    let py = path_id(&store, "/example.py");
    store.open_document(py);
    store.update_content(py, "print('edited')").unwrap();

    let file = store.get_file(py).unwrap();
    assert_eq!(file.content(), Some("print('edited')"));
    assert_ne!(
        store.find_by_id(py).unwrap().content(),
        Some("print('edited')")
    );
    assert!(store.get_file(path_id(&store, "/src")).is_none());
}

#[test]
fn open_ignores_folders_and_unknown_ids() {
    let mut store = sample_store();
    let src = path_id(&store, "/src");

    assert!(!store.open_document(src));
    assert!(store.state().documents.is_empty());
}

#[test]
fn open_twice_only_switches_active() {
    let mut store = sample_store();
    let a = path_id(&store, "/README.md");
    let b = path_id(&store, "/package.json");

    assert!(store.open_document(a));
    assert!(store.open_document(b));
    assert!(store.open_document(a));
    assert!(!store.open_document(a));

    assert_eq!(store.state().documents.len(), 2);
    assert_eq!(store.state().documents.active(), Some(a));
}

#[test]
fn update_content_writes_through_eagerly() {
    let mut store = sample_store();
    let readme = path_id(&store, "/README.md");
    store.open_document(readme);

    assert_eq!(store.update_content(readme, "# New"), Ok(true));
    assert_eq!(store.state().workspace.content(readme), Some("# New"));
    assert!(!store.state().documents.get(readme).unwrap().dirty);
}

#[test]
fn update_content_requires_open_document() {
    let mut store = sample_store();
    let readme = path_id(&store, "/README.md");

    assert_eq!(store.update_content(readme, "x"), Err(StoreError::NotOpen));
    assert_ne!(store.state().workspace.content(readme), Some("x"));
}

#[test]
fn on_save_sync_defers_until_save() {
    let mut settings = Settings::default();
    settings.editor.sync = DocumentSync::OnSave;
    let mut store = Store::new(AppState::with_settings(
        sample_project().unwrap(),
        &settings,
    ));
    let readme = path_id(&store, "/README.md");
    let py = path_id(&store, "/example.py");
    store.open_document(readme);
    store.open_document(py);

    store.update_content(readme, "# Draft").unwrap();
    store.update_content(py, "pass").unwrap();
    assert_ne!(store.state().workspace.content(readme), Some("# Draft"));

    assert_eq!(store.save_document(readme), Ok(true));
    assert_eq!(store.state().workspace.content(readme), Some("# Draft"));
    assert_eq!(store.save_document(readme), Ok(false));

    assert_eq!(store.save_all(), vec![py]);
    assert_eq!(store.state().workspace.content(py), Some("pass"));
}

#[test]
fn request_delete_waits_for_confirmation() {
    let mut store = sample_store();
    let src = path_id(&store, "/src");

    store.request_delete(src).unwrap();
    let dialog = &store.state().ui.confirm_dialog;
    assert!(dialog.visible);
    assert!(dialog.message.contains("\"src\""));
    assert_eq!(dialog.on_confirm, Some(PendingAction::DeleteEntity { id: src }));
    assert!(store.find_by_id(src).is_some());

    assert!(store.cancel_confirm_dialog());
    assert!(store.find_by_id(src).is_some());
    assert!(!store.state().ui.confirm_dialog.visible);

    store.request_delete(src).unwrap();
    assert_eq!(store.accept_confirm_dialog(), Ok(true));
    assert!(store.find_by_id(src).is_none());
    assert!(!store.state().ui.confirm_dialog.visible);
}

#[test]
fn accept_with_stale_target_closes_dialog() {
    let mut store = sample_store();
    let app = path_id(&store, "/src/app.js");
    let src = path_id(&store, "/src");

    store.request_delete(app).unwrap();
    store.delete_entity(src).unwrap();

    // Deleting the target's ancestor already dismissed the dialog.
    assert!(!store.state().ui.confirm_dialog.visible);
    assert_eq!(store.accept_confirm_dialog(), Ok(false));
}

#[test]
fn import_skips_hidden_placeholders_and_collisions() {
    let mut store = sample_store();
    let before = store.state().workspace.len();

    let report = store.import_flat(vec![
        ImportedFile::new("main.go", "package main"),
        ImportedFile::new(".env", "SECRET=1"),
        ImportedFile::new("assets", ""),
        ImportedFile::new("README.md", "dup"),
        ImportedFile::new("empty.txt", ""),
    ]);

    assert_eq!(report.imported.len(), 2);
    let reasons: Vec<SkipReason> = report.skipped.iter().map(|s| s.reason).collect();
    assert_eq!(
        reasons,
        vec![
            SkipReason::Hidden,
            SkipReason::Placeholder,
            SkipReason::NameCollision
        ]
    );
    assert_eq!(report.warnings().count(), 1);

    let go = path_id(&store, "/main.go");
    assert_eq!(store.state().workspace.language(go), Some(LanguageId::Go));
    assert_eq!(store.state().workspace.len(), before + 2);
}

#[test]
fn run_active_file_prints_simulated_run() {
    let mut store = sample_store();
    let py = path_id(&store, "/example.py");
    store.set_bottom_panel_open(false);

    assert_eq!(store.run_active_file(), Err(StoreError::NotOpen));

    store.open_document(py);
    let id = store.run_active_file().unwrap();

    let output = store.state().terminal.session(id).unwrap().output();
    assert_eq!(
        &output[1..],
        &[
            "09:30:15: Running example.py...".to_string(),
            "09:30:15: Hello, Arcode User!".to_string(),
            "09:30:15: Execution finished.".to_string(),
        ]
    );
    assert!(store.state().ui.bottom_panel.visible);
    assert_eq!(
        store.state().ui.bottom_panel.active_tab,
        BottomPanelTab::Terminal
    );
}

#[test]
fn selecting_terminal_panel_provisions_session() {
    let mut store = sample_store();
    store.set_active_panel(BottomPanelTab::Problems);
    store.set_bottom_panel_open(false);
    assert!(store.state().terminal.is_empty());

    assert!(store.set_active_panel(BottomPanelTab::Terminal));
    assert!(store.state().ui.bottom_panel.visible);
    assert_eq!(store.state().terminal.len(), 1);

    assert!(!store.set_active_panel(BottomPanelTab::Terminal));
    assert_eq!(store.state().terminal.len(), 1);
}

#[test]
fn layout_flags() {
    let mut store = sample_store();

    assert!(store.set_active_view(SidebarView::Ai));
    assert!(!store.set_active_view(SidebarView::Ai));
    assert!(store.toggle_bottom_panel());
    assert!(!store.state().ui.bottom_panel.visible);
    assert!(store.set_right_panel_open(true));
    assert!(!store.set_right_panel_open(true));
    assert!(store.set_bottom_panel_open(true));
}

#[test]
fn status_summary_reflects_active_items() {
    let mut store = sample_store();
    let empty = store.status_summary();
    assert_eq!(empty.document, None);
    assert_eq!(empty.language, LanguageId::PlainText);
    assert_eq!(empty.terminal, None);

    store.bootstrap();
    let status = store.status_summary();
    assert_eq!(status.document.as_deref(), Some("README.md"));
    assert_eq!(status.language, LanguageId::Markdown);
    assert_eq!(status.terminal.as_deref(), Some("Terminal 1"));
}

#[test]
fn dispatch_reports_effects_and_errors() {
    let mut store = sample_store();

    let result = store.dispatch(Action::CreateFile {
        name: "lib.rs".to_string(),
        parent: None,
    });
    assert!(result.state_changed);
    assert!(result.error.is_none());
    assert_eq!(result.effects, vec![Effect::PersistWorkspace]);

    let result = store.dispatch(Action::CreateFile {
        name: "lib.rs".to_string(),
        parent: None,
    });
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
    assert_eq!(
        result.error,
        Some(StoreError::NameCollision {
            name: "lib.rs".to_string()
        })
    );
}

#[test]
fn dispatch_import_notifies_warnings() {
    let mut store = sample_store();

    let result = store.dispatch(Action::ImportFiles {
        files: vec![
            ImportedFile::new("package.json", "{}"),
            ImportedFile::new("new.css", "a {}"),
        ],
    });

    assert!(result.state_changed);
    assert_eq!(result.effects[0], Effect::PersistWorkspace);
    assert!(matches!(
        &result.effects[1],
        Effect::Notify { level: NoticeLevel::Warning, message } if message.contains("package.json")
    ));
}

#[test]
fn dispatch_terminal_and_layout_actions() {
    let mut store = sample_store();

    let result = store.dispatch(Action::SetActivePanel {
        panel: BottomPanelTab::Terminal,
    });
    assert!(result.state_changed);
    let id = store.state().terminal.active().unwrap();

    let result = store.dispatch(Action::TerminalRunCommand {
        id,
        input: "  ".to_string(),
    });
    assert!(matches!(result.error, Some(StoreError::InvalidInput(_))));

    let result = store.dispatch(Action::TerminalRunCommand {
        id,
        input: "echo ok".to_string(),
    });
    assert!(result.state_changed);
    assert_eq!(
        store.state().terminal.session(id).unwrap().last_line(),
        Some("ok")
    );

    let result = store.dispatch(Action::RunActiveFile);
    assert_eq!(result.error, Some(StoreError::NotOpen));
}

#[test]
fn import_skips_whitespace_padded_hidden_names() {
    let mut store = sample_store();
    let before = store.state().workspace.len();

    let report = store.import_flat(vec![
        ImportedFile::new(" .env", "SECRET=1"),
        ImportedFile::new("\t.npmrc ", "registry=x"),
    ]);

    assert!(report.imported.is_empty());
    assert!(report
        .skipped
        .iter()
        .all(|s| s.reason == SkipReason::Hidden));
    assert!(store.state().workspace.find_by_path("/.env").is_none());
    assert_eq!(store.state().workspace.len(), before);
}

fn on_save_store() -> Store {
    let mut settings = Settings::default();
    settings.editor.sync = DocumentSync::OnSave;
    Store::new(AppState::with_settings(
        sample_project().unwrap(),
        &settings,
    ))
}

#[test]
fn editing_back_to_saved_text_clears_dirty() {
    let mut store = on_save_store();
    let py = path_id(&store, "/example.py");
    let saved = store.state().workspace.content(py).unwrap().to_string();
    store.open_document(py);

    store.update_content(py, "pass").unwrap();
    assert!(store.state().documents.is_dirty(py));

    store.update_content(py, &saved).unwrap();
    assert!(!store.state().documents.is_dirty(py));
    assert!(store.save_all().is_empty());
}

#[test]
fn closing_dirty_document_warns_and_keeps_saved_content() {
    let mut store = on_save_store();
    let readme = path_id(&store, "/README.md");
    let saved = store.state().workspace.content(readme).unwrap().to_string();
    store.open_document(readme);
    store.update_content(readme, "# Draft").unwrap();

    let result = store.dispatch(Action::CloseDocument { id: readme });

    assert!(result.state_changed);
    assert!(matches!(
        &result.effects[..],
        [Effect::Notify { level: NoticeLevel::Warning, message }] if message.contains("README.md")
    ));
    assert!(!store.state().documents.is_open(readme));
    assert_eq!(store.state().workspace.content(readme), Some(saved.as_str()));
}

#[test]
fn closing_clean_document_has_no_effects() {
    let mut store = on_save_store();
    let readme = path_id(&store, "/README.md");
    store.open_document(readme);

    let result = store.dispatch(Action::CloseDocument { id: readme });
    assert!(result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn save_all_skips_clean_documents() {
    let mut store = on_save_store();
    let readme = path_id(&store, "/README.md");
    let json = path_id(&store, "/package.json");
    let py = path_id(&store, "/example.py");
    for id in [readme, json, py] {
        store.open_document(id);
    }
    store.update_content(readme, "# A").unwrap();
    store.update_content(py, "pass").unwrap();

    assert_eq!(store.save_all(), vec![readme, py]);
    assert!(store.state().documents.dirty_ids().is_empty());
    assert_eq!(store.state().workspace.content(json).map(|c| c.is_empty()), Some(false));
}
