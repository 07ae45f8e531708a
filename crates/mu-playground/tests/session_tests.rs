//! Controller state machine: bootstrap gating, content resolution, the
//! edit/mode-switch evaluation loop, and the end-to-end scenarios.

use std::cell::RefCell;
use std::rc::Rc;

use mu_playground::{
    source_from_response, ContentPlan, EditorHandle, OutputMode, Runtime, Session, WELCOME_TEXT,
};

// ─────────────────────────────────────────────────────────────────────
// Fakes
// ─────────────────────────────────────────────────────────────────────

type CallLog = Rc<RefCell<Vec<(String, OutputMode)>>>;

/// Scripted stand-in for the language runtime: answers from a fixed
/// table, raises an ANSI-colored diagnostic for anything else, and
/// records every call it receives.
struct ScriptedRuntime {
    calls: CallLog,
}

impl ScriptedRuntime {
    fn new() -> (Self, CallLog) {
        let calls: CallLog = Rc::default();
        (
            Self {
                calls: Rc::clone(&calls),
            },
            calls,
        )
    }
}

impl Runtime for ScriptedRuntime {
    fn evaluate(&self, source: &str, mode: OutputMode) -> Result<String, String> {
        self.calls.borrow_mut().push((source.to_string(), mode));
        if source == WELCOME_TEXT {
            return Ok(match mode {
                OutputMode::Concrete => "True()",
                OutputMode::Abstract => "const \"True\" []",
                OutputMode::Debug => "Const(\"True\", [])",
            }
            .to_string());
        }
        match source {
            "Suc(Zero())" => Ok("Suc(Zero())".to_string()),
            " " | "" => Ok(String::new()),
            _ => Err("\u{1b}[31mparse error: unexpected input\u{1b}[0m".to_string()),
        }
    }
}

/// Fixed-reply runtime for handshake tests.
struct CannedRuntime(&'static str);

impl Runtime for CannedRuntime {
    fn evaluate(&self, _source: &str, _mode: OutputMode) -> Result<String, String> {
        Ok(self.0.to_string())
    }
}

/// In-memory stand-in for the editor widget.
#[derive(Clone, Default)]
struct PaneEditor {
    text: Rc<RefCell<Option<String>>>,
}

impl PaneEditor {
    fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }
}

impl EditorHandle for PaneEditor {
    fn set_value(&self, text: &str) {
        *self.text.borrow_mut() = Some(text.to_string());
    }

    fn value(&self) -> Option<String> {
        self.text.borrow().clone()
    }
}

/// A session past the bootstrap handshake, with a mounted editor pending.
fn ready_session() -> (Session<ScriptedRuntime, PaneEditor>, PaneEditor, CallLog) {
    let (runtime, calls) = ScriptedRuntime::new();
    let mut session = Session::new();
    session.runtime_ready(runtime);
    (session, PaneEditor::default(), calls)
}

// ─────────────────────────────────────────────────────────────────────
// Bootstrap gating
// ─────────────────────────────────────────────────────────────────────

#[test]
fn session_starts_inert() {
    let session: Session<ScriptedRuntime, PaneEditor> = Session::new();
    assert!(!session.is_ready());
    assert_eq!(session.mode(), OutputMode::Concrete);
    assert_eq!(session.output().as_str(), "");
}

#[test]
fn triggers_before_the_handshake_are_dropped() {
    let mut session: Session<ScriptedRuntime, PaneEditor> = Session::new();
    session.source_changed(Some("Suc(Zero())"));
    assert_eq!(session.output().as_str(), "");
}

#[test]
fn runtime_ready_fires_once() {
    let mut session: Session<CannedRuntime, PaneEditor> = Session::new();
    session.runtime_ready(CannedRuntime("first"));
    session.runtime_ready(CannedRuntime("second"));
    assert_eq!(session.source_changed(Some("x")).as_str(), "first");
}

// ─────────────────────────────────────────────────────────────────────
// Content resolution
// ─────────────────────────────────────────────────────────────────────

#[test]
fn mount_without_snippet_param_adopts_the_welcome_program() {
    let (mut session, editor, _) = ready_session();
    let plan = session.editor_mounted(editor.clone(), None);
    assert_eq!(plan, ContentPlan::Welcome);
    assert_eq!(editor.text().as_deref(), Some(WELCOME_TEXT));
}

#[test]
fn mount_with_snippet_param_defers_to_the_loader() {
    let (mut session, editor, _) = ready_session();
    let plan = session.editor_mounted(editor.clone(), Some("deadbeef".to_string()));
    assert_eq!(plan, ContentPlan::Snippet("deadbeef".to_string()));
    // Nothing is written until the fetch resolves.
    assert_eq!(editor.text(), None);
}

#[test]
fn scenario_b_store_404_becomes_editor_content() {
    let (mut session, editor, _) = ready_session();
    session.editor_mounted(editor.clone(), Some("deadbeef".to_string()));

    let resolved = source_from_response("deadbeef", 404, "");
    session.apply_snippet(&resolved);

    let text = editor.text().expect("editor content set");
    assert!(text.starts_with("--"));
    assert!(text.contains("deadbeef"));
    assert!(text.contains("404"));
}

#[test]
fn late_snippet_reply_still_lands() {
    // The fetch is never cancelled; a reply that arrives after the user
    // has already typed overwrites the newer content (last writer wins).
    let (mut session, editor, _) = ready_session();
    session.editor_mounted(editor.clone(), Some("deadbeef".to_string()));

    editor.set_value("Suc(Zero())");
    session.source_changed(editor.text().as_deref());

    session.apply_snippet("-- arrived late");
    assert_eq!(editor.text().as_deref(), Some("-- arrived late"));
}

// ─────────────────────────────────────────────────────────────────────
// The evaluation loop
// ─────────────────────────────────────────────────────────────────────

#[test]
fn scenario_a_welcome_program_evaluates_to_true() {
    let (mut session, editor, _) = ready_session();
    session.editor_mounted(editor.clone(), None);

    // The widget reports the content it was just given.
    let output = session.source_changed(editor.text().as_deref());
    assert_eq!(output.as_str(), "True()");
}

#[test]
fn scenario_c_error_then_recovery() {
    let (mut session, editor, _) = ready_session();
    session.editor_mounted(editor.clone(), None);

    let markup = session.source_changed(Some("case x of")).to_string();
    assert!(markup.contains("<span style=\"color:#A00\">"));
    assert!(markup.contains("parse error"));

    // The session stays interactive: the next valid edit replaces the
    // error output wholesale.
    let markup = session.source_changed(Some("Suc(Zero())")).to_string();
    assert_eq!(markup, "Suc(Zero())");
}

#[test]
fn missing_editor_value_becomes_a_single_blank() {
    let (mut session, editor, calls) = ready_session();
    session.editor_mounted(editor, None);

    session.source_changed(None);
    let (source, _) = calls.borrow().last().cloned().expect("evaluated");
    assert_eq!(source, " ");
}

#[test]
fn empty_editor_value_stays_empty() {
    let (mut session, editor, calls) = ready_session();
    session.editor_mounted(editor, None);

    session.source_changed(Some(""));
    let (source, _) = calls.borrow().last().cloned().expect("evaluated");
    assert_eq!(source, "");
}

#[test]
fn repeated_identical_edits_produce_identical_output() {
    let (mut session, editor, _) = ready_session();
    session.editor_mounted(editor, None);

    let first = session.source_changed(Some("Suc(Zero())")).clone();
    let second = session.source_changed(Some("Suc(Zero())")).clone();
    assert_eq!(first, second);
}

// ─────────────────────────────────────────────────────────────────────
// Mode switches
// ─────────────────────────────────────────────────────────────────────

#[test]
fn mode_switch_reevaluates_without_touching_the_text() {
    let (mut session, editor, calls) = ready_session();
    session.editor_mounted(editor.clone(), None);
    session.source_changed(editor.text().as_deref());
    assert_eq!(session.output().as_str(), "True()");

    let output = session.set_mode(OutputMode::Abstract).to_string();
    assert_eq!(output, "const \"True\" []");
    assert_eq!(session.mode(), OutputMode::Abstract);

    // Same source, new mode; the editor content was not rewritten.
    let (source, mode) = calls.borrow().last().cloned().expect("evaluated");
    assert_eq!(source, WELCOME_TEXT);
    assert_eq!(mode, OutputMode::Abstract);
    assert_eq!(editor.text().as_deref(), Some(WELCOME_TEXT));
}

#[test]
fn mode_switch_output_differs_only_when_the_runtime_differs() {
    let (mut session, editor, _) = ready_session();
    session.editor_mounted(editor.clone(), None);
    session.source_changed(editor.text().as_deref());

    let concrete = session.set_mode(OutputMode::Concrete).clone();
    let debug = session.set_mode(OutputMode::Debug).clone();
    assert_ne!(concrete, debug);

    let concrete_again = session.set_mode(OutputMode::Concrete).clone();
    assert_eq!(concrete, concrete_again);
}

#[test]
fn mode_switch_before_mount_only_records_the_mode() {
    let (mut session, _, calls) = ready_session();
    session.set_mode(OutputMode::Debug);
    assert_eq!(session.mode(), OutputMode::Debug);
    assert!(calls.borrow().is_empty());
}
