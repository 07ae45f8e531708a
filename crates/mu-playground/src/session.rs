//! The evaluation session controller.
//!
//! One controller contract reused across cosmetic UI variations: resolve
//! initial content once on editor mount, re-evaluate on every edit and
//! every mode switch, and keep the latest renderable output.

use crate::editor::EditorHandle;
use crate::render::{render, EvaluationResult, RenderedOutput};
use crate::runtime::{OutputMode, Runtime};
use crate::welcome::WELCOME_TEXT;

/// How the editor gets its initial content after mounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPlan {
    /// No snippet identifier in the page URL; the welcome program has
    /// already been written into the editor.
    Welcome,
    /// A snippet identifier was present. The shell fetches it and hands
    /// the resolved text to [`Session::apply_snippet`]. The fetch is
    /// fire-and-forget: it is never cancelled, and its reply lands
    /// whenever it arrives.
    Snippet(String),
}

/// Session state.
///
/// The source text is owned by the editor and only mirrored on demand;
/// everything else the playground tracks lives here, mutated exclusively
/// through the update methods below.
pub struct Session<R, E> {
    /// Live runtime; `None` until the bootstrap handshake completes.
    runtime: Option<R>,
    /// Mounted editor; `None` until the widget calls back.
    editor: Option<E>,
    /// Pretty-printer mode for the next evaluation.
    mode: OutputMode,
    /// Latest renderable output, replaced wholesale on every evaluation.
    output: RenderedOutput,
}

impl<R: Runtime, E: EditorHandle> Session<R, E> {
    /// A fresh, inert session: no runtime, no editor, concrete mode,
    /// empty output.
    pub fn new() -> Self {
        Self {
            runtime: None,
            editor: None,
            mode: OutputMode::default(),
            output: RenderedOutput::default(),
        }
    }

    /// Whether the runtime handshake has completed.
    pub fn is_ready(&self) -> bool {
        self.runtime.is_some()
    }

    /// Current output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Latest renderable output.
    pub fn output(&self) -> &RenderedOutput {
        &self.output
    }

    /// Complete the bootstrap handshake.
    ///
    /// Fires once; a repeat call keeps the first runtime.
    pub fn runtime_ready(&mut self, runtime: R) {
        if self.runtime.is_some() {
            tracing::warn!("runtime_ready fired twice, keeping the first runtime");
            return;
        }
        self.runtime = Some(runtime);
    }

    /// The editor widget has mounted: adopt it and resolve initial
    /// content.
    ///
    /// With no snippet identifier the welcome program is written into the
    /// editor immediately. With one, the caller gets back a plan naming
    /// the identifier and is expected to fetch it and pass the resolved
    /// text to [`apply_snippet`](Self::apply_snippet); the loader's
    /// no-throw contract means that text is always defined.
    pub fn editor_mounted(&mut self, editor: E, snippet_id: Option<String>) -> ContentPlan {
        self.editor = Some(editor);
        match snippet_id {
            Some(id) => ContentPlan::Snippet(id),
            None => {
                self.set_editor_value(WELCOME_TEXT);
                ContentPlan::Welcome
            }
        }
    }

    /// Write resolved snippet text (or a loader diagnostic) into the
    /// editor.
    ///
    /// A reply that arrives after newer edits still lands: last writer
    /// wins, matching the absence of cancellation in the fetch.
    pub fn apply_snippet(&mut self, text: &str) {
        self.set_editor_value(text);
    }

    /// The editor content changed. Evaluates the new text under the
    /// current mode and replaces the output.
    pub fn source_changed(&mut self, text: Option<&str>) -> &RenderedOutput {
        self.evaluate(text.map(str::to_owned));
        &self.output
    }

    /// Select an output mode.
    ///
    /// The editor text is untouched and nothing is re-fetched; the
    /// current content is re-read from the editor and immediately
    /// re-evaluated under `mode`. Before the editor has mounted this only
    /// records the mode.
    pub fn set_mode(&mut self, mode: OutputMode) -> &RenderedOutput {
        self.mode = mode;
        if self.editor.is_some() {
            let text = self.editor.as_ref().and_then(|editor| editor.value());
            self.evaluate(text);
        }
        &self.output
    }

    fn set_editor_value(&self, text: &str) {
        if let Some(editor) = &self.editor {
            editor.set_value(text);
        }
    }

    /// Run one evaluation and replace the output.
    ///
    /// A missing editor value becomes a single blank space so the runtime
    /// never sees an absent input. A failure replaces the pane content
    /// like any other result and the session stays fully interactive;
    /// the next trigger evaluates again.
    fn evaluate(&mut self, text: Option<String>) {
        let Some(runtime) = &self.runtime else {
            // The UI is unmounted until the handshake completes; a stray
            // trigger before that is dropped.
            tracing::debug!("evaluation triggered before runtime ready, ignoring");
            return;
        };

        let source = text.unwrap_or_else(|| " ".to_string());
        let result = match runtime.evaluate(&source, self.mode) {
            Ok(text) => EvaluationResult::Success(text),
            Err(raised) => EvaluationResult::Failure(raised),
        };
        self.output = render(&result);
    }
}

impl<R: Runtime, E: EditorHandle> Default for Session<R, E> {
    fn default() -> Self {
        Self::new()
    }
}
