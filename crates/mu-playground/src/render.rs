//! Output formatting: evaluation results to renderable markup.

use crate::ansi::ansi_to_markup;
use std::fmt;

/// Outcome of a single evaluate call.
///
/// Produced fresh per trigger, consumed immediately by [`render`]; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationResult {
    /// The runtime returned normally. The text already carries the shape
    /// of the requested output mode.
    Success(String),
    /// The runtime raised. The text is its diagnostic, possibly
    /// ANSI-colored.
    Failure(String),
}

/// Markup ready for direct injection into the output pane.
///
/// Past this boundary no raw ANSI sequence survives. The content is
/// trusted as-is by the host pane; escaping happened in the ANSI
/// converter (for failures) or is the runtime's responsibility (for
/// success text).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedOutput(String);

impl RenderedOutput {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert an evaluation result into pane content. Pure.
///
/// Success text passes through verbatim; mode-specific structure is the
/// runtime's job, not the formatter's. Failure text goes through the ANSI
/// converter so terminal-style coloring renders in the browser; an empty
/// failure payload renders as empty output rather than a secondary
/// failure.
pub fn render(result: &EvaluationResult) -> RenderedOutput {
    match result {
        EvaluationResult::Success(text) => RenderedOutput(text.clone()),
        EvaluationResult::Failure(text) => RenderedOutput(ansi_to_markup(text)),
    }
}
