//! The editor-widget boundary and the highlighter registration payload.

use serde::Serialize;

/// Reserved words of the Mu surface syntax.
pub const KEYWORDS: &[&str] = &["case", "of", "rec", "let"];

/// Operator lexemes.
pub const OPERATORS: &[&str] = &["->", "=", "\\"];

/// Line comments run from this marker to end of line.
///
/// The snippet loader reuses it so that its diagnostics are themselves
/// valid Mu programs when placed in the editor.
pub const LINE_COMMENT: &str = "--";

/// A mounted editor instance, as the session sees it.
///
/// The editor owns the source text. The session writes it during content
/// resolution and reads it back on demand (mode switches); it keeps no
/// copy of its own.
pub trait EditorHandle {
    /// Replace the editor content.
    fn set_value(&self, text: &str);

    /// Current editor content. `None` when the widget reports no value.
    fn value(&self) -> Option<String>;
}

/// Tokenizer registration handed to the editor's syntax highlighter.
///
/// Presentation only; nothing here carries evaluation semantics.
/// Identifiers with an uppercase initial are constructor names and get
/// their own token class on the host side.
#[derive(Debug, Clone, Serialize)]
pub struct EditorGrammar {
    /// Identifier the grammar is registered under.
    pub language_id: &'static str,
    pub keywords: &'static [&'static str],
    pub operators: &'static [&'static str],
    pub line_comment: &'static str,
    /// Matching bracket pairs, open then close.
    pub brackets: &'static [[&'static str; 2]],
}

/// The grammar payload for Mu.
pub fn editor_grammar() -> EditorGrammar {
    EditorGrammar {
        language_id: "mu",
        keywords: KEYWORDS,
        operators: OPERATORS,
        line_comment: LINE_COMMENT,
        brackets: &[["{", "}"], ["(", ")"]],
    }
}
