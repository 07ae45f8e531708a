//! Mu playground core: a browser front-end for a small functional language
//! where every edit re-evaluates the current program.
//!
//! The pieces, leaves first:
//! - `snippet`: fetch a shared program by identifier; never fails, every
//!   failure path resolves to editor-safe diagnostic text
//! - `render` / `ansi`: turn an evaluation result into pane markup,
//!   translating ANSI-colored diagnostics into styled spans
//! - `session`: the controller that ties the bootstrap handshake, initial
//!   content resolution, and the edit/mode-switch evaluation loop together
//!
//! The language runtime and the editor widget are external collaborators
//! behind the [`Runtime`] and [`EditorHandle`] traits; the wasm crate
//! binds them to the host page.

pub mod ansi;
pub mod editor;
pub mod error;
pub mod render;
pub mod runtime;
pub mod session;
pub mod snippet;
pub mod welcome;

pub use ansi::ansi_to_markup;
pub use editor::{editor_grammar, EditorGrammar, EditorHandle, KEYWORDS, LINE_COMMENT, OPERATORS};
pub use error::{BootstrapError, SessionError, TransportError};
pub use render::{render, EvaluationResult, RenderedOutput};
pub use runtime::{OutputMode, Runtime};
pub use session::{ContentPlan, Session};
pub use snippet::{source_from_response, SnippetClient, SnippetDocument, SnippetFile};
pub use welcome::WELCOME_TEXT;
