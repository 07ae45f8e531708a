//! The opaque runtime-module boundary.
//!
//! The language implementation is an external collaborator with one
//! synchronous entry point. Its one-time asynchronous initialization is
//! driven by the host shell before a [`Runtime`] value ever reaches the
//! session (see the wasm crate's bootstrap handshake).

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the runtime pretty-prints an evaluation result.
///
/// A parameter to *evaluation*, not to formatting: the runtime shapes its
/// own output and the playground displays it verbatim on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Surface-syntax result.
    #[default]
    Concrete,
    /// Structural (AST-level) result.
    Abstract,
    /// Internal representation.
    Debug,
}

impl OutputMode {
    /// Wire string passed to the runtime's evaluate call.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concrete => "concrete",
            Self::Abstract => "abstract",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concrete" => Ok(Self::Concrete),
            "abstract" => Ok(Self::Abstract),
            "debug" => Ok(Self::Debug),
            other => Err(SessionError::UnknownMode(other.to_string())),
        }
    }
}

/// The language runtime as the playground sees it.
///
/// `Err` carries the runtime's diagnostic text, which may contain ANSI
/// color escapes; the session never lets it reach the pane unformatted.
/// The call is synchronous and blocks the UI thread: a program that
/// makes the runtime loop will freeze the interface, an accepted
/// limitation.
pub trait Runtime {
    /// Evaluate `source` and pretty-print the result in `mode`.
    fn evaluate(&self, source: &str, mode: OutputMode) -> Result<String, String>;
}
