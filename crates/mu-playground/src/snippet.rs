//! Remote snippet loading.
//!
//! A shared program is fetched by identifier from the public gist store.
//! Loading never fails: every failure path (transport error, non-200
//! status, malformed body, zero or multiple files) resolves to a
//! comment-prefixed diagnostic string that is safe to place directly into
//! the editor.

use crate::editor::LINE_COMMENT;
use crate::error::TransportError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Snippet store endpoint, path-parameterized by identifier.
pub const SNIPPET_API_BASE: &str = "https://api.github.com/gists";

/// The document shape returned by the snippet store.
///
/// Unknown fields are ignored; the store sends far more than the
/// playground reads.
#[derive(Debug, Clone, Deserialize)]
pub struct SnippetDocument {
    pub id: String,
    pub files: BTreeMap<String, SnippetFile>,
}

/// One file entry inside a [`SnippetDocument`].
#[derive(Debug, Clone, Deserialize)]
pub struct SnippetFile {
    pub content: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub truncated: bool,
}

/// Decide the editor content for a completed snippet request.
///
/// Pure over `(id, status, body)` so the whole decision table is testable
/// without a network. A non-200 status embeds both the identifier and the
/// status code; an unparseable body embeds the parse failure; zero files
/// and multiple files each get their own diagnostic; the loader never
/// guesses between files. Exactly one file resolves to its content
/// verbatim.
pub fn source_from_response(id: &str, status: u16, body: &str) -> String {
    if status != 200 {
        return format!("{LINE_COMMENT} Error fetching snippet {id}: status code {status}");
    }

    let doc: SnippetDocument = match serde_json::from_str(body) {
        Ok(doc) => doc,
        Err(err) => return format!("{LINE_COMMENT} Error loading snippet: {err}"),
    };

    let mut files = doc.files.into_values();
    match (files.next(), files.next()) {
        (Some(file), None) => file.content,
        (None, _) => format!("{LINE_COMMENT} No files found in snippet {id}"),
        (Some(_), Some(_)) => format!(
            "{LINE_COMMENT} Snippet {id} contains multiple files, cannot choose which one to use"
        ),
    }
}

/// HTTP client for the snippet store.
///
/// One outbound request per [`load`](SnippetClient::load) call; no
/// retries, no caching. Uses the browser's fetch on wasm32 and reqwest
/// elsewhere.
#[derive(Debug, Clone)]
pub struct SnippetClient {
    base_url: String,
}

impl Default for SnippetClient {
    fn default() -> Self {
        Self::new(SNIPPET_API_BASE)
    }
}

impl SnippetClient {
    /// Client against a custom store URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Fetch the snippet `id` and resolve it to editor content.
    ///
    /// Never fails; a transport error is downgraded to a diagnostic like
    /// every other failure path.
    pub async fn load(&self, id: &str) -> String {
        let url = format!("{}/{}", self.base_url, id);
        match self.fetch(&url).await {
            Ok((status, body)) => source_from_response(id, status, &body),
            Err(err) => {
                tracing::warn!(%id, %err, "snippet request failed");
                format!("{LINE_COMMENT} Error loading snippet: {err}")
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn fetch(&self, url: &str) -> Result<(u16, String), TransportError> {
        let response = reqwest::get(url)
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        Ok((status, body))
    }

    #[cfg(target_arch = "wasm32")]
    async fn fetch(&self, url: &str) -> Result<(u16, String), TransportError> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Request, RequestInit, RequestMode, Response};

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| TransportError::Request(format!("{e:?}")))?;

        let window =
            web_sys::window().ok_or_else(|| TransportError::Request("no window".into()))?;
        let reply = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| TransportError::Request(format!("{e:?}")))?;
        let response: Response = reply
            .dyn_into()
            .map_err(|_| TransportError::Request("reply is not a Response".into()))?;

        let status = response.status();
        let body = JsFuture::from(
            response
                .text()
                .map_err(|e| TransportError::Body(format!("{e:?}")))?,
        )
        .await
        .map_err(|e| TransportError::Body(format!("{e:?}")))?;

        Ok((status, body.as_string().unwrap_or_default()))
    }
}
