//! Mu playground as a WASM module for browser hosts.
//!
//! The host page owns the widgets (editor, output pane, mode controls)
//! and the language runtime; this crate owns the session. Handshake, in
//! order:
//!
//! ```js
//! import init, { Playground, grammar, welcome_text } from 'mu-wasm';
//!
//! await init();
//! const playground = new Playground();
//! await playground.bootstrap(runtime.initialize, runtime.evaluate);
//! // Mount the UI only now; until here the page stays blank, and a
//! // rejected bootstrap should be shown as a persistent error.
//! editor.onMount = (instance) =>
//!   playground.editor_mounted(t => instance.setValue(t), () => instance.getValue());
//! editor.onChange = (text) => { pane.innerHTML = playground.editor_changed(text); };
//! modeControls.onSelect = (m) => { pane.innerHTML = playground.set_mode(m); };
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use mu_playground::{
    editor_grammar, BootstrapError, ContentPlan, EditorHandle, OutputMode, Runtime, Session,
    SessionError, SnippetClient, WELCOME_TEXT,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Query parameter carrying a shared snippet identifier.
const SNIPPET_PARAM: &str = "gist";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

/// The host's `evaluate` function behind the [`Runtime`] boundary.
///
/// A thrown value is the runtime's diagnostic: it is coerced to a string,
/// an absent payload to the empty string.
struct JsRuntime {
    evaluate: js_sys::Function,
}

impl Runtime for JsRuntime {
    fn evaluate(&self, source: &str, mode: OutputMode) -> Result<String, String> {
        match self.evaluate.call2(
            &JsValue::NULL,
            &JsValue::from_str(source),
            &JsValue::from_str(mode.as_str()),
        ) {
            Ok(value) => Ok(value.as_string().unwrap_or_default()),
            Err(raised) => Err(raised.as_string().unwrap_or_default()),
        }
    }
}

/// The mounted editor instance, reached through the host's
/// `setValue`/`getValue` pair.
struct JsEditor {
    set_value: js_sys::Function,
    get_value: js_sys::Function,
}

impl EditorHandle for JsEditor {
    fn set_value(&self, text: &str) {
        if let Err(err) = self.set_value.call1(&JsValue::NULL, &JsValue::from_str(text)) {
            tracing::warn!(?err, "editor setValue failed");
        }
    }

    fn value(&self) -> Option<String> {
        self.get_value
            .call0(&JsValue::NULL)
            .ok()
            .and_then(|value| value.as_string())
    }
}

type SharedSession = Rc<RefCell<Session<JsRuntime, JsEditor>>>;

/// One playground session, exported to the host.
#[wasm_bindgen]
pub struct Playground {
    session: SharedSession,
    client: SnippetClient,
}

#[wasm_bindgen]
impl Playground {
    /// A fresh, inert session. Nothing evaluates until
    /// [`bootstrap`](Playground::bootstrap) resolves.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Playground {
        Playground {
            session: Rc::new(RefCell::new(Session::new())),
            client: SnippetClient::default(),
        }
    }

    /// One-time runtime handshake.
    ///
    /// Calls the host's `initialize`, awaits the promise it returns, then
    /// arms the session with `evaluate`. The returned promise rejects if
    /// initialization fails. That is fatal: the host should render a
    /// persistent error instead of mounting the UI.
    pub fn bootstrap(
        &self,
        initialize: &js_sys::Function,
        evaluate: js_sys::Function,
    ) -> Result<js_sys::Promise, JsValue> {
        let pending: js_sys::Promise = initialize
            .call0(&JsValue::NULL)?
            .dyn_into()
            .map_err(|_| JsValue::from_str("initialize did not return a Promise"))?;

        let session = Rc::clone(&self.session);
        Ok(wasm_bindgen_futures::future_to_promise(async move {
            wasm_bindgen_futures::JsFuture::from(pending)
                .await
                .map_err(|cause| {
                    let cause = cause.as_string().unwrap_or_else(|| format!("{cause:?}"));
                    JsValue::from_str(&BootstrapError(cause).to_string())
                })?;
            session.borrow_mut().runtime_ready(JsRuntime { evaluate });
            Ok(JsValue::UNDEFINED)
        }))
    }

    /// The editor widget has mounted.
    ///
    /// Reads the snippet identifier from the page URL. With one present,
    /// the snippet is fetched fire-and-forget and written into the editor
    /// whenever the reply arrives; there is no cancellation. Without
    /// one, the welcome program appears immediately.
    pub fn editor_mounted(&self, set_value: js_sys::Function, get_value: js_sys::Function) {
        let editor = JsEditor {
            set_value,
            get_value,
        };
        let plan = self
            .session
            .borrow_mut()
            .editor_mounted(editor, snippet_query_param());

        if let ContentPlan::Snippet(id) = plan {
            let session = Rc::clone(&self.session);
            let client = self.client.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let text = client.load(&id).await;
                session.borrow_mut().apply_snippet(&text);
            });
        }
    }

    /// The editor content changed; returns the new pane markup.
    pub fn editor_changed(&self, text: Option<String>) -> String {
        self.session
            .borrow_mut()
            .source_changed(text.as_deref())
            .to_string()
    }

    /// Select an output mode and re-evaluate the current editor text;
    /// returns the new pane markup. An unknown mode string is a host bug
    /// and comes back as an error.
    pub fn set_mode(&self, mode: &str) -> Result<String, JsValue> {
        let mode: OutputMode = mode
            .parse()
            .map_err(|err: SessionError| JsValue::from_str(&err.to_string()))?;
        Ok(self.session.borrow_mut().set_mode(mode).to_string())
    }

    /// Latest pane markup.
    pub fn output(&self) -> String {
        self.session.borrow().output().to_string()
    }

    /// Whether the runtime handshake has completed.
    pub fn is_ready(&self) -> bool {
        self.session.borrow().is_ready()
    }
}

impl Default for Playground {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the snippet identifier from the page location, if any.
fn snippet_query_param() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(SNIPPET_PARAM)
}

/// Highlighter registration payload for the host's editor widget.
#[wasm_bindgen]
pub fn grammar() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&editor_grammar()).map_err(JsValue::from)
}

/// The built-in sample program.
#[wasm_bindgen]
pub fn welcome_text() -> String {
    WELCOME_TEXT.to_string()
}

/// Return the playground version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
