//! ANSI SGR escapes to inline-styled markup.
//!
//! The runtime colors its diagnostics for a terminal; the output pane
//! renders markup. This converter maps the SGR subset the runtime emits
//! (16-color foreground/background, bold, italic, underline, reset) onto
//! `<span style="...">` runs and HTML-escapes the text in between.
//! Sequences it does not understand are dropped rather than shown raw.

/// Classic 16-color terminal palette: normal 0–7, then bright 8–15.
const PALETTE: [&str; 16] = [
    "#000", "#A00", "#0A0", "#A50", "#00A", "#A0A", "#0AA", "#AAA",
    "#555", "#F55", "#5F5", "#FF5", "#55F", "#F5F", "#5FF", "#FFF",
];

/// Text attributes accumulated from SGR parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Style {
    /// Foreground palette index.
    fg: Option<u8>,
    /// Background palette index.
    bg: Option<u8>,
    bold: bool,
    italic: bool,
    underline: bool,
}

impl Style {
    fn is_plain(self) -> bool {
        self == Style::default()
    }

    /// Fold one SGR parameter into the style. Unsupported parameters are
    /// ignored.
    fn apply(&mut self, param: u16) {
        match param {
            0 => *self = Style::default(),
            1 => self.bold = true,
            3 => self.italic = true,
            4 => self.underline = true,
            22 => self.bold = false,
            23 => self.italic = false,
            24 => self.underline = false,
            30..=37 => self.fg = Some((param - 30) as u8),
            39 => self.fg = None,
            40..=47 => self.bg = Some((param - 40) as u8),
            49 => self.bg = None,
            90..=97 => self.fg = Some((param - 90 + 8) as u8),
            100..=107 => self.bg = Some((param - 100 + 8) as u8),
            _ => {}
        }
    }

    fn css(self) -> String {
        let mut parts = Vec::new();
        if self.bold {
            parts.push("font-weight:bold".to_string());
        }
        if self.italic {
            parts.push("font-style:italic".to_string());
        }
        if self.underline {
            parts.push("text-decoration:underline".to_string());
        }
        if let Some(i) = self.fg {
            parts.push(format!("color:{}", PALETTE[usize::from(i)]));
        }
        if let Some(i) = self.bg {
            parts.push(format!("background-color:{}", PALETTE[usize::from(i)]));
        }
        parts.join(";")
    }
}

/// Convert terminal-style text to pane markup.
///
/// SGR runs become styled spans; text content is HTML-escaped. Pure, and
/// an empty input renders as an empty string.
pub fn ansi_to_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut style = Style::default();
    let mut open = false;

    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            if chars.peek() == Some(&'[') {
                chars.next();
                let mut params = String::new();
                let mut terminator = None;
                for c in chars.by_ref() {
                    if c.is_ascii_digit() || c == ';' {
                        params.push(c);
                    } else {
                        terminator = Some(c);
                        break;
                    }
                }
                // Only SGR ('m') carries style; every other CSI sequence
                // is dropped. An unterminated sequence swallows the rest
                // of the input.
                if terminator == Some('m') {
                    let next = fold_params(style, &params);
                    if next != style {
                        if open {
                            out.push_str("</span>");
                            open = false;
                        }
                        style = next;
                    }
                }
            }
            // A bare escape (no '[') is dropped on its own.
            continue;
        }

        if !style.is_plain() && !open {
            out.push_str("<span style=\"");
            out.push_str(&style.css());
            out.push_str("\">");
            open = true;
        }
        push_escaped(&mut out, ch);
    }

    if open {
        out.push_str("</span>");
    }
    out
}

/// Apply a semicolon-separated SGR parameter list to `current`.
fn fold_params(current: Style, params: &str) -> Style {
    let mut style = current;
    if params.is_empty() {
        // ESC[m is shorthand for reset.
        style.apply(0);
        return style;
    }
    for part in params.split(';') {
        if part.is_empty() {
            // An elided parameter ("1;;31") counts as 0.
            style.apply(0);
        } else if let Ok(n) = part.parse::<u16>() {
            style.apply(n);
        }
    }
    style
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}
