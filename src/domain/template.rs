//! Capture template rendering
//!
//! Supported placeholders:
//! - `%c` captured content
//! - `%t` inactive timestamp, e.g. `[2026-01-05 Mon 09:30]`
//! - `%Y %m %d %H %M %S %A %a %B %b` date and time parts
//! - `%%` a literal percent sign
//!
//! Any other `%x` sequence is copied through unchanged. Substitution is a
//! single left-to-right pass, so placeholders inside the content are not
//! expanded again.

use chrono::NaiveDateTime;

/// Format used when none is configured
pub const DEFAULT_FORMAT: &str = "* %t\n  %c";

/// Template for captured entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTemplate {
    format: String,
}

impl Default for CaptureTemplate {
    fn default() -> Self {
        CaptureTemplate::new(DEFAULT_FORMAT)
    }
}

impl CaptureTemplate {
    pub fn new(format: impl Into<String>) -> Self {
        CaptureTemplate {
            format: format.into(),
        }
    }

    /// Configured format, or the default when unset or empty.
    pub fn from_config(format: Option<&str>) -> Self {
        match format {
            Some(f) if !f.is_empty() => CaptureTemplate::new(f),
            _ => CaptureTemplate::default(),
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Render an entry. The result always ends with a newline.
    pub fn render(&self, content: &str, now: NaiveDateTime) -> String {
        let mut entry = expand(&self.format, Some(content), now);
        if !entry.ends_with('\n') {
            entry.push('\n');
        }
        entry
    }
}

/// Expand date tokens in a target file path, e.g. `journal-%Y.org`.
///
/// `%c` and `%t` have no meaning in a path and are left as written.
pub fn render_path(path: &str, now: NaiveDateTime) -> String {
    expand(path, None, now)
}

fn expand(format: &str, content: Option<&str>, now: NaiveDateTime) -> String {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let Some(spec) = chars.next() else {
            out.push('%');
            break;
        };

        match (spec, content) {
            ('c', Some(content)) => out.push_str(content),
            ('t', Some(_)) => out.push_str(&now.format("[%Y-%m-%d %a %H:%M]").to_string()),
            ('%', _) => out.push('%'),
            ('Y' | 'm' | 'd' | 'H' | 'M' | 'S' | 'A' | 'a' | 'B' | 'b', _) => {
                out.push_str(&now.format(&format!("%{}", spec)).to_string());
            }
            _ => {
                out.push('%');
                out.push(spec);
            }
        }
    }

    out
}
