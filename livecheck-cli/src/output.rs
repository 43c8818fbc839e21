//! Output formatting abstraction for text vs JSON rendering
//!
//! Check output flows through [`OutputWriter`] which handles format switching.
//! This keeps format-specific logic out of the engine entirely.

use std::io::Write;

use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputFormat {
    /// `--json` selects JSON, anything else is text.
    pub fn from_json_flag(json: Option<bool>) -> Self {
        if json == Some(true) {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Abstraction for writing CLI output in different formats.
///
/// Callers pass a payload that implements both `Serialize` (for JSON)
/// and `Render` (for text).
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render a payload to `w`.
    ///
    /// For `Text` format, delegates to `Render::render_text()`.
    /// For `Json` format, serialises via `serde_json`.
    pub fn render_to<T: Render + Serialize>(
        &self,
        w: &mut dyn Write,
        payload: &T,
    ) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Text => payload.render_text(w)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        w.flush()
    }
}

/// Trait for human-readable text rendering.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}
