//! Best-effort clipboard access.

use std::io::{self, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Errors from a clipboard write. Callers treat these as non-critical.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// The system clipboard could not be opened or written.
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),

    /// Writing the terminal escape sequence failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Something that can receive copied text.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard, falling back to an OSC 52 terminal escape.
///
/// The arboard handle is kept open after the first use; on X11 the copied
/// text only survives while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_native(&mut self, text: &str) -> Result<(), arboard::Error> {
        let clipboard = match &mut self.inner {
            Some(clipboard) => clipboard,
            slot => slot.insert(arboard::Clipboard::new()?),
        };
        clipboard.set_text(text.to_string())
    }
}

impl Clipboard for SystemClipboard {
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        match self.write_native(text) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::debug!(%error, "native clipboard unavailable, using OSC 52");
                self.inner = None;
                let mut out = io::stdout();
                out.write_all(osc52_sequence(text).as_bytes())?;
                out.flush()?;
                Ok(())
            }
        }
    }
}

/// Builds the OSC 52 "set clipboard" escape for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
