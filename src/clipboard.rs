/*!
 * Clipboard sinks for the copy operation.
 */

use std::io::Write;

use crate::errors::ClipboardError;

/// Destination for copied text
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard, optionally refusing every write
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    unavailable: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail
    pub fn unavailable() -> Self {
        Self {
            contents: None,
            unavailable: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::Unavailable(
                "clipboard access denied".to_string(),
            ));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Writes copied text to standard output, for piping into a system clipboard tool
#[derive(Debug, Default)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .and_then(|_| stdout.write_all(b"\n"))
            .and_then(|_| stdout.flush())
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}
