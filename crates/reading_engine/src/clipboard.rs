//! Clipboard access for the Copy action

use crate::{EngineError, Result};

/// Write-only system clipboard
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// In-memory clipboard for tests and headless hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// A clipboard that is never available, e.g. when the host denies access
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

impl Clipboard for UnavailableClipboard {
    fn set_text(&mut self, _text: &str) -> Result<()> {
        Err(EngineError::Clipboard("clipboard unavailable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_keeps_last_text() {
        let mut clipboard = MemoryClipboard::default();
        assert_eq!(clipboard.contents(), None);
        clipboard.set_text("authority").unwrap();
        clipboard.set_text("dogma").unwrap();
        assert_eq!(clipboard.contents(), Some("dogma"));
    }

    #[test]
    fn test_unavailable_clipboard_errors() {
        let err = UnavailableClipboard.set_text("x").unwrap_err();
        assert!(matches!(err, EngineError::Clipboard(_)));
    }
}
