use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Outcome of a key press while editing text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    Continue,
    /// Enter pressed; carries the edited text
    Commit(String),
    /// Escape pressed; the original text stands
    Cancel,
}

/// Check for escape key (Esc or Ctrl+[)
pub fn is_escape(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('[') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

/// Single-line text editor used for slot text and list names.
/// Note: cursor is a CHARACTER index, not a byte index
#[derive(Debug, Default)]
pub struct EditBuffer {
    pub buffer: String,
    pub cursor: usize,
    original: String,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_edit(&mut self, initial: &str) {
        self.original = initial.to_string();
        self.buffer = initial.to_string();
        self.cursor = self.buffer.chars().count();
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditResult {
        if is_escape(key) {
            self.buffer = self.original.clone();
            return EditResult::Cancel;
        }

        match key.code {
            KeyCode::Enter => return EditResult::Commit(self.buffer.clone()),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = byte_offset(&self.buffer, self.cursor);
                    self.buffer.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.buffer.chars().count() {
                    let at = byte_offset(&self.buffer, self.cursor);
                    self.buffer.remove(at);
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.clear();
                self.cursor = 0;
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                let at = byte_offset(&self.buffer, self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor = std::cmp::min(self.cursor + 1, self.buffer.chars().count());
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.buffer.chars().count(),
            _ => {}
        }

        EditResult::Continue
    }

    /// Buffer with a cursor marker, for display
    pub fn display(&self) -> String {
        let mut shown = self.buffer.clone();
        shown.insert(byte_offset(&self.buffer, self.cursor), '_');
        shown
    }
}
