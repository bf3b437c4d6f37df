//! Single-line text input.
//!
//! Used for the command bar, element content editing and assistant prompts.
//! While one is open it owns the keyboard: no playback or edit shortcut
//! fires, Space included.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

use crate::types::ElementId;

/// What the typed text is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTarget {
    /// A `:` command.
    Command,
    /// New content for an element.
    Content(ElementId),
    /// A question for the assistant.
    Ask,
}

/// Result of a key press in a text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextAction {
    /// The buffer or cursor changed.
    Modified,
    /// The key was handled but nothing changed.
    NoChange,
    /// Enter: the text is complete.
    Submit,
    /// Esc: abandon the input.
    Cancel,
}

/// Buffer plus cursor, counted in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    target: TextTarget,
    buffer: String,
    cursor: usize,
}

impl TextInput {
    /// Open an empty input.
    pub fn new(target: TextTarget) -> Self {
        Self { target, buffer: String::new(), cursor: 0 }
    }

    /// Open an input pre-filled with `text`, cursor at the end.
    pub fn with_text(target: TextTarget, text: &str) -> Self {
        Self { target, buffer: text.to_string(), cursor: text.chars().count() }
    }

    /// What the input is for.
    pub fn target(&self) -> &TextTarget {
        &self.target
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Consume the input, returning its target and text.
    pub fn into_parts(self) -> (TextTarget, String) {
        (self.target, self.buffer)
    }

    /// Display column of the cursor.
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.byte_index(self.cursor)].width()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer.char_indices().nth(char_index).map_or(self.buffer.len(), |(i, _)| i)
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Insert text at the cursor (used for paste).
    pub fn insert_str(&mut self, s: &str) {
        let clean: String = s.chars().filter(|c| !c.is_control()).collect();
        let at = self.byte_index(self.cursor);
        self.buffer.insert_str(at, &clean);
        self.cursor += clean.chars().count();
    }

    /// Apply a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> TextAction {
        match key.code {
            KeyCode::Enter => TextAction::Submit,
            KeyCode::Esc => TextAction::Cancel,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.buffer.is_empty() {
                    return TextAction::NoChange;
                }
                self.buffer.clear();
                self.cursor = 0;
                TextAction::Modified
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let at = self.byte_index(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
                TextAction::Modified
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return TextAction::NoChange;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.buffer.remove(at);
                TextAction::Modified
            }
            KeyCode::Delete => {
                if self.cursor >= self.len() {
                    return TextAction::NoChange;
                }
                let at = self.byte_index(self.cursor);
                self.buffer.remove(at);
                TextAction::Modified
            }
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to((self.cursor + 1).min(self.len())),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.len()),
            _ => TextAction::NoChange,
        }
    }

    fn move_to(&mut self, cursor: usize) -> TextAction {
        if cursor == self.cursor {
            TextAction::NoChange
        } else {
            self.cursor = cursor;
            TextAction::Modified
        }
    }
}
