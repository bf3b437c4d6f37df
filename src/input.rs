//! Keyboard mapping.
//!
//! Keys are translated into [`Action`]s by mode-specific handlers so the
//! mapping can be tested without a terminal. While a text input has focus
//! every handler steps aside; the text input sees the key instead.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::constants::edit::NUDGE_STEP;

/// Top-level mode of the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Authoring: edit session active, no playback.
    Edit,
    /// Playback preview: edits are disabled.
    Preview,
}

/// What a key asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Start playback, or advance (and exit at the end) while playing.
    PlayOrAdvance,
    /// Hold or release the current slide.
    TogglePause,
    /// Next slide.
    SeekNext,
    /// Previous slide.
    SeekPrevious,
    /// Leave the preview.
    ExitPreview,
    /// Move the selected element by a canvas delta.
    Nudge {
        /// Horizontal delta.
        dx: f64,
        /// Vertical delta.
        dy: f64,
    },
    /// Resize the selected element by a canvas delta.
    Resize {
        /// Width delta.
        dw: f64,
        /// Height delta.
        dh: f64,
    },
    /// Select the next element in paint order (reverse with Shift-Tab).
    CycleSelection {
        /// Walk top-down instead of bottom-up.
        reverse: bool,
    },
    /// Deselect.
    ClearSelection,
    /// Duplicate the selected element.
    Duplicate,
    /// Bring the selected element to the front.
    BringToFront,
    /// Send the selected element to the back.
    SendToBack,
    /// Remove the selected element.
    Remove,
    /// Append a slide.
    NewSlide,
    /// Remove the active slide.
    RemoveSlide,
    /// Make the previous or next slide active while editing.
    SelectSlide {
        /// -1 or +1.
        delta: isize,
    },
    /// Open a text input on the selected element's content.
    EditContent,
    /// Open the `:` command bar.
    OpenCommandBar,
    /// Open the assistant prompt.
    Ask,
    /// Accept the assistant's latest shape suggestion.
    AcceptSuggestion,
}

/// Result of processing an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputResult {
    /// The key maps to an action.
    Action(Action),
    /// The key was ignored (not applicable to this handler).
    Ignored,
    /// The application should quit.
    Quit,
}

/// Context passed to input handlers.
#[derive(Debug, Clone, Copy)]
pub struct InputContext {
    /// Current mode.
    pub mode: AppMode,
    /// Whether a text input has focus.
    pub text_focus: bool,
}

/// Trait for handling keyboard input.
pub trait InputHandler {
    /// Handle a key event.
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult;

    /// Get the name of this handler (for debugging).
    fn name(&self) -> &'static str;
}

/// Global shortcuts: quit.
#[derive(Debug, Default)]
pub struct GlobalHandler;

impl InputHandler for GlobalHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if ctx.text_focus {
            return InputResult::Ignored;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,
            KeyCode::Char('q') if ctx.mode == AppMode::Edit => InputResult::Quit,
            _ => InputResult::Ignored,
        }
    }

    fn name(&self) -> &'static str {
        "GlobalHandler"
    }
}

/// The reserved playback keys, valid in both modes.
#[derive(Debug, Default)]
pub struct PlaybackHandler;

impl InputHandler for PlaybackHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        // Typing into a text field never drives playback
        if ctx.text_focus {
            return InputResult::Ignored;
        }
        let action = match (ctx.mode, key.code) {
            (_, KeyCode::Char(' ')) => Action::PlayOrAdvance,
            (AppMode::Preview, KeyCode::Char('p')) => Action::TogglePause,
            (AppMode::Preview, KeyCode::Right) => Action::SeekNext,
            (AppMode::Preview, KeyCode::Left) => Action::SeekPrevious,
            (AppMode::Preview, KeyCode::Esc) => Action::ExitPreview,
            _ => return InputResult::Ignored,
        };
        InputResult::Action(action)
    }

    fn name(&self) -> &'static str {
        "PlaybackHandler"
    }
}

/// Authoring keys.
#[derive(Debug, Default)]
pub struct EditHandler;

impl InputHandler for EditHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if ctx.text_focus || ctx.mode != AppMode::Edit {
            return InputResult::Ignored;
        }
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let step = NUDGE_STEP;
        let action = match key.code {
            KeyCode::Left if shift => Action::Resize { dw: -step, dh: 0.0 },
            KeyCode::Right if shift => Action::Resize { dw: step, dh: 0.0 },
            KeyCode::Up if shift => Action::Resize { dw: 0.0, dh: -step },
            KeyCode::Down if shift => Action::Resize { dw: 0.0, dh: step },
            KeyCode::Left => Action::Nudge { dx: -step, dy: 0.0 },
            KeyCode::Right => Action::Nudge { dx: step, dy: 0.0 },
            KeyCode::Up => Action::Nudge { dx: 0.0, dy: -step },
            KeyCode::Down => Action::Nudge { dx: 0.0, dy: step },
            KeyCode::Tab => Action::CycleSelection { reverse: false },
            KeyCode::BackTab => Action::CycleSelection { reverse: true },
            KeyCode::Esc => Action::ClearSelection,
            KeyCode::Char('d') => Action::Duplicate,
            KeyCode::Char(']') => Action::BringToFront,
            KeyCode::Char('[') => Action::SendToBack,
            KeyCode::Delete | KeyCode::Backspace => Action::Remove,
            KeyCode::Char('n') => Action::NewSlide,
            KeyCode::Char('X') => Action::RemoveSlide,
            KeyCode::PageUp => Action::SelectSlide { delta: -1 },
            KeyCode::PageDown => Action::SelectSlide { delta: 1 },
            KeyCode::Char('e') | KeyCode::Enter => Action::EditContent,
            KeyCode::Char(':') => Action::OpenCommandBar,
            KeyCode::Char('a') => Action::Ask,
            KeyCode::Char('y') => Action::AcceptSuggestion,
            _ => return InputResult::Ignored,
        };
        InputResult::Action(action)
    }

    fn name(&self) -> &'static str {
        "EditHandler"
    }
}

/// Handler chain for the front end.
#[derive(Debug, Default)]
pub struct KeyMap {
    global: GlobalHandler,
    playback: PlaybackHandler,
    edit: EditHandler,
}

impl KeyMap {
    /// Create the default key map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a key through the handlers; the first that claims it wins.
    /// Key releases are ignored.
    pub fn dispatch(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if key.kind == KeyEventKind::Release {
            return InputResult::Ignored;
        }
        let handlers: [&mut dyn InputHandler; 3] = [&mut self.global, &mut self.playback, &mut self.edit];
        for handler in handlers {
            let result = handler.handle(key, ctx);
            if result != InputResult::Ignored {
                tracing::trace!(handler = handler.name(), ?result, "Key handled");
                return result;
            }
        }
        InputResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn ctx(mode: AppMode, text_focus: bool) -> InputContext {
        InputContext { mode, text_focus }
    }

    #[test]
    fn space_plays_in_both_modes() {
        let mut keys = KeyMap::new();
        for mode in [AppMode::Edit, AppMode::Preview] {
            let result = keys.dispatch(key(KeyCode::Char(' ')), &ctx(mode, false));
            assert_eq!(result, InputResult::Action(Action::PlayOrAdvance));
        }
    }

    #[test]
    fn space_is_suppressed_while_typing() {
        let mut keys = KeyMap::new();
        for mode in [AppMode::Edit, AppMode::Preview] {
            assert_eq!(keys.dispatch(key(KeyCode::Char(' ')), &ctx(mode, true)), InputResult::Ignored);
        }
        assert_eq!(keys.dispatch(key(KeyCode::Char('q')), &ctx(AppMode::Edit, true)), InputResult::Ignored);
    }

    #[test]
    fn arrows_seek_in_preview_and_nudge_in_edit() {
        let mut keys = KeyMap::new();
        assert_eq!(
            keys.dispatch(key(KeyCode::Right), &ctx(AppMode::Preview, false)),
            InputResult::Action(Action::SeekNext)
        );
        assert_eq!(
            keys.dispatch(key(KeyCode::Right), &ctx(AppMode::Edit, false)),
            InputResult::Action(Action::Nudge { dx: 10.0, dy: 0.0 })
        );
        let shifted = KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT);
        assert_eq!(
            keys.dispatch(shifted, &ctx(AppMode::Edit, false)),
            InputResult::Action(Action::Resize { dw: 0.0, dh: 10.0 })
        );
    }

    #[test]
    fn edit_keys_are_dead_in_preview() {
        let mut keys = KeyMap::new();
        assert_eq!(keys.dispatch(key(KeyCode::Char('d')), &ctx(AppMode::Preview, false)), InputResult::Ignored);
        assert_eq!(keys.dispatch(key(KeyCode::Char('q')), &ctx(AppMode::Preview, false)), InputResult::Ignored);
        assert_eq!(keys.dispatch(key(KeyCode::Char('q')), &ctx(AppMode::Edit, false)), InputResult::Quit);
    }
}
