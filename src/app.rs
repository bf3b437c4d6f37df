//! Terminal application state.
//!
//! [`App`] owns the workspace and its collaborators (store, media source,
//! assistant, tick scheduler) and turns key presses and `:` commands into
//! calls on them. Slow work (assistant replies, autoplay ticks) comes back
//! through channels drained by [`App::handle_updates`] once per frame.

use std::sync::Arc;
use std::time::Instant;

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::assistant::gemini::GeminiAssistant;
use crate::assistant::{Assistant, AssistantRequest, Conversation};
use crate::config::Config;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::constants::playback::{MAX_UI_DURATION_SECS, MIN_UI_DURATION_SECS};
use crate::constants::share::WORKING_DECK_KEY;
use crate::edit::{EditOutcome, EditSession, ElementPatch, Refusal, SlidePatch};
use crate::error::Result;
use crate::input::{Action, AppMode, InputContext, InputResult, KeyMap};
use crate::media::{LocalMedia, MediaKind, MediaSource};
use crate::model::{AnimationIn, AnimationOut, Background, Deck, Element, ElementKind, ElementType, Point, Size};
use crate::presets;
use crate::scheduler::TickScheduler;
use crate::storage::{self, DeckStore, FileStore, Hydrated};
use crate::text_input::{TextAction, TextInput, TextTarget};
use crate::timeline::{EndOfDeck, Transition};
use crate::types::{ElementId, ShareId};
use crate::workspace::Workspace;

/// Messages from background tasks.
#[derive(Debug)]
pub enum AppUpdate {
    /// The assistant answered (or failed to).
    AssistantReply(Result<String>),
}

/// Application state for the terminal front end.
pub struct App {
    /// Loaded configuration.
    pub config: Config,
    /// The open deck.
    pub workspace: Workspace,
    /// Assistant chat history.
    pub conversation: Conversation,
    /// Open text input, if any. It owns the keyboard while open.
    pub text_input: Option<TextInput>,
    /// Error shown in a modal until Esc.
    pub error_message: Option<String>,
    /// One-line status shown in the command bar until the next key.
    pub status_message: Option<String>,
    /// Whether the key help overlay is open.
    pub show_help: bool,
    /// An assistant request is in flight.
    pub is_asking: bool,
    /// Link of the most recent share.
    pub last_share: Option<String>,
    keys: KeyMap,
    scheduler: TickScheduler,
    store: Box<dyn DeckStore + Send>,
    media: Box<dyn MediaSource + Send>,
    assistant: Option<Arc<dyn Assistant>>,
    async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
    should_quit: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("workspace", &self.workspace)
            .field("is_asking", &self.is_asking)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Build the app from config: file store under the data directory, local
    /// media, and the assistant when credentials are present. The working
    /// deck is hydrated from the store.
    pub fn new(config: Config) -> Self {
        let store = FileStore::new(config.data_dir.clone(), config.share_retention_days);
        let assistant: Option<Arc<dyn Assistant>> = if config.has_assistant_credentials() {
            Some(Arc::new(GeminiAssistant::new(&config)))
        } else {
            tracing::info!("No assistant credentials; the assistant is disabled");
            None
        };
        let mut app = Self::with_parts(config, Box::new(store), Box::new(LocalMedia::new()), assistant);
        app.restore_working_deck();
        app
    }

    /// Build the app from explicit collaborators. Starts with a default deck.
    pub fn with_parts(
        config: Config,
        store: Box<dyn DeckStore + Send>,
        media: Box<dyn MediaSource + Send>,
        assistant: Option<Arc<dyn Assistant>>,
    ) -> Self {
        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let scheduler = TickScheduler::new(config.tick_period);
        Self {
            config,
            workspace: Workspace::default(),
            conversation: Conversation::new(),
            text_input: None,
            error_message: None,
            status_message: None,
            show_help: false,
            is_asking: false,
            last_share: None,
            keys: KeyMap::new(),
            scheduler,
            store,
            media,
            assistant,
            async_task_tx,
            async_task_rx,
            should_quit: false,
        }
    }

    /// Whether the main loop should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Ask the main loop to exit.
    pub fn quit(&mut self) {
        self.scheduler.cancel();
        self.should_quit = true;
    }

    /// Current top-level mode.
    pub fn mode(&self) -> AppMode {
        if self.workspace.is_previewing() {
            AppMode::Preview
        } else {
            AppMode::Edit
        }
    }

    /// Whether an assistant is configured.
    pub fn has_assistant(&self) -> bool {
        self.assistant.is_some()
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        if self.error_message.is_some() {
            if key.code == KeyCode::Esc {
                self.error_message = None;
            }
            return;
        }
        self.status_message = None;

        if let Some(input) = self.text_input.as_mut() {
            match input.handle_key(key) {
                TextAction::Submit => {
                    if let Some(input) = self.text_input.take() {
                        let (target, text) = input.into_parts();
                        self.submit_text(target, text);
                    }
                }
                TextAction::Cancel => self.text_input = None,
                TextAction::Modified | TextAction::NoChange => {}
            }
            return;
        }

        if key.code == KeyCode::F(1) || (key.code == KeyCode::Char('?') && self.mode() == AppMode::Edit) {
            self.show_help = true;
            return;
        }

        let ctx = InputContext { mode: self.mode(), text_focus: false };
        match self.keys.dispatch(key, &ctx) {
            InputResult::Action(action) => self.apply(action),
            InputResult::Quit => self.quit(),
            InputResult::Ignored => {}
        }
    }

    /// Handle pasted text. Only an open text input accepts it.
    pub fn handle_paste(&mut self, text: &str) {
        if let Some(input) = self.text_input.as_mut() {
            input.insert_str(text);
        }
    }

    /// Drain background results and autoplay ticks.
    pub fn handle_updates(&mut self) {
        loop {
            match self.async_task_rx.try_recv() {
                Ok(AppUpdate::AssistantReply(reply)) => {
                    self.is_asking = false;
                    let count = self.conversation.record_reply(reply).svg_suggestions().len();
                    if count > 0 {
                        self.status_message = Some(format!("{count} shape suggestion(s); press y to add"));
                    }
                }
                Err(mpsc::error::TryRecvError::Empty | mpsc::error::TryRecvError::Disconnected) => break,
            }
        }

        for event in self.scheduler.drain() {
            let transition = self.workspace.tick(event.elapsed);
            self.after_playback(transition);
            if !self.workspace.is_previewing() {
                break;
            }
        }

        if !self.workspace.is_previewing() && self.scheduler.is_running() {
            self.scheduler.cancel();
        }
        self.workspace.prune(Instant::now());
    }

    /// Apply one key action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::PlayOrAdvance => {
                let t = self.workspace.play_or_advance();
                self.after_playback(t);
            }
            Action::TogglePause => {
                let t = self.workspace.toggle_pause();
                self.after_playback(t);
            }
            Action::SeekNext => {
                let t = self.workspace.seek_next();
                self.after_playback(t);
            }
            Action::SeekPrevious => {
                let t = self.workspace.seek_previous();
                self.after_playback(t);
            }
            Action::ExitPreview => {
                let t = self.workspace.exit_preview();
                self.after_playback(t);
            }
            Action::Nudge { dx, dy } => {
                if let Some((id, position)) = self.with_selected(|el| el.position) {
                    self.edit(|e| e.move_element(&id, position.offset(dx, dy)));
                }
            }
            Action::Resize { dw, dh } => {
                if let Some((id, size)) = self.with_selected(|el| el.size) {
                    self.edit(|e| e.resize_element(&id, Size::new(size.width + dw, size.height + dh)));
                }
            }
            Action::CycleSelection { reverse } => self.cycle_selection(reverse),
            Action::ClearSelection => {
                if let Some(mut e) = self.workspace.edit() {
                    e.clear_selection();
                }
            }
            Action::Duplicate => self.edit_selected(|e, id| e.duplicate_element(id)),
            Action::BringToFront => self.edit_selected(|e, id| e.bring_to_front(id)),
            Action::SendToBack => self.edit_selected(|e, id| e.send_to_back(id)),
            Action::Remove => {
                let Some(element) = self.workspace.selected_element().cloned() else {
                    self.status_message = Some("Nothing selected".to_string());
                    return;
                };
                let removed = self.edit(|e| e.remove_element(&element.id));
                if removed.is_some_and(|o| o.is_applied()) {
                    self.workspace.note_removed(element);
                }
            }
            Action::NewSlide => {
                self.edit(|e| e.add_slide());
            }
            Action::RemoveSlide => {
                let index = self.workspace.deck().active_index();
                self.edit(|e| e.remove_slide(index));
            }
            Action::SelectSlide { delta } => {
                let deck = self.workspace.deck();
                let target = deck.active_index().saturating_add_signed(delta).min(deck.len() - 1);
                self.workspace.select_slide(target);
            }
            Action::EditContent => {
                let Some(element) = self.workspace.selected_element() else {
                    self.status_message = Some("Select an element first (Tab)".to_string());
                    return;
                };
                if element.element_type().is_text_like() {
                    self.text_input = Some(TextInput::with_text(
                        TextTarget::Content(element.id.clone()),
                        element.content(),
                    ));
                } else {
                    self.status_message =
                        Some(format!("{} content is not typed; use :image, :video or :shape", element.label()));
                }
            }
            Action::OpenCommandBar => self.text_input = Some(TextInput::new(TextTarget::Command)),
            Action::Ask => {
                if self.is_asking {
                    self.status_message = Some("Still waiting for the assistant".to_string());
                } else {
                    self.text_input = Some(TextInput::new(TextTarget::Ask));
                }
            }
            Action::AcceptSuggestion => {
                let Some(markup) = self.conversation.latest_suggestions().into_iter().next() else {
                    self.status_message = Some("No shape suggestion to add".to_string());
                    return;
                };
                self.edit(|e| e.add_shape_markup(&markup));
            }
        }
    }

    /// Keep the scheduler in step with the playback session.
    fn after_playback(&mut self, transition: Transition) {
        if !self.workspace.is_previewing() {
            self.scheduler.cancel();
        } else if transition.requires_reschedule() {
            self.scheduler.restart();
        }
    }

    fn selected_id(&mut self) -> Option<ElementId> {
        let id = self.workspace.selected_element().map(|el| el.id.clone());
        if id.is_none() {
            self.status_message = Some("Select an element first (Tab)".to_string());
        }
        id
    }

    fn with_selected<T>(&mut self, f: impl FnOnce(&Element) -> T) -> Option<(ElementId, T)> {
        let found = self.workspace.selected_element().map(|el| (el.id.clone(), f(el)));
        if found.is_none() {
            self.status_message = Some("Select an element first (Tab)".to_string());
        }
        found
    }

    /// Run one edit and report refusals. `None` while previewing.
    fn edit(&mut self, op: impl FnOnce(&mut EditSession<'_>) -> EditOutcome) -> Option<EditOutcome> {
        let Some(mut session) = self.workspace.edit() else {
            self.status_message = Some("Editing is disabled during preview".to_string());
            return None;
        };
        let outcome = op(&mut session);
        match &outcome {
            // A stale id is a silent no-op
            EditOutcome::Refused(Refusal::UnknownElement(_)) | EditOutcome::Applied => {}
            EditOutcome::Refused(refusal) => self.status_message = Some(capitalize(&refusal.to_string())),
            EditOutcome::Created(id) => tracing::debug!(%id, "Element created"),
        }
        Some(outcome)
    }

    fn edit_selected(&mut self, op: impl FnOnce(&mut EditSession<'_>, &ElementId) -> EditOutcome) {
        if let Some(id) = self.selected_id() {
            self.edit(|e| op(e, &id));
        }
    }

    fn cycle_selection(&mut self, reverse: bool) {
        let slide = self.workspace.deck().active_slide();
        let mut order: Vec<ElementId> = slide.paint_order().into_iter().map(|el| el.id.clone()).collect();
        if order.is_empty() {
            return;
        }
        if reverse {
            order.reverse();
        }
        let next = match self.workspace.selection().get().and_then(|id| order.iter().position(|o| o == id)) {
            Some(i) => order[(i + 1) % order.len()].clone(),
            None => order[0].clone(),
        };
        self.edit(|e| e.select_element(&next));
    }

    fn submit_text(&mut self, target: TextTarget, text: String) {
        match target {
            TextTarget::Command => self.run_command(&text),
            TextTarget::Content(id) => {
                self.edit(|e| e.update_element(&id, ElementPatch::with_content(text)));
            }
            TextTarget::Ask => self.ask(&text),
        }
    }

    /// Send a message to the assistant about the active slide.
    pub fn ask(&mut self, text: &str) {
        if self.is_asking || !self.conversation.push_user(text) {
            return;
        }
        let Some(assistant) = self.assistant.clone() else {
            self.conversation.note("The assistant is not configured. Set GEMINI_API_KEY to enable it.");
            return;
        };
        let request = AssistantRequest::for_slide(self.workspace.deck().active_slide(), text);
        let tx = self.async_task_tx.clone();
        self.is_asking = true;
        tokio::spawn(async move {
            let reply = assistant.suggest(&request).await;
            if tx.send(AppUpdate::AssistantReply(reply)).await.is_err() {
                tracing::debug!("Assistant reply dropped; app has shut down");
            }
        });
    }

    /// Run a `:` command line.
    pub fn run_command(&mut self, line: &str) {
        let line = line.trim();
        let (command, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, a)| (c, a.trim()));
        tracing::debug!(command, "Running command");

        match command {
            "" => {}
            "q" | "quit" => self.quit(),
            "help" => self.show_help = true,
            "ask" => self.ask(arg),
            "play" => self.apply(Action::PlayOrAdvance),
            "shape" => self.add_shape(arg),
            "svg" => {
                self.edit(|e| e.add_shape_markup(arg));
            }
            "image" => self.add_media(arg, MediaKind::Image),
            "video" => self.add_media(arg, MediaKind::Video),
            "filter" => {
                let preset = if arg.is_empty() { "none" } else { arg };
                self.edit_selected(|e, id| e.apply_filter(id, preset));
            }
            "color" => self.patch_selected(ElementPatch { color: Some(arg.to_string()), ..ElementPatch::default() }),
            "fill" => self.patch_selected(ElementPatch {
                background_color: Some(arg.to_string()),
                ..ElementPatch::default()
            }),
            "opacity" => match parse_number(arg) {
                Some(opacity) => self.patch_selected(ElementPatch { opacity: Some(opacity), ..ElementPatch::default() }),
                None => self.error_message = Some(format!("Not an opacity: {arg}")),
            },
            "rotate" => match parse_number(arg) {
                Some(deg) => self.patch_selected(ElementPatch { rotation: Some(deg), ..ElementPatch::default() }),
                None => self.error_message = Some(format!("Not an angle: {arg}")),
            },
            "in" => match parse_animation_in(arg) {
                Some(a) => self.patch_selected(ElementPatch { animation_in: Some(a), ..ElementPatch::default() }),
                None => self.error_message = Some(format!("Unknown enter animation: {arg}")),
            },
            "out" => match parse_animation_out(arg) {
                Some(a) => self.patch_selected(ElementPatch { animation_out: Some(a), ..ElementPatch::default() }),
                None => self.error_message = Some(format!("Unknown exit animation: {arg}")),
            },
            "move" => match parse_pair(arg) {
                Some((x, y)) => self.edit_selected(|e, id| e.move_element(id, Point::new(x, y))),
                None => self.error_message = Some("Usage: move <x> <y>".to_string()),
            },
            "size" => match parse_pair(arg) {
                Some((w, h)) => self.edit_selected(|e, id| e.resize_element(id, Size::new(w, h))),
                None => self.error_message = Some("Usage: size <width> <height>".to_string()),
            },
            "layer" => match arg.parse::<usize>() {
                Ok(n) if n >= 1 => self.move_layer(n - 1),
                _ => self.error_message = Some("Usage: layer <position, 1 = bottom>".to_string()),
            },
            "bg" => {
                if arg.is_empty() {
                    self.error_message = Some("Usage: bg <color | gradient | image url>".to_string());
                } else {
                    let patch = SlidePatch { background: Some(parse_background(arg)), ..SlidePatch::default() };
                    self.edit(|e| e.update_slide(patch));
                }
            }
            "duration" => self.set_duration(arg),
            "slide" => match arg.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if !self.workspace.select_slide(n - 1) {
                        self.status_message = Some(format!("No slide {n}"));
                    }
                }
                _ => self.error_message = Some("Usage: slide <number>".to_string()),
            },
            "demo" => {
                self.edit(|e| e.load_demo());
            }
            "save" => {
                self.save();
            }
            "load" => self.load(),
            "share" => self.share(),
            "open" => self.open_share(arg),
            other => match ElementType::all().iter().find(|t| t.name().eq_ignore_ascii_case(other)) {
                Some(t) if t.is_text_like() => {
                    let content = if arg.is_empty() { t.name() } else { arg };
                    self.edit(|e| e.add_element(ElementKind::from_parts(*t, content)));
                }
                _ => self.error_message = Some(format!("Unknown command: {other}")),
            },
        }
    }

    fn patch_selected(&mut self, patch: ElementPatch) {
        self.edit_selected(|e, id| e.update_element(id, patch));
    }

    /// Move the selected element to `position` in bottom-to-top layer order.
    fn move_layer(&mut self, position: usize) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let mut order: Vec<ElementId> = self
            .workspace
            .deck()
            .active_slide()
            .paint_order()
            .into_iter()
            .map(|el| el.id.clone())
            .filter(|other| *other != id)
            .collect();
        order.insert(position.min(order.len()), id);
        self.edit(|e| e.reorder_elements(&order));
    }

    fn add_shape(&mut self, name: &str) {
        if name.is_empty() {
            let names: Vec<&str> = presets::SHAPES.iter().take(12).map(|s| s.name).collect();
            self.status_message = Some(format!("Shapes: {}, ...", names.join(", ")));
            return;
        }
        self.edit(|e| e.add_shape(name));
    }

    fn add_media(&mut self, input: &str, kind: MediaKind) {
        if self.workspace.is_previewing() {
            self.status_message = Some("Editing is disabled during preview".to_string());
            return;
        }
        match self.media.resolve(input, kind) {
            Ok(media) => {
                self.edit(|e| e.add_media(media));
            }
            Err(e) => {
                tracing::warn!(error = %e, input, "Media not added");
                self.error_message = Some(format!("Could not add {}: {e}", kind.name()));
            }
        }
    }

    fn set_duration(&mut self, arg: &str) {
        match arg.trim_end_matches('s').parse::<u32>() {
            Ok(secs) if (MIN_UI_DURATION_SECS..=MAX_UI_DURATION_SECS).contains(&secs) => {
                let patch = SlidePatch { duration: Some(secs), ..SlidePatch::default() };
                self.edit(|e| e.update_slide(patch));
            }
            _ => {
                self.error_message = Some(format!(
                    "Duration must be {MIN_UI_DURATION_SECS}-{MAX_UI_DURATION_SECS} seconds"
                ));
            }
        }
    }

    /// Save the working deck.
    pub fn save(&mut self) -> Option<ShareId> {
        match storage::save_deck(self.store.as_mut(), WORKING_DECK_KEY, self.workspace.deck()) {
            Ok(share) => {
                self.status_message = Some(format!("Saved {} slide(s)", self.workspace.deck().len()));
                Some(share)
            }
            Err(e) => {
                self.error_message = Some(format!("Save failed: {e}"));
                None
            }
        }
    }

    /// Reload the working deck from the store, discarding unsaved edits.
    pub fn load(&mut self) {
        self.scheduler.cancel();
        self.restore_working_deck();
    }

    /// Save, then publish a share link and copy it to the clipboard.
    pub fn share(&mut self) {
        let Some(share) = self.save() else {
            return;
        };
        let link = self.config.share_link(&share);
        let copied = Clipboard::new().and_then(|mut cb| cb.set_text(link.clone())).is_ok();
        self.status_message = Some(if copied {
            format!("Link copied: {link}")
        } else {
            format!("Share link: {link}")
        });
        self.last_share = Some(link);
    }

    /// Open a shared deck and play it on a loop, the way a viewer sees it.
    pub fn open_share(&mut self, id: &str) {
        let id = id.rsplit('/').next().unwrap_or(id).trim();
        if id.is_empty() {
            self.error_message = Some("Usage: open <share id or link>".to_string());
            return;
        }
        match storage::load_shared(self.store.as_ref(), &ShareId::new(id)) {
            Ok(hydrated) if hydrated.source == storage::HydrateSource::Missing => {
                self.error_message = Some(format!("Share {id} was not found or has expired"));
            }
            Ok(hydrated) => {
                self.report_hydration(&hydrated);
                self.scheduler.cancel();
                self.workspace.replace_deck(hydrated.deck);
                let t = self.workspace.enter_preview(EndOfDeck::Loop);
                self.after_playback(t);
            }
            Err(e) => self.error_message = Some(format!("Could not open share: {e}")),
        }
    }

    /// Replace the deck outright.
    pub fn replace_deck(&mut self, deck: Deck) {
        self.scheduler.cancel();
        self.workspace.replace_deck(deck);
    }

    fn restore_working_deck(&mut self) {
        match storage::load_deck(self.store.as_ref(), WORKING_DECK_KEY) {
            Ok(hydrated) => {
                self.report_hydration(&hydrated);
                self.workspace.replace_deck(hydrated.deck);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not read the working deck");
                self.error_message = Some(format!("Could not read saved deck: {e}"));
            }
        }
    }

    fn report_hydration(&mut self, hydrated: &Hydrated) {
        if let storage::HydrateSource::Fallback(reason) = &hydrated.source {
            self.status_message = Some(format!("Saved deck was unreadable ({reason}); started fresh"));
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|c| c.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

fn parse_pair(arg: &str) -> Option<(f64, f64)> {
    let mut parts = arg.split(|c: char| c.is_whitespace() || c == ',').filter(|p| !p.is_empty());
    let a = parse_number(parts.next()?)?;
    let b = parse_number(parts.next()?)?;
    parts.next().is_none().then_some((a, b))
}

/// Finite numbers only; `nan` and `inf` parse as `f64` but cannot be stored.
fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn normalize_name(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect::<String>().to_ascii_lowercase()
}

fn parse_animation_in(arg: &str) -> Option<AnimationIn> {
    let wanted = normalize_name(arg);
    AnimationIn::all().iter().copied().find(|a| normalize_name(&format!("{a:?}")) == wanted)
}

fn parse_animation_out(arg: &str) -> Option<AnimationOut> {
    let wanted = normalize_name(arg);
    AnimationOut::all().iter().copied().find(|a| normalize_name(&format!("{a:?}")) == wanted)
}

/// Gradient expressions and URLs are recognized; anything else is a color.
fn parse_background(arg: &str) -> Background {
    if arg.contains("gradient(") {
        Background::gradient(arg)
    } else if arg.starts_with("http://") || arg.starts_with("https://") || arg.starts_with("file://") {
        Background::image(arg)
    } else {
        Background::color(arg)
    }
}
