//! One open deck with its selection and optional playback session.
//!
//! The workspace is the single writer of the deck. Edits go through
//! [`Workspace::edit`], which refuses while a preview is running; playback
//! goes through the timeline methods, which clear the selection whenever
//! the active slide changes and remember the slide that was left so its
//! elements can play their exit animation.

use std::time::{Duration, Instant};

use crate::animation::{self, VisibleElement};
use crate::edit::EditSession;
use crate::model::{Deck, Element, Slide};
use crate::selection::Selection;
use crate::timeline::{EndOfDeck, Timeline, Transition};

/// A slide change still animating.
#[derive(Debug, Clone)]
struct SlideChange {
    previous: Option<Slide>,
    started: Instant,
}

/// Deck, selection and playback for one editing session.
#[derive(Debug, Clone)]
pub struct Workspace {
    deck: Deck,
    selection: Selection,
    playback: Option<Timeline>,
    change: Option<SlideChange>,
    fading: Vec<(Element, Instant)>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(Deck::new())
    }
}

impl Workspace {
    /// Open a deck.
    pub fn new(deck: Deck) -> Self {
        Self { deck, selection: Selection::new(), playback: None, change: None, fading: Vec::new() }
    }

    /// The deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The selected element, if it is on the active slide.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection.get().and_then(|id| self.deck.active_slide().element(id))
    }

    /// The running playback session, if previewing.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.playback.as_ref()
    }

    /// Whether a preview is running.
    pub fn is_previewing(&self) -> bool {
        self.playback.is_some()
    }

    /// Replace the deck (load, open share). Ends any preview.
    pub fn replace_deck(&mut self, deck: Deck) {
        self.playback = None;
        self.change = None;
        self.fading.clear();
        self.selection.clear();
        self.deck = deck;
    }

    /// Start an edit session. `None` while previewing.
    pub fn edit(&mut self) -> Option<EditSession<'_>> {
        if self.playback.is_some() {
            tracing::debug!("Edit refused during playback");
            return None;
        }
        Some(EditSession::new(&mut self.deck, &mut self.selection))
    }

    /// Remember an element that is about to be removed so it can fade out.
    pub fn note_removed(&mut self, element: Element) {
        self.fading.push((element, Instant::now()));
    }

    /// Select another slide while editing and let the old one fade out.
    pub fn select_slide(&mut self, index: usize) -> bool {
        let from = self.deck.active_index();
        let Some(mut edit) = self.edit() else {
            return false;
        };
        let applied = edit.select_slide(index).is_applied();
        if applied && from != index {
            self.begin_change(Some(from));
        }
        applied
    }

    /// Enter preview mode with a fresh playback session.
    pub fn enter_preview(&mut self, end_of_deck: EndOfDeck) -> Transition {
        if self.playback.is_some() {
            return Transition::Ignored;
        }
        let mut timeline = match end_of_deck {
            EndOfDeck::Stop => Timeline::new(),
            EndOfDeck::Loop => Timeline::looping(),
        };
        let transition = timeline.start();
        self.playback = Some(timeline);
        self.fading.clear();
        self.begin_change(None);
        tracing::info!(slides = self.deck.len(), "Preview started");
        transition
    }

    /// Leave preview mode. The playback session is discarded.
    pub fn exit_preview(&mut self) -> Transition {
        let Some(mut timeline) = self.playback.take() else {
            return Transition::Ignored;
        };
        self.change = None;
        tracing::info!("Preview ended");
        timeline.stop()
    }

    /// The Space gesture: start previewing, or advance/exit while previewing.
    pub fn play_or_advance(&mut self) -> Transition {
        if self.playback.is_none() {
            return self.enter_preview(EndOfDeck::Stop);
        }
        self.drive(|t, deck| t.advance_or_exit(deck))
    }

    /// Hold or release the current slide.
    pub fn toggle_pause(&mut self) -> Transition {
        self.playback.as_mut().map_or(Transition::Ignored, Timeline::toggle_pause)
    }

    /// Manual seek forward.
    pub fn seek_next(&mut self) -> Transition {
        self.drive(|t, deck| t.seek_next(deck))
    }

    /// Manual seek back.
    pub fn seek_previous(&mut self) -> Transition {
        self.drive(|t, deck| t.seek_previous(deck))
    }

    /// Feed one scheduler tick. Ignored when not previewing.
    pub fn tick(&mut self, elapsed: Duration) -> Transition {
        self.drive(|t, deck| t.tick(deck, elapsed))
    }

    fn drive(&mut self, op: impl FnOnce(&mut Timeline, &mut Deck) -> Transition) -> Transition {
        let Some(timeline) = self.playback.as_mut() else {
            return Transition::Ignored;
        };
        let transition = op(timeline, &mut self.deck);
        match transition {
            Transition::SlideChanged { from, .. } => {
                self.selection.clear();
                self.begin_change(Some(from));
            }
            Transition::Stopped => {
                self.playback = None;
                self.change = None;
                tracing::info!("Preview finished");
            }
            _ => {}
        }
        transition
    }

    fn begin_change(&mut self, from: Option<usize>) {
        let previous = from.and_then(|i| self.deck.slide(i)).cloned();
        self.change = Some(SlideChange { previous, started: Instant::now() });
    }

    /// Time since the active slide was entered, if it is still animating.
    pub fn transition_elapsed(&self, now: Instant) -> Option<Duration> {
        self.change
            .as_ref()
            .map(|c| now.saturating_duration_since(c.started))
            .filter(|e| *e < animation::transition_duration())
    }

    /// What to draw at `now`, bottom to top, with the time into the transition.
    pub fn visible(&self, now: Instant) -> (Vec<VisibleElement<'_>>, Duration) {
        let elapsed = self.transition_elapsed(now);
        let previous = elapsed.and(self.change.as_ref()).and_then(|c| c.previous.as_ref());
        let mut visible = animation::project(self.deck.active_slide(), previous, self.is_previewing());
        // Steady state once the transition is over
        let elapsed = elapsed.unwrap_or_else(animation::transition_duration);
        if !self.is_previewing() {
            let fading = self
                .fading
                .iter()
                .filter(|(_, at)| now.saturating_duration_since(*at) < animation::transition_duration())
                .map(|(el, _)| VisibleElement {
                    element: el,
                    phase: animation::Phase::Exiting,
                    plan: animation::resolve(el, false, animation::Phase::Exiting),
                });
            visible.extend(fading);
        }
        (visible, elapsed)
    }

    /// Time since a removed element started fading.
    pub fn fade_elapsed(&self, element: &Element, now: Instant) -> Option<Duration> {
        self.fading
            .iter()
            .find(|(el, _)| el.id == element.id)
            .map(|(_, at)| now.saturating_duration_since(*at))
    }

    /// Drop finished fades.
    pub fn prune(&mut self, now: Instant) {
        let limit = animation::transition_duration();
        self.fading.retain(|(_, at)| now.saturating_duration_since(*at) < limit);
    }
}
