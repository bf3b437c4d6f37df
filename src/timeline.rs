//! Autoplay timeline.
//!
//! A [`Timeline`] is one preview activation: it accumulates progress through
//! the active slide from elapsed wall time, advances the deck when a slide
//! completes and stops at the end. Every operation returns the
//! [`Transition`] it performed so the caller knows whether the tick
//! scheduler has to be restarted.

use std::time::Duration;

use crate::constants::playback::FULL_PROGRESS;
use crate::model::Deck;

/// What happens when the last slide completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndOfDeck {
    /// Playback stops (editor preview).
    #[default]
    Stop,
    /// Playback wraps to the first slide (shared viewer).
    Loop,
}

/// Why the active slide changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    /// A tick completed the slide.
    Tick,
    /// A seek or advance gesture.
    Manual,
}

/// Outcome of a timeline operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed (stale tick, paused, already playing, clamped seek).
    Ignored,
    /// Playback began from zero.
    Started,
    /// Progress moved within the same slide.
    Progressed,
    /// Progress was reset without changing slides.
    Rewound,
    /// The active slide changed.
    SlideChanged {
        /// Previous active index.
        from: usize,
        /// New active index.
        to: usize,
        /// What triggered it.
        cause: Cause,
    },
    /// Progress accumulation was suspended.
    Paused,
    /// Progress accumulation resumed.
    Resumed,
    /// Playback ended.
    Stopped,
}

impl Transition {
    /// Whether the tick scheduler must be cancelled and restarted so the
    /// next tick is measured against the new slide.
    #[must_use]
    pub fn requires_reschedule(&self) -> bool {
        matches!(
            self,
            Self::Started
                | Self::Rewound
                | Self::Resumed
                | Self::SlideChanged { cause: Cause::Manual, .. }
        )
    }

    /// Whether playback has ended.
    #[must_use]
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

/// Playback state for one preview activation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    playing: bool,
    paused: bool,
    progress: f64,
    end_of_deck: EndOfDeck,
}

impl Timeline {
    /// A stopped timeline that ends playback after the last slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// A stopped timeline that wraps to the first slide.
    pub fn looping() -> Self {
        Self { end_of_deck: EndOfDeck::Loop, ..Self::default() }
    }

    /// Whether playback is active.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether progress accumulation is suspended.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Percentage of the active slide's duration elapsed, in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// End-of-deck behavior.
    pub fn end_of_deck(&self) -> EndOfDeck {
        self.end_of_deck
    }

    /// Begin playback from zero progress. No-op if already playing.
    pub fn start(&mut self) -> Transition {
        if self.playing {
            return Transition::Ignored;
        }
        self.playing = true;
        self.paused = false;
        self.progress = 0.0;
        tracing::debug!("Playback started");
        Transition::Started
    }

    /// End playback and reset progress.
    pub fn stop(&mut self) -> Transition {
        let was_playing = self.playing;
        self.playing = false;
        self.paused = false;
        self.progress = 0.0;
        if was_playing {
            tracing::debug!("Playback stopped");
        }
        Transition::Stopped
    }

    /// Suspend progress accumulation. Progress is kept.
    pub fn pause(&mut self) -> Transition {
        if !self.playing || self.paused {
            return Transition::Ignored;
        }
        self.paused = true;
        tracing::debug!(progress = self.progress, "Playback paused");
        Transition::Paused
    }

    /// Resume progress accumulation.
    pub fn resume(&mut self) -> Transition {
        if !self.playing || !self.paused {
            return Transition::Ignored;
        }
        self.paused = false;
        tracing::debug!(progress = self.progress, "Playback resumed");
        Transition::Resumed
    }

    /// Pause if running, resume if paused.
    pub fn toggle_pause(&mut self) -> Transition {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Accumulate `elapsed` wall time against the active slide's duration.
    ///
    /// Ticks while stopped or paused are ignored. A completed slide advances
    /// the deck with progress reset to zero, or ends playback on the last
    /// slide; any remainder is dropped.
    pub fn tick(&mut self, deck: &mut Deck, elapsed: Duration) -> Transition {
        if !self.playing || self.paused {
            return Transition::Ignored;
        }
        let duration_ms = f64::from(deck.active_slide().duration.max(1)) * 1000.0;
        let step = elapsed.as_secs_f64() * 1000.0 / duration_ms * FULL_PROGRESS;
        self.progress = (self.progress + step).min(FULL_PROGRESS);

        if self.progress >= FULL_PROGRESS {
            self.complete_slide(deck, Cause::Tick)
        } else {
            Transition::Progressed
        }
    }

    /// Jump to the next slide with progress reset. On the last slide only
    /// progress is reset.
    pub fn seek_next(&mut self, deck: &mut Deck) -> Transition {
        if deck.is_last() {
            self.progress = 0.0;
            return Transition::Rewound;
        }
        self.move_to(deck, deck.active_index() + 1, Cause::Manual)
    }

    /// Jump to the previous slide with progress reset. No-op on the first slide.
    pub fn seek_previous(&mut self, deck: &mut Deck) -> Transition {
        match deck.active_index().checked_sub(1) {
            Some(prev) => self.move_to(deck, prev, Cause::Manual),
            None => Transition::Ignored,
        }
    }

    /// The advance gesture: next slide, or end playback on the last one.
    pub fn advance_or_exit(&mut self, deck: &mut Deck) -> Transition {
        if !self.playing {
            return Transition::Ignored;
        }
        self.complete_slide(deck, Cause::Manual)
    }

    /// Shared end-of-slide transition for ticks and the advance gesture.
    fn complete_slide(&mut self, deck: &mut Deck, cause: Cause) -> Transition {
        if !deck.is_last() {
            return self.move_to(deck, deck.active_index() + 1, cause);
        }
        match self.end_of_deck {
            EndOfDeck::Stop => {
                tracing::debug!(slides = deck.len(), "End of deck");
                self.stop()
            }
            EndOfDeck::Loop => self.move_to(deck, 0, cause),
        }
    }

    fn move_to(&mut self, deck: &mut Deck, index: usize, cause: Cause) -> Transition {
        let from = deck.active_index();
        deck.set_active_index(index);
        self.progress = 0.0;
        let to = deck.active_index();
        tracing::debug!(from, to, ?cause, "Slide changed");
        Transition::SlideChanged { from, to, cause }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Background, Slide};

    fn deck(durations: &[u32]) -> Deck {
        let slides = durations.iter().map(|d| Slide::new(Background::color("#000"), *d)).collect();
        Deck::from_slides(slides).unwrap_or_default()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn start_is_idempotent() {
        let mut t = Timeline::new();
        assert_eq!(t.start(), Transition::Started);
        assert_eq!(t.start(), Transition::Ignored);
        assert!(t.is_playing());
    }

    #[test]
    fn tick_accumulates_from_wall_time() {
        let mut d = deck(&[4]);
        let mut t = Timeline::new();
        t.start();
        assert_eq!(t.tick(&mut d, ms(1000)), Transition::Progressed);
        assert!((t.progress() - 25.0).abs() < 1e-9);
        // An imprecise scheduler still lands on the same total
        t.tick(&mut d, ms(130));
        t.tick(&mut d, ms(870));
        assert!((t.progress() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_tick_changes_nothing() {
        let mut d = deck(&[2, 2]);
        let mut t = Timeline::new();
        t.start();
        for _ in 0..10 {
            assert_eq!(t.tick(&mut d, Duration::ZERO), Transition::Progressed);
        }
        assert_eq!(d.active_index(), 0);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn ticks_after_stop_are_ignored() {
        let mut d = deck(&[1, 1]);
        let mut t = Timeline::new();
        t.start();
        t.stop();
        assert_eq!(t.tick(&mut d, ms(5000)), Transition::Ignored);
        assert_eq!(d.active_index(), 0);
    }

    #[test]
    fn pause_holds_progress() {
        let mut d = deck(&[2]);
        let mut t = Timeline::new();
        t.start();
        t.tick(&mut d, ms(500));
        assert_eq!(t.toggle_pause(), Transition::Paused);
        assert_eq!(t.tick(&mut d, ms(5000)), Transition::Ignored);
        assert!((t.progress() - 25.0).abs() < 1e-9);
        assert!(t.is_playing());
        assert_eq!(t.toggle_pause(), Transition::Resumed);
        assert!(!t.is_paused());
    }

    #[test]
    fn completion_advances_and_resets() {
        let mut d = deck(&[1, 1]);
        let mut t = Timeline::new();
        t.start();
        let tr = t.tick(&mut d, ms(1500));
        assert_eq!(tr, Transition::SlideChanged { from: 0, to: 1, cause: Cause::Tick });
        assert!(!tr.requires_reschedule());
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn last_slide_completion_stops() {
        let mut d = deck(&[1]);
        let mut t = Timeline::new();
        t.start();
        assert!(t.tick(&mut d, ms(1000)).is_stop());
        assert!(!t.is_playing());
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn looping_wraps_to_first() {
        let mut d = deck(&[1, 1]);
        let mut t = Timeline::looping();
        t.start();
        t.tick(&mut d, ms(1000));
        let tr = t.tick(&mut d, ms(1000));
        assert_eq!(tr, Transition::SlideChanged { from: 1, to: 0, cause: Cause::Tick });
        assert!(t.is_playing());
    }

    #[test]
    fn seeks_clamp() {
        let mut d = deck(&[3, 3]);
        let mut t = Timeline::new();
        t.start();
        assert_eq!(t.seek_previous(&mut d), Transition::Ignored);
        assert!(t.seek_next(&mut d).requires_reschedule());
        t.tick(&mut d, ms(1000));
        assert_eq!(t.seek_next(&mut d), Transition::Rewound);
        assert_eq!(d.active_index(), 1);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn advance_or_exit_matches_tick_completion() {
        let mut by_tick = deck(&[1, 1]);
        let mut by_gesture = by_tick.clone();
        let mut a = Timeline::new();
        let mut b = Timeline::new();
        a.start();
        b.start();
        for _ in 0..2 {
            a.tick(&mut by_tick, ms(1000));
            b.advance_or_exit(&mut by_gesture);
        }
        assert_eq!(a.is_playing(), b.is_playing());
        assert_eq!(by_tick.active_index(), by_gesture.active_index());
        assert!(!b.is_playing());
    }

    #[test]
    fn advance_requires_playback() {
        let mut d = deck(&[1, 1]);
        let mut t = Timeline::new();
        assert_eq!(t.advance_or_exit(&mut d), Transition::Ignored);
        assert_eq!(d.active_index(), 0);
    }
}
