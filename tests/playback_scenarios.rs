//! Autoplay behavior driven through the public timeline and workspace APIs.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::time::Duration;

use wrapdeck::model::{Background, Deck, Slide};
use wrapdeck::timeline::{Cause, Timeline, Transition};
use wrapdeck::workspace::Workspace;

fn deck_with_durations(durations: &[u32]) -> Deck {
    let slides = durations
        .iter()
        .map(|d| Slide::new(Background::color("#000000"), *d))
        .collect();
    Deck::from_slides(slides).expect("non-empty")
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn zero_tick_never_changes_slide() {
    let mut deck = deck_with_durations(&[1, 1]);
    let mut timeline = Timeline::new();
    timeline.start();
    for _ in 0..100 {
        let t = timeline.tick(&mut deck, Duration::ZERO);
        assert!(!matches!(t, Transition::SlideChanged { .. }));
    }
    assert_eq!(deck.active_index(), 0);
    assert_eq!(timeline.progress(), 0.0);
}

#[test]
fn playback_ends_after_the_last_slide() {
    let durations = [2, 5, 1, 3];
    let mut deck = deck_with_durations(&durations);
    let mut timeline = Timeline::new();
    timeline.start();
    for (i, d) in durations.iter().enumerate() {
        assert!(timeline.is_playing(), "stopped early at slide {i}");
        timeline.tick(&mut deck, Duration::from_secs(u64::from(*d)));
    }
    assert!(!timeline.is_playing());
    assert_eq!(deck.active_index(), durations.len() - 1);
}

#[test]
fn basic_autoplay() {
    let mut deck = deck_with_durations(&[2, 3]);
    let mut timeline = Timeline::new();
    assert_eq!(timeline.start(), Transition::Started);

    assert_eq!(timeline.tick(&mut deck, ms(1000)), Transition::Progressed);
    assert!((timeline.progress() - 50.0).abs() < 1e-9);
    assert_eq!(deck.active_index(), 0);

    assert_eq!(
        timeline.tick(&mut deck, ms(1000)),
        Transition::SlideChanged { from: 0, to: 1, cause: Cause::Tick }
    );
    assert_eq!(timeline.progress(), 0.0);
    assert_eq!(deck.active_index(), 1);

    assert!(timeline.tick(&mut deck, ms(3000)).is_stop());
    assert!(!timeline.is_playing());
}

#[test]
fn manual_seek_resets_progress() {
    let mut deck = deck_with_durations(&[10, 10, 10]);
    let mut timeline = Timeline::new();
    timeline.start();
    timeline.tick(&mut deck, ms(8000));
    assert!((timeline.progress() - 80.0).abs() < 1e-9);

    let t = timeline.seek_next(&mut deck);
    assert_eq!(t, Transition::SlideChanged { from: 0, to: 1, cause: Cause::Manual });
    assert!(t.requires_reschedule());
    assert_eq!(timeline.progress(), 0.0);
    assert_eq!(deck.active_index(), 1);
}

#[test]
fn workspace_preview_runs_to_completion() {
    let mut ws = Workspace::new(deck_with_durations(&[2, 3]));
    assert_eq!(ws.play_or_advance(), Transition::Started);
    for _ in 0..40 {
        ws.tick(ms(50));
    }
    assert_eq!(ws.deck().active_index(), 1);
    // Advance on the last slide ends the preview
    assert!(ws.play_or_advance().is_stop());
    assert!(!ws.is_previewing());
    assert!(ws.edit().is_some());
}

#[test]
fn pause_holds_the_slide() {
    let mut ws = Workspace::new(deck_with_durations(&[1, 1]));
    ws.play_or_advance();
    ws.toggle_pause();
    assert_eq!(ws.tick(ms(5000)), Transition::Ignored);
    assert_eq!(ws.deck().active_index(), 0);
    assert_eq!(ws.toggle_pause(), Transition::Resumed);
    ws.tick(ms(1000));
    assert_eq!(ws.deck().active_index(), 1);
}
