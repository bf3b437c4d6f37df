//! Enter and exit animations.
//!
//! [`resolve`] maps an element and its phase to a start and end visual state.
//! [`AnimationPlan::sample`] evaluates the shared ease-out curve between the
//! two so a renderer can draw any frame of a transition.

use std::time::Duration;

use crate::constants::animation::{EASE_OUT, SCALED_DOWN, SLIDE_OFFSET, TRANSITION_MS};
use crate::model::{AnimationIn, AnimationOut, Element, Slide};

/// Which animation applies to an element during a slide change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The element's slide just became active.
    Entering,
    /// The element's slide was just left, or the element was removed.
    Exiting,
}

/// Opacity, horizontal position and scale of an element at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Left edge in canvas units.
    pub x: f64,
    /// Uniform scale around the element's center.
    pub scale: f64,
}

impl VisualState {
    /// The element as authored.
    #[must_use]
    pub fn steady(element: &Element) -> Self {
        Self { opacity: element.target_opacity(), x: element.position.x, scale: 1.0 }
    }

    fn hidden_from(self) -> Self {
        Self { opacity: 0.0, ..self }
    }

    fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            x: self.x + (to.x - self.x) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

/// Start and end states of one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationPlan {
    /// State at time zero.
    pub from: VisualState,
    /// State once the transition completes.
    pub to: VisualState,
}

impl AnimationPlan {
    fn still(state: VisualState) -> Self {
        Self { from: state, to: state }
    }

    /// Whether the plan does not move at all.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.from == self.to
    }

    /// Whether `elapsed` is past the end of the transition.
    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= transition_duration()
    }

    /// Visual state `elapsed` into the transition.
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> VisualState {
        let total = transition_duration().as_secs_f64();
        let progress = (elapsed.as_secs_f64() / total).clamp(0.0, 1.0);
        self.from.lerp(self.to, ease_out(progress))
    }
}

/// Length of every transition.
#[must_use]
pub const fn transition_duration() -> Duration {
    Duration::from_millis(TRANSITION_MS)
}

/// Resolve the transition for an element.
///
/// Outside playback an entering element is shown as authored. An exit
/// always hides the element; `none` exits fade.
#[must_use]
pub fn resolve(element: &Element, playback_active: bool, phase: Phase) -> AnimationPlan {
    let steady = VisualState::steady(element);
    match phase {
        Phase::Entering if !playback_active => AnimationPlan::still(steady),
        Phase::Entering => {
            let from = match element.animation_in {
                AnimationIn::None => steady,
                AnimationIn::Fade => steady.hidden_from(),
                AnimationIn::SlideLeft => VisualState { x: steady.x - SLIDE_OFFSET, ..steady.hidden_from() },
                AnimationIn::SlideRight => VisualState { x: steady.x + SLIDE_OFFSET, ..steady.hidden_from() },
                AnimationIn::ScaleUp => VisualState { scale: SCALED_DOWN, ..steady.hidden_from() },
            };
            AnimationPlan { from, to: steady }
        }
        Phase::Exiting => {
            let to = match element.animation_out {
                AnimationOut::None | AnimationOut::Fade => steady.hidden_from(),
                AnimationOut::ScaleDown => VisualState { scale: SCALED_DOWN, ..steady.hidden_from() },
            };
            AnimationPlan { from: steady, to }
        }
    }
}

/// One element as it should be drawn right now.
#[derive(Debug, Clone, Copy)]
pub struct VisibleElement<'a> {
    /// The element.
    pub element: &'a Element,
    /// Whether it is arriving or leaving.
    pub phase: Phase,
    /// Its transition.
    pub plan: AnimationPlan,
}

/// Everything to draw for the active slide, bottom to top.
///
/// Elements of `previous` (the slide just left, if any) are listed first in
/// their own paint order with their exit plans, then the active slide's
/// elements with their enter plans.
#[must_use]
pub fn project<'a>(
    active: &'a Slide,
    previous: Option<&'a Slide>,
    playback_active: bool,
) -> Vec<VisibleElement<'a>> {
    let leaving = previous.into_iter().flat_map(|slide| {
        slide.paint_order().into_iter().map(move |element| VisibleElement {
            element,
            phase: Phase::Exiting,
            plan: resolve(element, playback_active, Phase::Exiting),
        })
    });
    let arriving = active.paint_order().into_iter().map(|element| VisibleElement {
        element,
        phase: Phase::Entering,
        plan: resolve(element, playback_active, Phase::Entering),
    });
    leaving.chain(arriving).collect()
}

/// The shared ease-out curve at `x` in `[0, 1]`.
#[must_use]
pub fn ease_out(x: f64) -> f64 {
    let (x1, y1, x2, y2) = EASE_OUT;
    CubicBezier::new(x1, y1, x2, y2).solve(x)
}

/// A CSS-style timing curve through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Debug, Clone, Copy)]
struct CubicBezier {
    cx: f64,
    bx: f64,
    ax: f64,
    cy: f64,
    by: f64,
    ay: f64,
}

impl CubicBezier {
    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self { cx, bx, ax: 1.0 - cx - bx, cy, by, ay: 1.0 - cy - by }
    }

    fn x_at(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn y_at(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn dx_at(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    fn solve(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.y_at(self.t_for_x(x))
    }

    fn t_for_x(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        // Newton first, bisection if the slope is too flat
        let mut t = x;
        for _ in 0..8 {
            let err = self.x_at(t) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let slope = self.dx_at(t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while hi - lo > EPSILON {
            let v = self.x_at(t);
            if (v - x).abs() < EPSILON {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Background, ElementKind, Point, Size};

    fn el(anim_in: AnimationIn, anim_out: AnimationOut) -> Element {
        let mut e = Element::new(
            ElementKind::Text { text: "x".into() },
            Point::new(100.0, 40.0),
            Size::new(10.0, 10.0),
            1,
        );
        e.animation_in = anim_in;
        e.animation_out = anim_out;
        e
    }

    #[test]
    fn edit_mode_is_steady() {
        for anim in AnimationIn::all() {
            let plan = resolve(&el(*anim, AnimationOut::None), false, Phase::Entering);
            assert!(plan.is_static());
            assert_eq!(plan.to.opacity, 1.0);
        }
    }

    #[test]
    fn slide_left_starts_offset() {
        let plan = resolve(&el(AnimationIn::SlideLeft, AnimationOut::None), true, Phase::Entering);
        assert_eq!(plan.from, VisualState { opacity: 0.0, x: 50.0, scale: 1.0 });
        assert_eq!(plan.to, VisualState { opacity: 1.0, x: 100.0, scale: 1.0 });
        let right = resolve(&el(AnimationIn::SlideRight, AnimationOut::None), true, Phase::Entering);
        assert_eq!(right.from.x, 150.0);
    }

    #[test]
    fn scale_up_uses_target_opacity() {
        let mut e = el(AnimationIn::ScaleUp, AnimationOut::None);
        e.style.opacity = Some(0.5);
        let plan = resolve(&e, true, Phase::Entering);
        assert_eq!(plan.from.scale, 0.8);
        assert_eq!(plan.to.opacity, 0.5);
    }

    #[test]
    fn none_in_is_static_during_playback() {
        assert!(resolve(&el(AnimationIn::None, AnimationOut::None), true, Phase::Entering).is_static());
    }

    #[test]
    fn none_out_fades() {
        let none = resolve(&el(AnimationIn::Fade, AnimationOut::None), true, Phase::Exiting);
        let fade = resolve(&el(AnimationIn::Fade, AnimationOut::Fade), true, Phase::Exiting);
        assert_eq!(none, fade);
        assert_eq!(none.to.opacity, 0.0);
        let down = resolve(&el(AnimationIn::Fade, AnimationOut::ScaleDown), true, Phase::Exiting);
        assert_eq!(down.to.scale, 0.8);
    }

    #[test]
    fn easing_is_monotonic_ease_out() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        let mut last = 0.0;
        for i in 1..100 {
            let y = ease_out(f64::from(i) / 100.0);
            assert!(y >= last);
            last = y;
        }
        // Pronounced ease-out: well past halfway at the midpoint
        assert!(ease_out(0.5) > 0.8);
    }

    #[test]
    fn sampling_hits_both_ends() {
        let plan = resolve(&el(AnimationIn::Fade, AnimationOut::None), true, Phase::Entering);
        assert_eq!(plan.sample(Duration::ZERO).opacity, 0.0);
        assert_eq!(plan.sample(Duration::from_millis(600)).opacity, 1.0);
        assert_eq!(plan.sample(Duration::from_secs(5)).opacity, 1.0);
        assert!(plan.is_finished(Duration::from_millis(600)));
    }

    #[test]
    fn projection_lists_exits_below_entries() {
        let mut old = Slide::new(Background::color("#000"), 3);
        old.elements.push(el(AnimationIn::Fade, AnimationOut::None));
        let mut new = Slide::new(Background::color("#000"), 3);
        new.elements.push(el(AnimationIn::ScaleUp, AnimationOut::None));
        new.elements.push(el(AnimationIn::Fade, AnimationOut::None));

        let visible = project(&new, Some(&old), true);
        let phases: Vec<Phase> = visible.iter().map(|v| v.phase).collect();
        assert_eq!(phases, vec![Phase::Exiting, Phase::Entering, Phase::Entering]);
        assert_eq!(project(&new, None, false).len(), 2);
    }
}
