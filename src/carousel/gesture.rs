//! Gesture/navigation controller
//!
//! Translates prev/next controls, arrow keys, drags, taps and the random-pick
//! button into index changes on a [`CarouselState`]. Pointer positions and
//! timestamps come in from the caller so the whole machine runs without a DOM.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::CarouselState;
use crate::consts::*;

/// Tunables for drag and tap handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    /// Below this horizontal travel a release counts as a tap
    pub threshold_px: f64,
    /// Drag distance worth one card
    pub px_per_step: f64,
    /// How long after a drag the following click is swallowed
    pub click_cooldown_ms: f64,
    /// Random-pick highlight duration
    pub highlight_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold_px: SWIPE_THRESHOLD_PX,
            px_per_step: SWIPE_PX_PER_STEP,
            click_cooldown_ms: CLICK_COOLDOWN_MS,
            highlight_ms: HIGHLIGHT_MS,
        }
    }
}

/// A request to move the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Prev,
    Next,
    /// Straight to a view index (tap on a side card)
    Jump(usize),
    /// Relative move from a completed swipe
    Swipe(i64),
    Random,
}

impl NavCommand {
    /// Arrow keys mirror the prev/next buttons
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(NavCommand::Prev),
            "ArrowRight" => Some(NavCommand::Next),
            _ => None,
        }
    }
}

/// Signed index delta for a horizontal drag of `dx` pixels.
///
/// Dragging left (negative `dx`) pulls the next card in, so it advances.
/// Travel under the threshold is a tap and yields 0.
pub fn drag_steps(dx: f64, config: &GestureConfig) -> i64 {
    let distance = dx.abs();
    if !distance.is_finite() || distance <= config.threshold_px {
        return 0;
    }
    let steps = ((distance / config.px_per_step).round() as i64).max(1);
    if dx < 0.0 { steps } else { -steps }
}

/// Result of releasing the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Tap,
    Swipe(i64),
}

/// Pointer/touch drag bookkeeping
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    start_x: Option<f64>,
    offset: f64,
    suppress_until: f64,
}

impl DragTracker {
    pub fn pointer_down(&mut self, x: f64) {
        self.start_x = Some(x);
        self.offset = 0.0;
    }

    /// Current drag offset while the pointer is held
    pub fn pointer_move(&mut self, x: f64) -> Option<f64> {
        let start = self.start_x?;
        self.offset = x - start;
        Some(self.offset)
    }

    /// Finish the gesture. `None` when no drag was in progress.
    pub fn pointer_up(&mut self, x: f64, now: f64, config: &GestureConfig) -> Option<GestureOutcome> {
        let start = self.start_x.take()?;
        self.offset = 0.0;
        let steps = drag_steps(x - start, config);
        if steps == 0 {
            Some(GestureOutcome::Tap)
        } else {
            // The click that follows a drag must not open the card
            self.suppress_until = now + config.click_cooldown_ms;
            Some(GestureOutcome::Swipe(steps))
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
        self.offset = 0.0;
    }

    pub fn suppresses_click(&self, now: f64) -> bool {
        now < self.suppress_until
    }
}

/// What a click on a carousel card should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Center card: let the link open the detail page
    Follow,
    /// Side card: bring it to the center instead
    Jump(usize),
    /// Tail end of a drag: swallow it
    Suppress,
}

/// Temporary emphasis on the card a random pick landed on
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub id: String,
    pub until: f64,
}

impl Highlight {
    pub fn is_active(&self, now: f64) -> bool {
        now < self.until
    }
}

/// Owns gesture state and the random-pick RNG
#[derive(Debug, Clone)]
pub struct Navigator {
    pub config: GestureConfig,
    pub drag: DragTracker,
    rng: Pcg32,
    highlight: Option<Highlight>,
}

impl Navigator {
    pub fn new(config: GestureConfig, seed: u64) -> Self {
        Self {
            config,
            drag: DragTracker::default(),
            rng: Pcg32::seed_from_u64(seed),
            highlight: None,
        }
    }

    /// Apply a command to `state` over a view of `len` items.
    /// Returns true when the index changed.
    pub fn apply(&mut self, state: &mut CarouselState, command: NavCommand, len: usize) -> bool {
        match command {
            NavCommand::Prev => state.step(-1, len),
            NavCommand::Next => state.step(1, len),
            NavCommand::Jump(index) => state.set(index, len),
            NavCommand::Swipe(steps) => state.step(steps, len),
            NavCommand::Random => {
                if len == 0 {
                    return false;
                }
                let index = self.rng.random_range(0..len);
                state.set(index, len)
            }
        }
    }

    /// Pointer released over the carousel
    pub fn release(&mut self, x: f64, now: f64) -> Option<GestureOutcome> {
        let config = self.config;
        self.drag.pointer_up(x, now, &config)
    }

    /// Decide what a click on the card at `index` does
    pub fn click(&self, index: usize, state: &CarouselState, now: f64) -> ClickAction {
        if self.drag.suppresses_click(now) {
            ClickAction::Suppress
        } else if index == state.current_index {
            ClickAction::Follow
        } else {
            ClickAction::Jump(index)
        }
    }

    pub fn start_highlight(&mut self, id: &str, now: f64) {
        self.highlight = Some(Highlight {
            id: id.to_string(),
            until: now + self.config.highlight_ms,
        });
    }

    pub fn highlight(&self, now: f64) -> Option<&Highlight> {
        self.highlight.as_ref().filter(|h| h.is_active(now))
    }

    /// Clear an elapsed highlight, returning the id to un-style
    pub fn expire_highlight(&mut self, now: f64) -> Option<String> {
        match &self.highlight {
            Some(h) if !h.is_active(now) => self.highlight.take().map(|h| h.id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GestureConfig {
        GestureConfig {
            threshold_px: 30.0,
            px_per_step: 150.0,
            click_cooldown_ms: 300.0,
            highlight_ms: 1500.0,
        }
    }

    #[test]
    fn test_drag_steps() {
        let c = config();
        assert_eq!(drag_steps(-320.0, &c), 2);
        assert_eq!(drag_steps(320.0, &c), -2);
        assert_eq!(drag_steps(-40.0, &c), 1);
        assert_eq!(drag_steps(25.0, &c), 0);
        assert_eq!(drag_steps(30.0, &c), 0);
        assert_eq!(drag_steps(f64::NAN, &c), 0);
    }

    #[test]
    fn test_swipe_moves_two_and_clamps() {
        let mut nav = Navigator::new(config(), 1);
        let mut state = CarouselState::new(5);
        state.set(3, 10);

        nav.drag.pointer_down(400.0);
        assert_eq!(nav.drag.pointer_move(200.0), Some(-200.0));
        let outcome = nav.release(80.0, 1000.0);
        assert_eq!(outcome, Some(GestureOutcome::Swipe(2)));
        assert!(nav.apply(&mut state, NavCommand::Swipe(2), 10));
        assert_eq!(state.current_index, 5);

        assert!(nav.apply(&mut state, NavCommand::Swipe(-20), 10));
        assert_eq!(state.current_index, 0);
    }

    #[test]
    fn test_tap_and_click_suppression() {
        let mut nav = Navigator::new(config(), 1);
        let mut state = CarouselState::new(5);
        state.set(2, 10);

        nav.drag.pointer_down(100.0);
        assert_eq!(nav.release(110.0, 0.0), Some(GestureOutcome::Tap));
        assert_eq!(nav.click(2, &state, 10.0), ClickAction::Follow);
        assert_eq!(nav.click(4, &state, 10.0), ClickAction::Jump(4));

        nav.drag.pointer_down(100.0);
        nav.release(300.0, 1000.0);
        assert_eq!(nav.click(2, &state, 1100.0), ClickAction::Suppress);
        assert_eq!(nav.click(2, &state, 1400.0), ClickAction::Follow);

        // Release without press
        assert_eq!(nav.release(0.0, 2000.0), None);
    }

    #[test]
    fn test_prev_next_at_bounds() {
        let mut nav = Navigator::new(config(), 1);
        let mut state = CarouselState::new(5);
        assert!(!nav.apply(&mut state, NavCommand::Prev, 3));
        assert!(nav.apply(&mut state, NavCommand::Next, 3));
        assert!(nav.apply(&mut state, NavCommand::Jump(2), 3));
        assert!(!nav.apply(&mut state, NavCommand::Next, 3));
        assert_eq!(NavCommand::from_key("ArrowLeft"), Some(NavCommand::Prev));
        assert_eq!(NavCommand::from_key("Enter"), None);
    }

    #[test]
    fn test_random_stays_in_bounds() {
        let mut nav = Navigator::new(config(), 42);
        let mut state = CarouselState::new(5);
        for _ in 0..100 {
            nav.apply(&mut state, NavCommand::Random, 7);
            assert!(state.current_index < 7);
        }
        assert!(!nav.apply(&mut state, NavCommand::Random, 0));
    }

    #[test]
    fn test_highlight_expires() {
        let mut nav = Navigator::new(config(), 1);
        nav.start_highlight("a", 100.0);
        assert_eq!(nav.highlight(1000.0).map(|h| h.id.as_str()), Some("a"));
        assert_eq!(nav.expire_highlight(1000.0), None);
        assert!(nav.highlight(1600.0).is_none());
        assert_eq!(nav.expire_highlight(1600.0), Some("a".to_string()));
        assert_eq!(nav.expire_highlight(1700.0), None);
    }
}
