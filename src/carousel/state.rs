//! Carousel position

use serde::{Deserialize, Serialize};

use crate::consts::WINDOW_RADIUS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselState {
    /// Always `< len` of the view when the view is non-empty, 0 otherwise
    pub current_index: usize,
    /// Cards kept live on each side of the current one
    pub window_radius: usize,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self::new(WINDOW_RADIUS)
    }
}

impl CarouselState {
    pub fn new(window_radius: usize) -> Self {
        Self {
            current_index: 0,
            window_radius,
        }
    }

    /// Pull the index back inside a view of `len` items
    pub fn clamp(&mut self, len: usize) {
        self.current_index = self.current_index.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    /// Move by `delta`, clamped, no wraparound. Returns true if it moved.
    pub fn step(&mut self, delta: i64, len: usize) -> bool {
        if len == 0 {
            self.current_index = 0;
            return false;
        }
        let max = (len - 1) as i64;
        let target = (self.current_index as i64 + delta).clamp(0, max) as usize;
        self.set(target, len)
    }

    /// Jump straight to `index` (clamped). Returns true if it moved.
    pub fn set(&mut self, index: usize, len: usize) -> bool {
        let before = self.current_index;
        self.current_index = index;
        self.clamp(len);
        self.current_index != before
    }

    pub fn can_prev(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_next(&self, len: usize) -> bool {
        self.current_index + 1 < len
    }

    /// Inclusive index range of the live window, `None` for an empty view
    pub fn window(&self, len: usize) -> Option<(usize, usize)> {
        if len == 0 {
            return None;
        }
        let lo = self.current_index.saturating_sub(self.window_radius);
        let hi = (self.current_index + self.window_radius).min(len - 1);
        Some((lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clamps_without_wrap() {
        let mut s = CarouselState::new(5);
        assert!(!s.step(-1, 3));
        assert!(s.step(1, 3));
        assert!(s.step(5, 3));
        assert_eq!(s.current_index, 2);
        assert!(!s.can_next(3));
        assert!(s.can_prev());
    }

    #[test]
    fn test_clamp_on_shrink_and_empty() {
        let mut s = CarouselState::new(5);
        s.set(8, 10);
        s.clamp(4);
        assert_eq!(s.current_index, 3);
        s.clamp(0);
        assert_eq!(s.current_index, 0);
        assert!(!s.step(1, 0));
    }

    #[test]
    fn test_window_bounds() {
        let mut s = CarouselState::new(2);
        assert_eq!(s.window(0), None);
        assert_eq!(s.window(10), Some((0, 2)));
        s.set(5, 10);
        assert_eq!(s.window(10), Some((3, 7)));
        s.set(9, 10);
        assert_eq!(s.window(10), Some((7, 9)));
    }
}
