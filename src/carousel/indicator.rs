//! Position indicator and prev/next availability

use super::state::CarouselState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indicator {
    /// Nothing to show (empty view)
    None,
    /// One dot per item, `active` is highlighted
    Dots { count: usize, active: usize },
    /// "i / n" when there are too many items for dots
    Label(String),
}

impl Indicator {
    pub fn for_view(state: &CarouselState, len: usize, dot_cap: usize) -> Self {
        if len == 0 {
            Indicator::None
        } else if len <= dot_cap {
            Indicator::Dots {
                count: len,
                active: state.current_index,
            }
        } else {
            Indicator::Label(format!("{} / {}", state.current_index + 1, len))
        }
    }
}

/// Enabled state of the prev/next buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl NavControls {
    pub fn for_view(state: &CarouselState, len: usize) -> Self {
        Self {
            prev_enabled: len > 0 && state.can_prev(),
            next_enabled: state.can_next(len),
        }
    }
}
