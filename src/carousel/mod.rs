//! Carousel: single-card navigable view over the filtered set
//!
//! - `state`: current index, clamped to the view
//! - `window`: keeps live cards only around the current index
//! - `gesture`: pointer/touch/keyboard input to index changes
//! - `indicator`: dots or "i / n" label and prev/next availability

pub mod gesture;
pub mod indicator;
pub mod state;
pub mod window;

pub use gesture::{ClickAction, DragTracker, GestureConfig, GestureOutcome, Highlight, NavCommand, Navigator};
pub use indicator::{Indicator, NavControls};
pub use state::CarouselState;
pub use window::{CardHost, CarouselWindow, Slot, SyncStats};
