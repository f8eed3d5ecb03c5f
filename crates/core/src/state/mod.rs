//! Per-concern page state.
//!
//! Each concern (scroll chrome, theme, nav menu, form) owns its own small
//! state object and emits commands only when its state actually changes,
//! so a scroll event that changes nothing produces nothing.

pub mod form;
pub mod nav;
pub mod scroll;
pub mod theme;

pub use nav::NavMenu;
pub use scroll::{DirectionTracker, HeaderShadow, Section, SectionTracker};
pub use theme::{ThemeChange, ThemeSwitch};
