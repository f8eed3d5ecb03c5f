//! The class-name vocabulary shared by the core and the page stylesheet.
//!
//! These are the hooks the stylesheet animates against; the core only ever
//! adds or removes them, never interprets them.

/// Terminal reveal marker for viewport-observed elements.
pub const REVEALED: &str = "active";

/// Mobile nav menu is open.
pub const SHOW_MENU: &str = "show-menu";

/// Nav link whose section currently contains the scroll position.
pub const ACTIVE_LINK: &str = "active-link";

/// Header drop shadow once the page has scrolled.
pub const SCROLL_HEADER: &str = "scroll-header";

/// Header slid out of view while scrolling down.
pub const HEADER_HIDDEN: &str = "header-hidden";

/// Dark theme applied to the document body.
pub const DARK_THEME: &str = "dark-theme";

/// Entrance-stagger fade applied to hero children on load.
pub const FADE_IN: &str = "fade-in";

/// Lazily loaded image has its real source.
pub const LOADED: &str = "loaded";

/// Form field failed validation.
pub const ERROR: &str = "error";
