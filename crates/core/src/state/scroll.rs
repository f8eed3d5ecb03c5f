use unveil_protocol::{DomCommand, NodeId, classes};

/// How far above a section's top its scrollspy band begins, in px.
const SECTION_BAND_OFFSET: f64 = 100.0;

/// Scroll depth at which the header gains its shadow, in px.
const SHADOW_THRESHOLD: f64 = 50.0;

/// Scroll depth below which the header is never hidden, in px.
const HIDE_THRESHOLD: f64 = 100.0;

/// A page section paired with the nav link that points at it.
#[derive(Debug, Clone)]
pub struct Section {
    pub nav_link: NodeId,
    /// Document offset of the section's top edge, in px.
    pub top: f64,
    pub height: f64,
}

impl Section {
    fn contains(&self, scroll_y: f64) -> bool {
        let band_top = self.top - SECTION_BAND_OFFSET;
        scroll_y > band_top && scroll_y <= band_top + self.height
    }
}

/// Scrollspy: marks the nav link of whichever section currently contains
/// the scroll position.
///
/// Section geometry is captured at registration; the host re-registers if
/// layout changes.
#[derive(Debug, Default)]
pub struct SectionTracker {
    sections: Vec<(Section, bool)>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section(&mut self, section: Section) {
        self.sections.push((section, false));
    }

    /// Diff each section's band against the new scroll position, emitting
    /// link class changes only for sections whose activity flipped.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Vec<DomCommand> {
        let mut commands = Vec::new();
        for (section, active) in &mut self.sections {
            let now_active = section.contains(scroll_y);
            if now_active == *active {
                continue;
            }
            *active = now_active;
            commands.push(if now_active {
                DomCommand::AddClass {
                    node: section.nav_link,
                    class: classes::ACTIVE_LINK.into(),
                }
            } else {
                DomCommand::RemoveClass {
                    node: section.nav_link,
                    class: classes::ACTIVE_LINK.into(),
                }
            });
        }
        commands
    }
}

/// Drop shadow on the header once the page has scrolled at all.
#[derive(Debug)]
pub struct HeaderShadow {
    header: NodeId,
    shadowed: bool,
}

impl HeaderShadow {
    pub fn new(header: NodeId) -> Self {
        Self {
            header,
            shadowed: false,
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f64) -> Vec<DomCommand> {
        let shadowed = scroll_y >= SHADOW_THRESHOLD;
        if shadowed == self.shadowed {
            return Vec::new();
        }
        self.shadowed = shadowed;
        vec![if shadowed {
            DomCommand::AddClass {
                node: self.header,
                class: classes::SCROLL_HEADER.into(),
            }
        } else {
            DomCommand::RemoveClass {
                node: self.header,
                class: classes::SCROLL_HEADER.into(),
            }
        }]
    }
}

/// Hides the header while scrolling down, shows it again on any upward
/// scroll. The last seen position is the only state — clamped at 0 so
/// overscroll bounce doesn't fake a direction change.
#[derive(Debug)]
pub struct DirectionTracker {
    header: NodeId,
    last_top: f64,
    hidden: bool,
}

impl DirectionTracker {
    pub fn new(header: NodeId) -> Self {
        Self {
            header,
            last_top: 0.0,
            hidden: false,
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f64) -> Vec<DomCommand> {
        let hide = scroll_y > self.last_top && scroll_y > HIDE_THRESHOLD;
        self.last_top = scroll_y.max(0.0);
        if hide == self.hidden {
            return Vec::new();
        }
        self.hidden = hide;
        vec![if hide {
            DomCommand::AddClass {
                node: self.header,
                class: classes::HEADER_HIDDEN.into(),
            }
        } else {
            DomCommand::RemoveClass {
                node: self.header,
                class: classes::HEADER_HIDDEN.into(),
            }
        }]
    }
}

/// Scroll offset that puts a section's top just below the fixed header.
/// Used by the smooth-scroll handler when a nav link is followed.
pub fn scroll_target(section_top: f64, header_height: f64) -> f64 {
    (section_top - header_height).max(0.0)
}
