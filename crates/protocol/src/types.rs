use serde::{Deserialize, Serialize};

/// Opaque handle to a page element.
///
/// The core never touches real nodes — hosts assign an id to every element
/// they hand to the engine and translate it back when applying commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Box insets in pixels, equivalent to the observer's root margin.
///
/// Values may be negative — a bottom inset of `-50` shrinks the
/// intersection root so elements reveal slightly before reaching the
/// viewport edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// All-zero insets (observe against the unmodified viewport).
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Observation parameters. Immutable once the engine starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// Visible fraction (0.0–1.0) an element must reach to reveal.
    pub threshold: f64,
    /// Root margin applied by the host's intersection facility.
    pub root_margin: Insets,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        // Reveal at 10% visibility, 50px before the bottom edge.
        Self {
            threshold: 0.1,
            root_margin: Insets::new(0.0, 0.0, -50.0, 0.0),
        }
    }
}

/// One batched visibility report from the host's intersection facility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub node: NodeId,
    /// Fraction of the element currently visible, 0.0–1.0.
    pub visible_fraction: f64,
}

impl IntersectionEntry {
    pub fn new(node: NodeId, visible_fraction: f64) -> Self {
        Self {
            node,
            visible_fraction,
        }
    }
}

/// What a watched element does when it reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Plain reveal: gains the revealed class, nothing else.
    Generic,
    /// Skill bar: fill width jumps to its target percentage on reveal.
    ProgressBar,
    /// Numeric display: ramps from 0 to its target value on reveal.
    Counter,
}
