use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::types::NodeId;

/// A single, stateless node mutation instruction.
///
/// The core emits a `Vec<DomCommand>` from each event it handles. Hosts
/// consume the list sequentially — each command carries all the data it
/// needs, so applying them requires no engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomCommand {
    /// Add a class to the element's class list. Idempotent on the host
    /// side, matching `classList.add`.
    AddClass { node: NodeId, class: SharedStr },

    /// Remove a class from the element's class list.
    RemoveClass { node: NodeId, class: SharedStr },

    /// Replace the element's displayed text.
    SetText { node: NodeId, text: SharedStr },

    /// Set the element's fill width as a percentage of its container
    /// (progress bars).
    SetWidthPercent { node: NodeId, percent: f64 },

    /// Point an image element at its real source (lazy loading).
    SetImageSource { node: NodeId, src: SharedStr },

    /// Make the element visible (inline display toggle).
    Show { node: NodeId },

    /// Hide the element (inline display toggle).
    Hide { node: NodeId },

    /// Stop delivering intersection entries for this element. Hosts must
    /// honor this — the core guarantees at-most-once reveals, but only
    /// spends lookups on nodes it still tracks.
    Unobserve { node: NodeId },
}

impl DomCommand {
    /// The element this command targets.
    pub fn node(&self) -> NodeId {
        match self {
            DomCommand::AddClass { node, .. }
            | DomCommand::RemoveClass { node, .. }
            | DomCommand::SetText { node, .. }
            | DomCommand::SetWidthPercent { node, .. }
            | DomCommand::SetImageSource { node, .. }
            | DomCommand::Show { node }
            | DomCommand::Hide { node }
            | DomCommand::Unobserve { node } => *node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_accessor_covers_all_variants() {
        let n = NodeId::new(3);
        let cmds = [
            DomCommand::AddClass {
                node: n,
                class: "active".into(),
            },
            DomCommand::SetWidthPercent {
                node: n,
                percent: 75.0,
            },
            DomCommand::Unobserve { node: n },
        ];
        for cmd in &cmds {
            assert_eq!(cmd.node(), n);
        }
    }

    #[test]
    fn serde_roundtrip() {
        let cmd = DomCommand::SetText {
            node: NodeId::new(9),
            text: "42".into(),
        };
        let json = serde_json::to_string(&cmd).unwrap_or_default();
        let back: DomCommand = serde_json::from_str(&json).unwrap_or(DomCommand::Unobserve {
            node: NodeId::new(0),
        });
        assert_eq!(back, cmd);
    }
}
