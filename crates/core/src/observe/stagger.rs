use unveil_protocol::{DomCommand, NodeId, classes};

/// Default delay between consecutive entrance fades, in milliseconds.
pub const DEFAULT_STEP_MS: u64 = 100;

/// Staggered entrance animation for the hero block on page load.
///
/// Each node fades in `step_ms` after the previous one, in registration
/// order. The host reports elapsed time since load; nodes whose delay has
/// passed get the fade class exactly once.
#[derive(Debug)]
pub struct EntranceStagger {
    nodes: Vec<NodeId>,
    step_ms: u64,
    emitted: usize,
}

impl EntranceStagger {
    pub fn new(nodes: Vec<NodeId>, step_ms: u64) -> Self {
        Self {
            nodes,
            step_ms,
            emitted: 0,
        }
    }

    pub fn with_default_step(nodes: Vec<NodeId>) -> Self {
        Self::new(nodes, DEFAULT_STEP_MS)
    }

    /// Fade classes for every node whose delay (`index * step_ms`) has
    /// elapsed and that has not faded in yet.
    pub fn due(&mut self, elapsed_ms: u64) -> Vec<DomCommand> {
        let mut commands = Vec::new();
        while self.emitted < self.nodes.len() {
            let delay = self.emitted as u64 * self.step_ms;
            if delay > elapsed_ms {
                break;
            }
            commands.push(DomCommand::AddClass {
                node: self.nodes[self.emitted],
                class: classes::FADE_IN.into(),
            });
            self.emitted += 1;
        }
        commands
    }

    /// All nodes have faded in; the host can drop its load timer.
    pub fn is_done(&self) -> bool {
        self.emitted == self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(ids: &[u64]) -> Vec<NodeId> {
        ids.iter().map(|&id| NodeId::new(id)).collect()
    }

    #[test]
    fn first_node_fades_immediately() {
        let mut stagger = EntranceStagger::with_default_step(nodes(&[1, 2, 3]));
        let cmds = stagger.due(0);
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].node(), NodeId::new(1));
    }

    #[test]
    fn nodes_fade_in_order_at_step_intervals() {
        let mut stagger = EntranceStagger::new(nodes(&[1, 2, 3]), 100);
        assert_eq!(stagger.due(50).len(), 1);
        assert_eq!(stagger.due(150).len(), 1);
        assert_eq!(stagger.due(99_999).len(), 1);
        assert!(stagger.is_done());
    }

    #[test]
    fn late_first_poll_catches_up() {
        let mut stagger = EntranceStagger::new(nodes(&[1, 2, 3]), 100);
        let cmds = stagger.due(250);
        assert_eq!(cmds.len(), 3);
        assert!(stagger.is_done());
        assert!(stagger.due(1000).is_empty());
    }

    #[test]
    fn empty_hero_is_done_from_the_start() {
        let mut stagger = EntranceStagger::with_default_step(Vec::new());
        assert!(stagger.is_done());
        assert!(stagger.due(0).is_empty());
    }
}
