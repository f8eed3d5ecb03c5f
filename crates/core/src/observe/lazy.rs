use std::collections::HashMap;

use unveil_protocol::{DomCommand, IntersectionEntry, NodeId, SharedStr, classes};

/// Defers image loading until the image approaches the viewport.
///
/// Each registered image holds its real source (the page markup ships a
/// placeholder); on the first qualifying intersection the loader points the
/// node at that source, marks it loaded, and unobserves it. Same
/// observe-once discipline as [`crate::observe::RevealEngine`], without the
/// kind dispatch.
#[derive(Debug, Default)]
pub struct LazyLoader {
    pending: HashMap<NodeId, SharedStr>,
    loaded: Vec<NodeId>,
}

impl LazyLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch an image. No-op if the node is already pending or loaded.
    pub fn register(&mut self, node: NodeId, src: impl Into<SharedStr>) {
        if self.loaded.contains(&node) {
            return;
        }
        self.pending.entry(node).or_insert_with(|| src.into());
    }

    /// Number of images still waiting to load.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Handle a visibility batch. Any pending image that is visible at all
    /// gets its real source — lazy loading wants the image fetch started
    /// as soon as a single pixel approaches, so no threshold applies here.
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> Vec<DomCommand> {
        let mut commands = Vec::new();
        for entry in entries {
            if entry.visible_fraction <= 0.0 {
                continue;
            }
            let Some(src) = self.pending.remove(&entry.node) else {
                continue;
            };
            self.loaded.push(entry.node);
            commands.push(DomCommand::SetImageSource {
                node: entry.node,
                src,
            });
            commands.push(DomCommand::AddClass {
                node: entry.node,
                class: classes::LOADED.into(),
            });
            commands.push(DomCommand::Unobserve { node: entry.node });
        }
        commands
    }
}
