use std::collections::{BTreeMap, HashMap};

use unveil_protocol::{
    DomCommand, ElementKind, IntersectionEntry, NodeId, ObserverConfig, classes,
};

use crate::observe::ramp::CounterRamp;

/// Per-element lifecycle: `Watching → Revealed`, terminal.
///
/// Records are kept after reveal so a stray re-registration of the same
/// node stays a no-op instead of re-arming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchState {
    Watching,
    Revealed,
}

#[derive(Debug, Clone)]
struct WatchRecord {
    kind: ElementKind,
    target: Option<f64>,
    state: WatchState,
}

/// Transitions each registered element from hidden to revealed exactly once,
/// the first moment it becomes sufficiently visible in the viewport.
///
/// The engine owns no timers and never touches nodes. The host feeds it
/// batched [`IntersectionEntry`] reports and drains the returned
/// [`DomCommand`]s; for active counter ramps it additionally calls
/// [`RevealEngine::tick`] on a fixed cadence until
/// [`RevealEngine::has_active_ramps`] turns false.
#[derive(Debug, Default)]
pub struct RevealEngine {
    config: Option<ObserverConfig>,
    records: HashMap<NodeId, WatchRecord>,
    // BTreeMap so tick output is ordered by node id — ramps of different
    // elements have no ordering guarantee, but determinism keeps hosts
    // and tests simple.
    ramps: BTreeMap<NodeId, CounterRamp>,
}

impl RevealEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element to the watch set. No-op if the node is already
    /// registered or already revealed.
    ///
    /// `target` is the final fill percentage for progress bars or the end
    /// value for counters; `Generic` elements ignore it.
    pub fn register(&mut self, node: NodeId, kind: ElementKind, target: Option<f64>) {
        self.records.entry(node).or_insert(WatchRecord {
            kind,
            target,
            state: WatchState::Watching,
        });
    }

    /// Begin observation. Idempotent — the first configuration wins and
    /// later calls have no additional effect.
    pub fn start(&mut self, config: ObserverConfig) {
        if self.config.is_none() {
            self.config = Some(config);
        }
    }

    pub fn started(&self) -> bool {
        self.config.is_some()
    }

    /// The active configuration, once started.
    pub fn config(&self) -> Option<ObserverConfig> {
        self.config
    }

    /// Whether the node has already made its terminal transition.
    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.records
            .get(&node)
            .is_some_and(|r| r.state == WatchState::Revealed)
    }

    /// Number of elements still waiting to reveal.
    pub fn watching(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.state == WatchState::Watching)
            .count()
    }

    /// Whether any counter ramp still needs ticks.
    pub fn has_active_ramps(&self) -> bool {
        !self.ramps.is_empty()
    }

    /// Handle a batch of visibility reports from the host's intersection
    /// facility.
    ///
    /// Each watched element whose visible fraction meets the threshold is
    /// marked revealed, animated per its kind, and unobserved. Entries for
    /// unknown or already-revealed nodes are ignored; entries below the
    /// threshold leave the element watching. Batches arriving before
    /// [`RevealEngine::start`] are dropped entirely.
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> Vec<DomCommand> {
        let Some(config) = self.config else {
            return Vec::new();
        };

        let mut commands = Vec::new();
        for entry in entries {
            if entry.visible_fraction < config.threshold {
                continue;
            }
            let Some(record) = self.records.get_mut(&entry.node) else {
                continue;
            };
            if record.state == WatchState::Revealed {
                continue;
            }
            record.state = WatchState::Revealed;

            commands.push(DomCommand::AddClass {
                node: entry.node,
                class: classes::REVEALED.into(),
            });

            // A missing or non-finite target degrades to a plain reveal —
            // display degradation, not an error.
            match record.kind {
                ElementKind::Generic => {}
                ElementKind::ProgressBar => {
                    if let Some(percent) = record.target.filter(|t| t.is_finite()) {
                        commands.push(DomCommand::SetWidthPercent {
                            node: entry.node,
                            percent,
                        });
                    }
                }
                ElementKind::Counter => {
                    if let Some(target) = record.target.filter(|t| t.is_finite()) {
                        self.ramps
                            .insert(entry.node, CounterRamp::with_defaults(target));
                    }
                }
            }

            commands.push(DomCommand::Unobserve { node: entry.node });
        }
        commands
    }

    /// Advance every active counter ramp one tick, emitting the updated
    /// display values. Finished ramps are dropped.
    pub fn tick(&mut self) -> Vec<DomCommand> {
        let mut commands = Vec::with_capacity(self.ramps.len());
        for (node, ramp) in &mut self.ramps {
            if let Some(value) = ramp.tick() {
                commands.push(DomCommand::SetText {
                    node: *node,
                    text: value.to_string().into(),
                });
            }
        }
        self.ramps.retain(|_, ramp| !ramp.is_done());
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_engine() -> RevealEngine {
        let mut engine = RevealEngine::new();
        engine.start(ObserverConfig::default());
        engine
    }

    fn entry(id: u64, fraction: f64) -> IntersectionEntry {
        IntersectionEntry::new(NodeId::new(id), fraction)
    }

    #[test]
    fn generic_element_reveals_once() {
        let mut engine = started_engine();
        engine.register(NodeId::new(1), ElementKind::Generic, None);

        let cmds = engine.on_intersections(&[entry(1, 0.5)]);
        assert_eq!(
            cmds,
            vec![
                DomCommand::AddClass {
                    node: NodeId::new(1),
                    class: "active".into(),
                },
                DomCommand::Unobserve {
                    node: NodeId::new(1),
                },
            ]
        );
        assert!(engine.is_revealed(NodeId::new(1)));

        // Scrolling back out and in again must not re-trigger.
        let again = engine.on_intersections(&[entry(1, 1.0)]);
        assert!(again.is_empty());
    }

    #[test]
    fn below_threshold_stays_watching() {
        let mut engine = started_engine();
        engine.register(NodeId::new(1), ElementKind::Generic, None);

        let cmds = engine.on_intersections(&[entry(1, 0.05)]);
        assert!(cmds.is_empty());
        assert!(!engine.is_revealed(NodeId::new(1)));
        assert_eq!(engine.watching(), 1);

        // Meets the 0.1 threshold exactly.
        let cmds = engine.on_intersections(&[entry(1, 0.1)]);
        assert_eq!(cmds.len(), 2);
    }

    #[test]
    fn progress_bar_gets_exact_width() {
        let mut engine = started_engine();
        engine.register(NodeId::new(2), ElementKind::ProgressBar, Some(75.0));

        let cmds = engine.on_intersections(&[entry(2, 0.9)]);
        assert!(cmds.contains(&DomCommand::SetWidthPercent {
            node: NodeId::new(2),
            percent: 75.0,
        }));
    }

    #[test]
    fn missing_target_degrades_to_plain_reveal() {
        let mut engine = started_engine();
        engine.register(NodeId::new(2), ElementKind::ProgressBar, None);
        engine.register(NodeId::new(3), ElementKind::Counter, Some(f64::NAN));

        let cmds = engine.on_intersections(&[entry(2, 1.0), entry(3, 1.0)]);
        // Both reveal, neither animates.
        assert_eq!(cmds.len(), 4);
        assert!(
            cmds.iter()
                .all(|c| !matches!(c, DomCommand::SetWidthPercent { .. }))
        );
        assert!(!engine.has_active_ramps());
    }

    #[test]
    fn counter_ramps_to_exact_target() {
        let mut engine = started_engine();
        engine.register(NodeId::new(4), ElementKind::Counter, Some(200.0));
        engine.on_intersections(&[entry(4, 1.0)]);
        assert!(engine.has_active_ramps());

        let mut last = None;
        let mut prev = i64::MIN;
        let mut ticks = 0;
        while engine.has_active_ramps() {
            for cmd in engine.tick() {
                if let DomCommand::SetText { text, .. } = cmd {
                    let value: i64 = text.parse().unwrap_or(-1);
                    assert!(value >= prev, "counter regressed: {prev} -> {value}");
                    prev = value;
                    last = Some(value);
                }
            }
            ticks += 1;
            assert!(ticks < 1000, "ramp never finished");
        }
        assert_eq!(last, Some(200));
        assert!((ticks - 125i64).abs() <= 2, "got {ticks} ticks");
    }

    #[test]
    fn double_registration_reveals_once() {
        let mut engine = started_engine();
        engine.register(NodeId::new(5), ElementKind::Generic, None);
        engine.register(NodeId::new(5), ElementKind::Counter, Some(999.0));

        let cmds = engine.on_intersections(&[entry(5, 1.0)]);
        // Still the original generic registration: one reveal, no ramp.
        assert_eq!(cmds.len(), 2);
        assert!(!engine.has_active_ramps());
    }

    #[test]
    fn register_after_reveal_is_noop() {
        let mut engine = started_engine();
        engine.register(NodeId::new(6), ElementKind::Generic, None);
        engine.on_intersections(&[entry(6, 1.0)]);

        engine.register(NodeId::new(6), ElementKind::Generic, None);
        let cmds = engine.on_intersections(&[entry(6, 1.0)]);
        assert!(cmds.is_empty());
    }

    #[test]
    fn batches_before_start_are_dropped() {
        let mut engine = RevealEngine::new();
        engine.register(NodeId::new(7), ElementKind::Generic, None);
        assert!(engine.on_intersections(&[entry(7, 1.0)]).is_empty());
        assert!(!engine.is_revealed(NodeId::new(7)));

        engine.start(ObserverConfig::default());
        assert_eq!(engine.on_intersections(&[entry(7, 1.0)]).len(), 2);
    }

    #[test]
    fn second_start_keeps_first_config() {
        let mut engine = RevealEngine::new();
        let first = ObserverConfig {
            threshold: 0.5,
            root_margin: unveil_protocol::Insets::zero(),
        };
        engine.start(first);
        engine.start(ObserverConfig::default());

        let config = engine.config().unwrap_or_default();
        assert!((config.threshold - 0.5).abs() < f64::EPSILON);

        // 0.3 < 0.5: the later (lower) threshold must not apply.
        engine.register(NodeId::new(8), ElementKind::Generic, None);
        assert!(engine.on_intersections(&[entry(8, 0.3)]).is_empty());
    }

    #[test]
    fn unknown_nodes_are_ignored() {
        let mut engine = started_engine();
        assert!(engine.on_intersections(&[entry(42, 1.0)]).is_empty());
    }

    #[test]
    fn batch_mixes_qualifying_and_pending() {
        let mut engine = started_engine();
        engine.register(NodeId::new(1), ElementKind::Generic, None);
        engine.register(NodeId::new(2), ElementKind::Generic, None);

        let cmds = engine.on_intersections(&[entry(1, 0.8), entry(2, 0.01)]);
        assert_eq!(cmds.len(), 2);
        assert!(engine.is_revealed(NodeId::new(1)));
        assert!(!engine.is_revealed(NodeId::new(2)));
        assert_eq!(engine.watching(), 1);
    }
}
