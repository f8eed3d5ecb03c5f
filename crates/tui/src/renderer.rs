//! Terminal page simulator.
//!
//! The terminal plays the role of the browser: the scroll position maps to
//! a document-unit viewport, visible fractions are computed for every
//! still-observed element and fed to the engine, and the resulting
//! commands mutate an in-memory node store that the draw pass reads.

use std::collections::{HashMap, HashSet};
use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};
use unveil_core::markup;
use unveil_core::observe::RevealEngine;
use unveil_core::state::{DirectionTracker, HeaderShadow, Section, SectionTracker, ThemeSwitch};
use unveil_protocol::{
    DomCommand, IntersectionEntry, NodeId, ObserverConfig, SharedStr, Theme, classes,
};

use crate::{ElementSpec, PageSpec};

/// Document units per terminal row.
const UNITS_PER_ROW: f64 = 20.0;
/// Height of a watched element, in document units.
const ELEMENT_HEIGHT: f64 = 40.0;
/// Scroll step per key press, in document units.
const SCROLL_STEP: f64 = 40.0;

const BODY: NodeId = NodeId(0);
const HEADER: NodeId = NodeId(1);

#[derive(Debug, Default)]
struct NodeState {
    classes: HashSet<SharedStr>,
    text: Option<SharedStr>,
    width_percent: Option<f64>,
}

/// In-memory stand-in for the DOM plus the set of still-observed nodes.
#[derive(Debug, Default)]
struct NodeStore {
    nodes: HashMap<NodeId, NodeState>,
    observed: HashSet<NodeId>,
}

impl NodeStore {
    fn apply(&mut self, commands: Vec<DomCommand>) {
        for command in commands {
            if let DomCommand::Unobserve { node } = command {
                self.observed.remove(&node);
                continue;
            }
            let node = self.nodes.entry(command.node()).or_default();
            match command {
                DomCommand::AddClass { class, .. } => {
                    node.classes.insert(class);
                }
                DomCommand::RemoveClass { class, .. } => {
                    node.classes.remove(&*class);
                }
                DomCommand::SetText { text, .. } => node.text = Some(text),
                DomCommand::SetWidthPercent { percent, .. } => node.width_percent = Some(percent),
                // Images and form messages don't appear in the simulator.
                DomCommand::SetImageSource { .. }
                | DomCommand::Show { .. }
                | DomCommand::Hide { .. }
                | DomCommand::Unobserve { .. } => {}
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(&node)
            .is_some_and(|n| n.classes.contains(class))
    }

    fn node(&self, node: NodeId) -> Option<&NodeState> {
        self.nodes.get(&node)
    }
}

/// A watched element placed in the document.
struct PlacedElement {
    node: NodeId,
    label: String,
    kind: String,
    /// Document offset of the element's top edge.
    top: f64,
}

struct Palette {
    background: Color,
    text: Color,
    muted: Color,
    accent: Color,
    bar: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            background: Color::White,
            text: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
            bar: Color::Cyan,
        },
        Theme::Dark => Palette {
            background: Color::Black,
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            bar: Color::LightBlue,
        },
    }
}

/// Visible fraction of an element for the current viewport, with the
/// observer's root margin applied to the viewport bottom (the default
/// -50px bottom inset makes reveals land just before the edge).
fn visible_fraction(element_top: f64, scroll_y: f64, view_height: f64, margin_bottom: f64) -> f64 {
    let view_bottom = scroll_y + view_height + margin_bottom;
    let overlap = (element_top + ELEMENT_HEIGHT).min(view_bottom) - element_top.max(scroll_y);
    (overlap / ELEMENT_HEIGHT).clamp(0.0, 1.0)
}

pub fn run(page: &PageSpec) -> Result<()> {
    // --- build the document and register everything ---
    let mut engine = RevealEngine::new();
    let mut sections = SectionTracker::new();
    let mut shadow = HeaderShadow::new(HEADER);
    let mut direction = DirectionTracker::new(HEADER);
    let mut theme = ThemeSwitch::new(BODY);
    let mut store = NodeStore::default();

    let mut placed: Vec<PlacedElement> = Vec::new();
    let mut section_rows: Vec<(String, f64, NodeId)> = Vec::new();
    let mut next_id = 100u64;
    let mut doc_top = 0.0f64;

    for section in &page.sections {
        let nav_link = NodeId::new(next_id);
        next_id += 1;
        sections.add_section(Section {
            nav_link,
            top: doc_top,
            height: section.height,
        });
        section_rows.push((section.name.clone(), doc_top, nav_link));

        for spec in &section.elements {
            let node = NodeId::new(next_id);
            next_id += 1;
            register_element(&mut engine, node, spec)?;
            store.observed.insert(node);
            placed.push(PlacedElement {
                node,
                label: spec.label.clone(),
                kind: spec.kind.clone(),
                top: doc_top + spec.offset,
            });
        }
        doc_top += section.height;
    }
    let doc_height = doc_top;

    let config = ObserverConfig::default();
    engine.start(config);

    // --- terminal setup ---
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let mut scroll_y = 0.0f64;
    let result = event_loop(
        &mut terminal,
        page,
        &placed,
        &section_rows,
        doc_height,
        &mut scroll_y,
        &mut engine,
        &mut sections,
        &mut shadow,
        &mut direction,
        &mut theme,
        &mut store,
        config,
    );

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn register_element(engine: &mut RevealEngine, node: NodeId, spec: &ElementSpec) -> Result<()> {
    let kind = markup::parse_kind(&spec.kind)?;
    engine.register(node, kind, spec.target.filter(|t| t.is_finite()));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    page: &PageSpec,
    placed: &[PlacedElement],
    section_rows: &[(String, f64, NodeId)],
    doc_height: f64,
    scroll_y: &mut f64,
    engine: &mut RevealEngine,
    sections: &mut SectionTracker,
    shadow: &mut HeaderShadow,
    direction: &mut DirectionTracker,
    theme: &mut ThemeSwitch,
    store: &mut NodeStore,
    config: ObserverConfig,
) -> Result<()> {
    loop {
        let term_size = terminal.size()?;
        let view_height = f64::from(term_size.height.saturating_sub(2)) * UNITS_PER_ROW;

        // Feed the engine what the "viewport" can see.
        let entries: Vec<IntersectionEntry> = placed
            .iter()
            .filter(|e| store.observed.contains(&e.node))
            .map(|e| {
                IntersectionEntry::new(
                    e.node,
                    visible_fraction(e.top, *scroll_y, view_height, config.root_margin.bottom),
                )
            })
            .collect();
        store.apply(engine.on_intersections(&entries));

        // Scroll-driven chrome.
        store.apply(sections.on_scroll(*scroll_y));
        store.apply(shadow.on_scroll(*scroll_y));
        store.apply(direction.on_scroll(*scroll_y));

        // Counter ramps advance once per ~16ms loop pass.
        store.apply(engine.tick());

        draw(terminal, page, placed, section_rows, *scroll_y, theme.theme(), store)?;

        // ~60Hz cadence; the poll timeout doubles as the ramp tick interval.
        if event::poll(std::time::Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Up => *scroll_y = (*scroll_y - SCROLL_STEP).max(0.0),
                    KeyCode::Down => {
                        *scroll_y = (*scroll_y + SCROLL_STEP).min(doc_height);
                    }
                    KeyCode::Char('t') => {
                        store.apply(theme.toggle().commands);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => {
                        *scroll_y = (*scroll_y + SCROLL_STEP).min(doc_height);
                    }
                    MouseEventKind::ScrollUp => *scroll_y = (*scroll_y - SCROLL_STEP).max(0.0),
                    _ => {}
                },
                _ => {}
            }
        }
    }
    Ok(())
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    page: &PageSpec,
    placed: &[PlacedElement],
    section_rows: &[(String, f64, NodeId)],
    scroll_y: f64,
    theme: Theme,
    store: &NodeStore,
) -> Result<()> {
    let colors = palette(theme);
    terminal.draw(|frame| {
        let area = frame.area();
        let background = Block::default().style(Style::default().bg(colors.background));
        frame.render_widget(background, area);

        // Header: hidden while scrolling down, shadowed once scrolled.
        let header_hidden = store.has_class(HEADER, classes::HEADER_HIDDEN);
        let header_area = Rect::new(0, 0, area.width, 1);
        if !header_hidden {
            let shadow_marker = if store.has_class(HEADER, classes::SCROLL_HEADER) {
                "▁"
            } else {
                " "
            };
            let header = Block::default()
                .title(format!(
                    " {} {}| ↑↓ scroll | t theme | q quit ",
                    page.title, shadow_marker
                ))
                .style(Style::default().fg(colors.background).bg(colors.accent));
            frame.render_widget(header, header_area);
        }

        // Nav bar: section names, scrollspy highlights the active one.
        let nav_area = Rect::new(0, 1, area.width, 1);
        let mut nav_line = String::new();
        let mut active_spans: Vec<(usize, usize)> = Vec::new();
        let mut cursor = 0usize;
        for (name, _, nav_link) in section_rows {
            let start = cursor;
            nav_line.push(' ');
            nav_line.push_str(name);
            nav_line.push(' ');
            cursor += name.chars().count() + 2;
            if store.has_class(*nav_link, classes::ACTIVE_LINK) {
                active_spans.push((start, cursor));
            }
        }
        let buf = frame.buffer_mut();
        for (i, ch) in nav_line.chars().enumerate() {
            if i as u16 >= nav_area.width {
                break;
            }
            let active = active_spans.iter().any(|&(s, e)| i >= s && i < e);
            let fg = if active { colors.accent } else { colors.muted };
            buf[(nav_area.x + i as u16, nav_area.y)]
                .set_char(ch)
                .set_fg(fg)
                .set_bg(colors.background);
        }

        // Content rows.
        let content_area = Rect::new(0, 2, area.width, area.height.saturating_sub(2));
        for element in placed {
            let row_f = (element.top - scroll_y) / UNITS_PER_ROW;
            if row_f < 0.0 || row_f >= f64::from(content_area.height) {
                continue;
            }
            let y = content_area.y + row_f as u16;
            let state = store.node(element.node);
            let revealed = state.is_some_and(|n| n.classes.contains(classes::REVEALED));

            let line = match element.kind.as_str() {
                "progress" => {
                    let percent = state.and_then(|n| n.width_percent).unwrap_or(0.0);
                    let bar_width = 30usize;
                    let filled =
                        ((percent / 100.0) * bar_width as f64).round().clamp(0.0, bar_width as f64)
                            as usize;
                    format!(
                        "  {:<12} {}{} {:>3.0}%",
                        element.label,
                        "█".repeat(filled),
                        "░".repeat(bar_width - filled),
                        percent
                    )
                }
                "counter" => {
                    let value = state
                        .and_then(|n| n.text.as_deref())
                        .unwrap_or("0")
                        .to_string();
                    format!("  {:<12} {value:>6}", element.label)
                }
                _ => format!("  {}", element.label),
            };

            let fg = if revealed { colors.text } else { colors.muted };
            let style_fg = if element.kind == "progress" && revealed {
                colors.bar
            } else {
                fg
            };
            for (i, ch) in line.chars().enumerate() {
                if i as u16 >= content_area.width {
                    break;
                }
                buf[(content_area.x + i as u16, y)]
                    .set_char(ch)
                    .set_fg(style_fg)
                    .set_bg(colors.background);
            }
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_is_full_when_element_centered() {
        let f = visible_fraction(500.0, 300.0, 600.0, 0.0);
        assert!((f - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fraction_is_zero_below_the_fold() {
        let f = visible_fraction(2000.0, 0.0, 600.0, 0.0);
        assert_eq!(f, 0.0);
    }

    #[test]
    fn bottom_margin_delays_visibility() {
        // Element starts right at the viewport bottom edge.
        let without_margin = visible_fraction(600.0, 0.0, 640.0, 0.0);
        let with_margin = visible_fraction(600.0, 0.0, 640.0, -50.0);
        assert!(without_margin > 0.0);
        assert_eq!(with_margin, 0.0);
    }

    #[test]
    fn partial_overlap_is_fractional() {
        // Half the element pokes above the viewport top.
        let f = visible_fraction(480.0, 500.0, 600.0, 0.0);
        assert!((f - 0.5).abs() < 1e-9);
    }
}
