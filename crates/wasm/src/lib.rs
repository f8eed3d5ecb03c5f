//! WASM bridge: the page's JS glue owns the real IntersectionObserver,
//! timers, localStorage, and DOM writes; this crate owns all the state and
//! decisions. Commands cross the boundary as JSON strings.

use std::sync::Mutex;

use unveil_core::markup;
use unveil_core::observe::{EntranceStagger, LazyLoader, RevealEngine};
use unveil_core::state::form::{self, FieldNodes, FormNodes};
use unveil_core::state::{
    DirectionTracker, HeaderShadow, NavMenu, Section, SectionTracker, ThemeSwitch,
};
use unveil_protocol::{DomCommand, IntersectionEntry, NodeId, ObserverConfig};
use wasm_bindgen::prelude::*;

/// Everything the page needs, behind one lock. All calls arrive on the
/// single JS thread, so the Mutex only satisfies `static` requirements.
struct Page {
    engine: RevealEngine,
    lazy: LazyLoader,
    stagger: Option<EntranceStagger>,
    sections: SectionTracker,
    shadow: HeaderShadow,
    direction: DirectionTracker,
    nav: NavMenu,
    theme: ThemeSwitch,
}

static PAGE: Mutex<Option<Page>> = Mutex::new(None);

fn with_page<T>(f: impl FnOnce(&mut Page) -> Result<T, JsError>) -> Result<T, JsError> {
    let mut guard = PAGE.lock().unwrap();
    let page = guard
        .as_mut()
        .ok_or_else(|| JsError::new("page not initialized"))?;
    f(page)
}

fn commands_json(commands: &[DomCommand]) -> Result<String, JsError> {
    serde_json::to_string(commands).map_err(|e| JsError::new(&e.to_string()))
}

/// Set up the page state. Call once before anything else; `body`, `header`,
/// and `menu` are the node ids the glue assigned to those elements.
#[wasm_bindgen]
pub fn init_page(body: u32, header: u32, menu: u32) {
    let mut guard = PAGE.lock().unwrap();
    *guard = Some(Page {
        engine: RevealEngine::new(),
        lazy: LazyLoader::new(),
        stagger: None,
        sections: SectionTracker::new(),
        shadow: HeaderShadow::new(NodeId::new(u64::from(header))),
        direction: DirectionTracker::new(NodeId::new(u64::from(header))),
        nav: NavMenu::new(NodeId::new(u64::from(menu))),
        theme: ThemeSwitch::new(NodeId::new(u64::from(body))),
    });
}

/// Register a viewport-observed element from its markup annotations.
/// `kind` is the data-kind string; `target` the raw data-target attribute.
#[wasm_bindgen]
pub fn register_element(node: u32, kind: &str, target: Option<String>) -> Result<(), JsError> {
    let kind = markup::parse_kind(kind).map_err(|e| JsError::new(&e.to_string()))?;
    let target = markup::parse_target(target.as_deref());
    with_page(|page| {
        page.engine.register(NodeId::new(u64::from(node)), kind, target);
        Ok(())
    })
}

/// Register a lazily loaded image with its real source.
#[wasm_bindgen]
pub fn register_lazy_image(node: u32, src: &str) -> Result<(), JsError> {
    with_page(|page| {
        page.lazy.register(NodeId::new(u64::from(node)), src);
        Ok(())
    })
}

/// Register a section for scrollspy, bound to its nav link.
#[wasm_bindgen]
pub fn register_section(nav_link: u32, top: f64, height: f64) -> Result<(), JsError> {
    with_page(|page| {
        page.sections.add_section(Section {
            nav_link: NodeId::new(u64::from(nav_link)),
            top,
            height,
        });
        Ok(())
    })
}

/// Register the hero children for the entrance stagger, in fade order.
#[wasm_bindgen]
pub fn register_hero(nodes: Vec<u32>) -> Result<(), JsError> {
    with_page(|page| {
        page.stagger = Some(EntranceStagger::with_default_step(
            nodes.into_iter().map(|n| NodeId::new(u64::from(n))).collect(),
        ));
        Ok(())
    })
}

/// Start observation. `root_margin` is the CSS shorthand the glue passes to
/// its IntersectionObserver verbatim. Idempotent.
#[wasm_bindgen]
pub fn start_observer(threshold: f64, root_margin: &str) -> Result<(), JsError> {
    let root_margin =
        markup::parse_root_margin(root_margin).map_err(|e| JsError::new(&e.to_string()))?;
    with_page(|page| {
        page.engine.start(ObserverConfig {
            threshold,
            root_margin,
        });
        Ok(())
    })
}

/// Handle a batch of intersection entries: `[[node, visibleFraction], ...]`.
/// Returns the commands to apply. Entries are offered to both the reveal
/// engine and the lazy loader; each ignores nodes it doesn't track.
#[wasm_bindgen]
pub fn on_intersections(entries_json: &str) -> Result<String, JsError> {
    let raw: Vec<(u64, f64)> =
        serde_json::from_str(entries_json).map_err(|e| JsError::new(&e.to_string()))?;
    let entries: Vec<IntersectionEntry> = raw
        .into_iter()
        .map(|(node, fraction)| IntersectionEntry::new(NodeId::new(node), fraction))
        .collect();
    with_page(|page| {
        let mut commands = page.engine.on_intersections(&entries);
        commands.extend(page.lazy.on_intersections(&entries));
        commands_json(&commands)
    })
}

/// Advance counter ramps one tick. The glue calls this from a ~16ms
/// interval while `has_active_ramps` stays true.
#[wasm_bindgen]
pub fn ramp_tick() -> Result<String, JsError> {
    with_page(|page| commands_json(&page.engine.tick()))
}

#[wasm_bindgen]
pub fn has_active_ramps() -> Result<bool, JsError> {
    with_page(|page| Ok(page.engine.has_active_ramps()))
}

/// Advance the entrance stagger; `elapsed_ms` is time since page load.
#[wasm_bindgen]
pub fn stagger_tick(elapsed_ms: u64) -> Result<String, JsError> {
    with_page(|page| {
        let commands = page
            .stagger
            .as_mut()
            .map(|s| s.due(elapsed_ms))
            .unwrap_or_default();
        commands_json(&commands)
    })
}

/// Handle a (debounced) scroll event at the given page offset.
#[wasm_bindgen]
pub fn on_scroll(scroll_y: f64) -> Result<String, JsError> {
    with_page(|page| {
        let mut commands = page.sections.on_scroll(scroll_y);
        commands.extend(page.shadow.on_scroll(scroll_y));
        commands.extend(page.direction.on_scroll(scroll_y));
        commands_json(&commands)
    })
}

/// Scroll offset for a followed nav link, below the fixed header.
#[wasm_bindgen]
pub fn scroll_target(section_top: f64, header_height: f64) -> f64 {
    unveil_core::state::scroll::scroll_target(section_top, header_height)
}

#[wasm_bindgen]
pub fn nav_open() -> Result<String, JsError> {
    with_page(|page| commands_json(&page.nav.open()))
}

#[wasm_bindgen]
pub fn nav_close() -> Result<String, JsError> {
    with_page(|page| commands_json(&page.nav.close()))
}

#[wasm_bindgen]
pub fn nav_follow_link() -> Result<String, JsError> {
    with_page(|page| commands_json(&page.nav.follow_link()))
}

/// Apply the persisted theme flag at load (pass the stored value, if any).
#[wasm_bindgen]
pub fn restore_theme(stored: Option<String>) -> Result<String, JsError> {
    with_page(|page| commands_json(&page.theme.restore(stored.as_deref())))
}

/// Flip the theme. Returns a JSON `ThemeChange`: the commands plus the new
/// value for the persisted flag (null = delete it).
#[wasm_bindgen]
pub fn toggle_theme() -> Result<String, JsError> {
    with_page(|page| {
        let change = page.theme.toggle();
        serde_json::to_string(&change).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Validate the contact form. Returns JSON with the validity verdict, the
/// per-field report, and the commands to render it onto the form.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn validate_contact_form(
    name: &str,
    email: &str,
    message: &str,
    name_input: u32,
    name_message: u32,
    email_input: u32,
    email_message: u32,
    message_input: u32,
    message_message: u32,
) -> Result<String, JsError> {
    let report = form::validate(name, email, message);
    let nodes = FormNodes {
        name: FieldNodes {
            input: NodeId::new(u64::from(name_input)),
            message: NodeId::new(u64::from(name_message)),
        },
        email: FieldNodes {
            input: NodeId::new(u64::from(email_input)),
            message: NodeId::new(u64::from(email_message)),
        },
        message: FieldNodes {
            input: NodeId::new(u64::from(message_input)),
            message: NodeId::new(u64::from(message_message)),
        },
    };
    let commands = form::report_commands(&report, &nodes);
    let payload = serde_json::json!({
        "valid": report.is_valid(),
        "report": report,
        "commands": commands,
    });
    serde_json::to_string(&payload).map_err(|e| JsError::new(&e.to_string()))
}
