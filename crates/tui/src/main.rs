mod renderer;

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

/// A page to simulate: sections stacked vertically, each carrying the
/// elements the engine watches.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSpec {
    pub title: String,
    pub sections: Vec<SectionSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    /// Section height in document units.
    pub height: f64,
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    pub label: String,
    /// Markup kind string: "reveal", "progress", or "counter".
    pub kind: String,
    /// Offset of the element below its section top, in document units.
    pub offset: f64,
    #[serde(default)]
    pub target: Option<f64>,
}

/// The built-in demo portfolio, for running without a page file.
fn demo_page() -> PageSpec {
    let reveal = |label: &str, offset: f64| ElementSpec {
        label: label.to_string(),
        kind: "reveal".to_string(),
        offset,
        target: None,
    };
    let with_target = |label: &str, kind: &str, offset: f64, target: f64| ElementSpec {
        label: label.to_string(),
        kind: kind.to_string(),
        offset,
        target: Some(target),
    };

    PageSpec {
        title: "unveil demo portfolio".to_string(),
        sections: vec![
            SectionSpec {
                name: "home".to_string(),
                height: 400.0,
                elements: vec![reveal("Hi, I build things for the web", 120.0)],
            },
            SectionSpec {
                name: "about".to_string(),
                height: 400.0,
                elements: vec![
                    reveal("About me", 60.0),
                    reveal("Ten years of shipping side projects", 160.0),
                ],
            },
            SectionSpec {
                name: "skills".to_string(),
                height: 500.0,
                elements: vec![
                    reveal("Skills", 40.0),
                    with_target("Rust", "progress", 140.0, 75.0),
                    with_target("TypeScript", "progress", 220.0, 90.0),
                    with_target("CSS", "progress", 300.0, 60.0),
                ],
            },
            SectionSpec {
                name: "stats".to_string(),
                height: 400.0,
                elements: vec![
                    with_target("Commits", "counter", 80.0, 200.0),
                    with_target("Projects", "counter", 180.0, 48.0),
                    with_target("Talks", "counter", 280.0, 12.0),
                ],
            },
            SectionSpec {
                name: "contact".to_string(),
                height: 400.0,
                elements: vec![reveal("Say hello", 120.0)],
            },
        ],
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let page = match args.get(1) {
        Some(arg) => {
            let data = std::fs::read(PathBuf::from(arg))?;
            serde_json::from_slice(&data)?
        }
        None => demo_page(),
    };

    renderer::run(&page)
}
