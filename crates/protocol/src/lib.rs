pub mod classes;
pub mod commands;
pub mod shared_str;
pub mod theme;
pub mod types;

pub use commands::DomCommand;
pub use shared_str::SharedStr;
pub use theme::Theme;
pub use types::{ElementKind, Insets, IntersectionEntry, NodeId, ObserverConfig};
