use serde::Serialize;
use unveil_protocol::{DomCommand, NodeId, SharedStr, Theme, classes};

/// Result of a theme transition: the commands to apply plus what the host
/// should do with its single persisted flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeChange {
    pub theme: Theme,
    /// New value for the persisted flag; `None` means delete it. The store
    /// itself (localStorage, a file, whatever) is host-owned.
    pub persist: Option<SharedStr>,
    pub commands: Vec<DomCommand>,
}

/// Light/dark switch for the document body.
#[derive(Debug)]
pub struct ThemeSwitch {
    body: NodeId,
    theme: Theme,
}

impl ThemeSwitch {
    pub fn new(body: NodeId) -> Self {
        Self {
            body,
            theme: Theme::Light,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Apply a previously persisted flag at page load. An absent or
    /// unrecognized flag leaves the default light theme untouched.
    pub fn restore(&mut self, stored: Option<&str>) -> Vec<DomCommand> {
        self.theme = Theme::from_stored_flag(stored);
        match self.theme {
            Theme::Dark => vec![DomCommand::AddClass {
                node: self.body,
                class: classes::DARK_THEME.into(),
            }],
            Theme::Light => Vec::new(),
        }
    }

    /// Flip the theme.
    pub fn toggle(&mut self) -> ThemeChange {
        self.theme = self.theme.toggled();
        let command = match self.theme {
            Theme::Dark => DomCommand::AddClass {
                node: self.body,
                class: classes::DARK_THEME.into(),
            },
            Theme::Light => DomCommand::RemoveClass {
                node: self.body,
                class: classes::DARK_THEME.into(),
            },
        };
        ThemeChange {
            theme: self.theme,
            persist: self.theme.stored_flag().map(SharedStr::from),
            commands: vec![command],
        }
    }
}
