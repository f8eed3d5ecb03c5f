use unveil_protocol::{DomCommand, NodeId, classes};

/// Mobile navigation menu open/close state.
///
/// Three inputs map onto it: the hamburger opens, the close button closes,
/// and following any nav link closes (so the menu gets out of the way of
/// the section it just scrolled to).
#[derive(Debug)]
pub struct NavMenu {
    menu: NodeId,
    open: bool,
}

impl NavMenu {
    pub fn new(menu: NodeId) -> Self {
        Self { menu, open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) -> Vec<DomCommand> {
        if self.open {
            return Vec::new();
        }
        self.open = true;
        vec![DomCommand::AddClass {
            node: self.menu,
            class: classes::SHOW_MENU.into(),
        }]
    }

    pub fn close(&mut self) -> Vec<DomCommand> {
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        vec![DomCommand::RemoveClass {
            node: self.menu,
            class: classes::SHOW_MENU.into(),
        }]
    }

    /// A nav link was followed.
    pub fn follow_link(&mut self) -> Vec<DomCommand> {
        self.close()
    }
}
