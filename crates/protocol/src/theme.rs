use serde::{Deserialize, Serialize};

use crate::classes;

/// The two page themes. `Light` is the unmarked default — dark mode is a
/// single class on the body, and the persisted flag only exists while
/// dark mode is on (absence means light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The flipped theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value written to the host's single persisted flag, `None` when the
    /// flag should be absent.
    pub fn stored_flag(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some(classes::DARK_THEME),
        }
    }

    /// Theme for a previously persisted flag value. Anything other than
    /// the dark-theme marker (including garbage) falls back to light.
    pub fn from_stored_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(v) if v == classes::DARK_THEME => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn stored_flag_only_for_dark() {
        assert_eq!(Theme::Light.stored_flag(), None);
        assert_eq!(Theme::Dark.stored_flag(), Some("dark-theme"));
    }

    #[test]
    fn restores_from_flag() {
        assert_eq!(Theme::from_stored_flag(Some("dark-theme")), Theme::Dark);
        assert_eq!(Theme::from_stored_flag(Some("unknown")), Theme::Light);
        assert_eq!(Theme::from_stored_flag(None), Theme::Light);
    }
}
