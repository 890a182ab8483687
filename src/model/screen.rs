use serde::{Deserialize, Serialize};
use std::fmt;

/// Which screen of the app is showing. Serialized as the `tab` of a snapshot.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Home,
    Setup,
    Scorecard,
    Final,
    Leaderboard,
}

impl Screen {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Setup => "setup",
            Screen::Scorecard => "scorecard",
            Screen::Final => "final",
            Screen::Leaderboard => "leaderboard",
        }
    }

    #[must_use]
    pub fn from_tab(tab: &str) -> Option<Self> {
        match tab {
            "home" => Some(Screen::Home),
            "setup" => Some(Screen::Setup),
            "scorecard" => Some(Screen::Scorecard),
            "final" => Some(Screen::Final),
            "leaderboard" => Some(Screen::Leaderboard),
            _ => None,
        }
    }

    /// Final and Leaderboard both show results.
    #[must_use]
    pub fn shows_results(self) -> bool {
        matches!(self, Screen::Final | Screen::Leaderboard)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Destinations offered by the menu overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuTarget {
    Home,
    Setup,
    Scorecard,
    Leaderboard,
}

impl MenuTarget {
    #[must_use]
    pub fn screen(self) -> Screen {
        match self {
            MenuTarget::Home => Screen::Home,
            MenuTarget::Setup => Screen::Setup,
            MenuTarget::Scorecard => Screen::Scorecard,
            MenuTarget::Leaderboard => Screen::Leaderboard,
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "home" => Some(MenuTarget::Home),
            "setup" => Some(MenuTarget::Setup),
            "scorecard" | "scoring" => Some(MenuTarget::Scorecard),
            "leaderboard" | "board" => Some(MenuTarget::Leaderboard),
            _ => None,
        }
    }
}
