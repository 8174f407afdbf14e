//! Detail tab strip

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Posts,
    Announcements,
    Members,
}

impl Tab {
    /// Tab order as laid out in the strip
    pub const ALL: [Tab; 3] = [Tab::Posts, Tab::Announcements, Tab::Members];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Posts => "Posts",
            Tab::Announcements => "Announcements",
            Tab::Members => "Members",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "posts" => Ok(Tab::Posts),
            "announcements" => Ok(Tab::Announcements),
            "members" => Ok(Tab::Members),
            other => Err(format!(
                "unknown tab '{}', expected posts, announcements or members",
                other
            )),
        }
    }
}

/// Tab buttons and panes. Exactly one tab is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabStrip {
    active: Tab,
}

impl Default for TabStrip {
    fn default() -> Self {
        Self { active: Tab::Posts }
    }
}

impl TabStrip {
    pub fn active(&self) -> Tab {
        self.active
    }

    /// Deactivate every button and pane, then activate `tab`
    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    /// `(tab, active)` for each button in strip order
    pub fn buttons(&self) -> impl Iterator<Item = (Tab, bool)> + '_ {
        Tab::ALL.into_iter().map(move |tab| (tab, self.is_active(tab)))
    }
}
