//! Page navigation
//!
//! A flat state machine over the five pages plus the sidebar flag. The
//! navigator only records where the user is; starting and stopping page
//! motion is the shell's job.

use crate::error::DriftError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// The closed set of pages behind the sidebar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Profile,
    Tools,
    Roadmap,
    Contacts,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Profile,
        Page::Tools,
        Page::Roadmap,
        Page::Contacts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Profile => "profile",
            Page::Tools => "tools",
            Page::Roadmap => "roadmap",
            Page::Contacts => "contacts",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DriftError::UnknownPage(s.to_string()))
    }
}

/// A completed page change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Page,
    pub to: Page,
}

/// Current page, sidebar flag and the transitions taken so far
#[derive(Clone, Debug)]
pub struct Navigator {
    current: Page,
    sidebar_open: bool,
    history: SmallVec<[Transition; 8]>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start on the home page with the sidebar open
    pub fn new() -> Self {
        Self {
            current: Page::Home,
            sidebar_open: true,
            history: SmallVec::new(),
        }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Switch pages. Returns `None` when `to` is already current.
    pub fn navigate(&mut self, to: Page) -> Option<Transition> {
        if to == self.current {
            debug!(page = %to, "navigate to current page ignored");
            return None;
        }

        let transition = Transition {
            from: self.current,
            to,
        };
        self.current = to;
        self.history.push(transition);
        info!(from = %transition.from, to = %transition.to, "page changed");
        Some(transition)
    }

    /// Flip the sidebar and return the new state
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        debug!(open = self.sidebar_open, "sidebar toggled");
        self.sidebar_open
    }

    pub fn history(&self) -> &[Transition] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), Page::Home);
        assert!(nav.sidebar_open());
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_navigate_records_transition() {
        let mut nav = Navigator::new();
        let t = nav.navigate(Page::Profile).unwrap();
        assert_eq!(t, Transition { from: Page::Home, to: Page::Profile });
        assert_eq!(nav.current(), Page::Profile);

        nav.navigate(Page::Contacts);
        assert_eq!(nav.history().len(), 2);
        assert_eq!(nav.history()[1].from, Page::Profile);
    }

    #[test]
    fn test_navigate_to_current_is_noop() {
        let mut nav = Navigator::new();
        assert!(nav.navigate(Page::Home).is_none());
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_toggle_sidebar() {
        let mut nav = Navigator::new();
        assert!(!nav.toggle_sidebar());
        assert!(nav.toggle_sidebar());
    }

    #[test]
    fn test_page_parsing() {
        assert_eq!("roadmap".parse::<Page>().unwrap(), Page::Roadmap);
        assert_eq!(" Tools ".parse::<Page>().unwrap(), Page::Tools);
        assert!(matches!(
            "blog".parse::<Page>(),
            Err(DriftError::UnknownPage(name)) if name == "blog"
        ));
        for page in Page::ALL {
            assert_eq!(page.to_string().parse::<Page>().unwrap(), page);
        }
    }
}
