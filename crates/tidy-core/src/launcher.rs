//! The launcher palette and its settings panel.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One result the palette can open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherEntry {
    pub id: u32,
    pub title: String,
    /// Icon asset shown next to the title
    pub icon: String,
    /// What activating the entry opens: an app, a link or a file
    pub target: String,
}

impl LauncherEntry {
    pub fn new(id: u32, title: &str, icon: &str, target: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            icon: icon.to_string(),
            target: target.to_string(),
        }
    }

    /// The entries a fresh install starts with.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(1, "WeChat", "assets/wechat.png", "assets/wechat.png"),
            Self::new(2, "PayPal", "assets/paypal.png", "assets/paypal.png"),
            Self::new(3, "QQ", "assets/qq.png", "assets/qq.png"),
        ]
    }
}

/// The search palette.
#[derive(Debug, Clone, Default)]
pub struct Launcher {
    entries: Vec<LauncherEntry>,
    query: String,
}

impl Launcher {
    pub fn new(entries: Vec<LauncherEntry>) -> Self {
        Self {
            entries,
            query: String::new(),
        }
    }

    /// Returns all configured entries.
    pub fn entries(&self) -> &[LauncherEntry] {
        &self.entries
    }

    /// Returns the current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Updates the query and returns the matching entries.
    pub fn set_query(&mut self, query: &str) -> Vec<&LauncherEntry> {
        self.query = query.to_string();
        self.search(query)
    }

    /// Entries whose title contains `query`, ignoring case.
    ///
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&LauncherEntry> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| needle.is_empty() || entry.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Returns the target to open for entry `id`.
    pub fn activate(&self, id: u32) -> Option<&str> {
        let entry = self.entries.iter().find(|entry| entry.id == id)?;
        tracing::info!(id, target = %entry.target, "activating launcher entry");
        Some(&entry.target)
    }
}

/// Window controls on the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    Minimize,
    Maximize,
    Close,
    DevTools,
}

impl WindowAction {
    /// Parses an action name sent by the settings panel.
    ///
    /// Unknown names are logged and yield `None`.
    pub fn from_message(name: &str) -> Option<Self> {
        match name.parse() {
            Ok(action) => Some(action),
            Err(UnknownAction(name)) => {
                tracing::warn!("Ignoring undefined window action: {}", name);
                None
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowAction::Minimize => "minimize",
            WindowAction::Maximize => "maximize",
            WindowAction::Close => "close",
            WindowAction::DevTools => "devtools",
        }
    }
}

/// Error for a window action name nobody handles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown window action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for WindowAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimize" => Ok(WindowAction::Minimize),
            "maximize" => Ok(WindowAction::Maximize),
            "close" => Ok(WindowAction::Close),
            "devtools" => Ok(WindowAction::DevTools),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl std::fmt::Display for WindowAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles<'a>(entries: &[&'a LauncherEntry]) -> Vec<&'a str> {
        entries.iter().map(|entry| entry.title.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_all() {
        let launcher = Launcher::new(LauncherEntry::defaults());
        assert_eq!(titles(&launcher.search("")), ["WeChat", "PayPal", "QQ"]);
        assert_eq!(launcher.search("   ").len(), 3);
    }

    #[test]
    fn test_search_ignores_case() {
        let launcher = Launcher::new(LauncherEntry::defaults());
        assert_eq!(titles(&launcher.search("pay")), ["PayPal"]);
        assert_eq!(titles(&launcher.search("q")), ["QQ"]);
        assert!(launcher.search("slack").is_empty());
    }

    #[test]
    fn test_set_query() {
        let mut launcher = Launcher::new(LauncherEntry::defaults());
        assert_eq!(titles(&launcher.set_query("CHAT")), ["WeChat"]);
        assert_eq!(launcher.query(), "CHAT");
    }

    #[test]
    fn test_activate() {
        let launcher = Launcher::new(LauncherEntry::defaults());
        assert_eq!(launcher.activate(2), Some("assets/paypal.png"));
        assert_eq!(launcher.activate(9), None);
    }

    #[test]
    fn test_window_actions() {
        assert_eq!(
            WindowAction::from_message("minimize"),
            Some(WindowAction::Minimize)
        );
        assert_eq!(
            "devtools".parse::<WindowAction>(),
            Ok(WindowAction::DevTools)
        );
        assert_eq!(WindowAction::from_message("fullscreen"), None);
        assert_eq!(WindowAction::Close.to_string(), "close");
    }
}
