//! Active-tab inspection seam for Notemark.
//!
//! The popup core never talks to the host browser directly; it asks a
//! [`TabProbe`] for the current tab's URL and title. The RPC layer feeds
//! the real tab in from the host, tests and the demo binary use
//! [`StaticTabProbe`].

use std::sync::Mutex;

use crate::types::bookmark::TabInfo;
use crate::types::errors::TabError;

/// Trait defining the tab-inspection interface.
pub trait TabProbe: Send + Sync {
    /// Resolves the currently active tab, or [`TabError::Unavailable`] when
    /// no tab can be inspected.
    fn current_tab(&self) -> Result<TabInfo, TabError>;
}

/// Probe answering with a host-supplied tab, settable at runtime.
///
/// Starts empty; until the host reports a tab, `current_tab` fails with
/// [`TabError::Unavailable`].
#[derive(Default)]
pub struct StaticTabProbe {
    tab: Mutex<Option<TabInfo>>,
}

impl StaticTabProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe pre-loaded with a fixed tab.
    pub fn with_tab(url: impl Into<String>, title: Option<&str>) -> Self {
        let probe = Self::new();
        probe.set_tab(TabInfo {
            url: url.into(),
            title: title.map(str::to_string),
        });
        probe
    }

    /// Replaces the reported tab with the host's latest observation.
    pub fn set_tab(&self, tab: TabInfo) {
        if let Ok(mut slot) = self.tab.lock() {
            *slot = Some(tab);
        }
    }
}

impl TabProbe for StaticTabProbe {
    fn current_tab(&self) -> Result<TabInfo, TabError> {
        let slot = self
            .tab
            .lock()
            .map_err(|e| TabError::Unavailable(e.to_string()))?;
        slot.clone()
            .ok_or_else(|| TabError::Unavailable("no active tab reported".into()))
    }
}
