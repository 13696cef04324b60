//! IPC between the webviews and Rust
//!
//! The toolbar page posts [`ToolbarCommand`]s (decoded in `diamond-core`).
//! Content pages get [`PAGE_BRIDGE`] injected, which reports what the
//! engine's own callbacks miss as [`PageMessage`]s.
//!
//! [`ToolbarCommand`]: diamond_core::ToolbarCommand

use diamond_core::{ShellError, ShellResult, SurfaceEvent};
use serde::Deserialize;

/// Initialization script for every content page
pub const PAGE_BRIDGE: &str = include_str!("../ui/page_bridge.js");

/// Message posted by [`PAGE_BRIDGE`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageMessage {
    /// Same-document navigation
    Location { url: String },
    /// Navigation API back/forward availability
    History {
        can_go_back: bool,
        can_go_forward: bool,
    },
}

impl PageMessage {
    pub fn parse(body: &str) -> ShellResult<Self> {
        serde_json::from_str(body)
            .map_err(|e| ShellError::ipc(format!("bad page message {:?}: {}", body, e)))
    }
}

impl From<PageMessage> for SurfaceEvent {
    fn from(message: PageMessage) -> Self {
        match message {
            PageMessage::Location { url } => SurfaceEvent::LocationChanged(url),
            PageMessage::History {
                can_go_back,
                can_go_forward,
            } => SurfaceEvent::HistoryReported {
                can_go_back,
                can_go_forward,
            },
        }
    }
}
