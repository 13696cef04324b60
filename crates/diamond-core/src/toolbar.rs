//! Toolbar view model
//!
//! The toolbar page is dumb: it renders whatever [`ToolbarModel`] it is handed
//! and posts a [`ToolbarCommand`] when a control is used.

use crate::error::{ShellError, ShellResult};
use crate::types::UiState;
use serde::{Deserialize, Serialize};

/// Horizontal space taken by the buttons, divider and padding
const CONTROLS_WIDTH: f64 = 150.0;
/// Average glyph advance of the URL label font
const URL_CHAR_WIDTH: f64 = 7.0;
/// Never truncate below this many characters
const MIN_URL_CHARS: usize = 12;

const ELLIPSIS: char = '…';

/// Everything the toolbar page needs to draw itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolbarModel {
    pub back_enabled: bool,
    pub forward_enabled: bool,
    pub url_display: String,
}

impl ToolbarModel {
    /// Derive the toolbar for a window `width` logical pixels wide
    pub fn from_state(ui: &UiState, width: f64) -> Self {
        Self {
            back_enabled: ui.can_go_back(),
            forward_enabled: ui.can_go_forward(),
            url_display: truncate_middle(ui.page_url(), url_capacity(width)),
        }
    }

    /// Script that hands this model to the toolbar page
    pub fn render_script(&self) -> ShellResult<String> {
        let json = serde_json::to_string(self)?;
        Ok(format!(
            "if(window.diamondToolbar) {{ diamondToolbar.update({}); }}",
            json
        ))
    }
}

/// Number of URL characters that fit next to the controls
pub fn url_capacity(width: f64) -> usize {
    let available = (width - CONTROLS_WIDTH).max(0.0);
    ((available / URL_CHAR_WIDTH) as usize).max(MIN_URL_CHARS)
}

/// Shorten `text` to at most `max_chars` characters by replacing its middle
/// with an ellipsis
pub fn truncate_middle(text: &str, max_chars: usize) -> String {
    let len = text.chars().count();
    if len <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let keep = max_chars - 1;
    let head = keep.div_ceil(2);
    let tail = keep - head;

    let mut out: String = text.chars().take(head).collect();
    out.push(ELLIPSIS);
    out.extend(text.chars().skip(len - tail));
    out
}

/// Message posted by the toolbar page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ToolbarCommand {
    GoBack,
    GoForward,
    Home,
    /// Mouse down on empty toolbar space
    DragWindow,
    /// Page loaded and ready for its first model
    Ready,
}

impl ToolbarCommand {
    pub fn parse(body: &str) -> ShellResult<Self> {
        serde_json::from_str(body)
            .map_err(|e| ShellError::ipc(format!("bad toolbar message {:?}: {}", body, e)))
    }
}
