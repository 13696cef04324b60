//! Common types used throughout Diamond

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Title shown until the first document reports its own
pub const LOADING_TITLE: &str = "Loading...";

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const BLACK: Rgba = Rgba(0, 0, 0, 255);

    /// Tuple form accepted by tao and wry
    pub fn to_tuple(self) -> (u8, u8, u8, u8) {
        (self.0, self.1, self.2, self.3)
    }
}

/// Window size in logical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

impl WindowSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True if both dimensions are at least those of `other`
    pub fn covers(&self, other: &WindowSize) -> bool {
        self.width >= other.width && self.height >= other.height
    }
}

/// The four scalars the window chrome and toolbar are bound to.
///
/// Only ever touched from the UI thread; [`SharedUiState`] is deliberately
/// `!Send`.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    page_title: String,
    page_url: String,
    can_go_back: bool,
    can_go_forward: bool,
    revision: u64,
}

/// Shared handle to the UI state
pub type SharedUiState = Rc<RefCell<UiState>>;

impl Default for UiState {
    fn default() -> Self {
        Self {
            page_title: LOADING_TITLE.to_string(),
            page_url: String::new(),
            can_go_back: false,
            can_go_forward: false,
            revision: 0,
        }
    }
}

impl UiState {
    pub fn shared() -> SharedUiState {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    pub fn can_go_forward(&self) -> bool {
        self.can_go_forward
    }

    /// Bumped on every effective change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_page_title(&mut self, title: &str) -> bool {
        if self.page_title == title {
            return false;
        }
        self.page_title = title.to_string();
        self.bump()
    }

    pub fn set_page_url(&mut self, url: &str) -> bool {
        if self.page_url == url {
            return false;
        }
        self.page_url = url.to_string();
        self.bump()
    }

    pub fn set_can_go_back(&mut self, value: bool) -> bool {
        if self.can_go_back == value {
            return false;
        }
        self.can_go_back = value;
        self.bump()
    }

    pub fn set_can_go_forward(&mut self, value: bool) -> bool {
        if self.can_go_forward == value {
            return false;
        }
        self.can_go_forward = value;
        self.bump()
    }

    fn bump(&mut self) -> bool {
        self.revision += 1;
        true
    }
}
