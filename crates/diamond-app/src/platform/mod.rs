//! Platform layer for the main window
//!
//! Wraps the tao window so the chrome controller can style it, with the
//! parts that only some platforms support split into per-OS modules.

#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(target_os = "macos"))]
mod other;

#[cfg(target_os = "macos")]
use macos as imp;
#[cfg(not(target_os = "macos"))]
use other as imp;

use diamond_core::{ChromeWindow, Rgba};
use tao::window::Window;
use tracing::{debug, warn};

/// The single application window
pub struct MainWindow {
    window: Window,
}

impl MainWindow {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Window content size in logical pixels
    pub fn logical_size(&self) -> (f64, f64) {
        let scale = self.window.scale_factor();
        let size = self.window.inner_size();
        (size.width as f64 / scale, size.height as f64 / scale)
    }

    /// Start moving the window with the mouse; only valid while a button is down
    pub fn begin_drag(&self) {
        if let Err(e) = self.window.drag_window() {
            warn!("Window drag refused: {}", e);
        }
    }
}

impl ChromeWindow for MainWindow {
    fn is_mounted(&self) -> bool {
        let size = self.window.inner_size();
        self.window.is_visible() && size.width > 0 && size.height > 0
    }

    fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    fn set_titlebar_transparent(&self, transparent: bool) {
        imp::set_titlebar_transparent(&self.window, transparent);
    }

    fn set_background(&self, color: Rgba) {
        debug!("Window background {:?}", color);
        self.window.set_background_color(Some(color.to_tuple()));
    }
}

/// Human readable name of the system webview in use
pub fn engine_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "WebView2"
    } else if cfg!(target_os = "macos") {
        "WKWebView"
    } else {
        "WebKitGTK"
    }
}
