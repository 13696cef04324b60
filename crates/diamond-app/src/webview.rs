//! WebView helpers for Diamond
//!
//! [`ContentView`] adapts the content `wry::WebView` to the
//! [`WebSurface`] seam of the surface binding. Engine answers that arrive on
//! other threads are sent back through the event loop proxy, never applied
//! in place.

use crate::UserEvent;
use diamond_core::{SurfaceEvent, WebSurface};
use tao::event_loop::EventLoopProxy;
use tracing::{debug, warn};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{Rect, WebView};

/// Logical-pixel rectangle of a child webview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn to_rect(self) -> Rect {
        Rect {
            position: LogicalPosition::new(self.x, self.y).into(),
            size: LogicalSize::new(self.width, self.height).into(),
        }
    }
}

/// Toolbar strip on top, content filling the rest
pub fn split_layout(width: f64, height: f64, toolbar_height: f64) -> (Bounds, Bounds) {
    let width = width.max(0.0);
    let toolbar_height = toolbar_height.min(height).max(0.0);
    let toolbar = Bounds {
        x: 0.0,
        y: 0.0,
        width,
        height: toolbar_height,
    };
    let content = Bounds {
        x: 0.0,
        y: toolbar_height,
        width,
        height: (height - toolbar_height).max(0.0),
    };
    (toolbar, content)
}

/// Fire-and-forget script evaluation
pub fn eval_script(webview: &WebView, script: &str) {
    if let Err(e) = webview.evaluate_script(script) {
        warn!("Script evaluation failed: {}", e);
    }
}

/// Set bounds, logging failures
pub fn set_webview_bounds(webview: &WebView, bounds: Bounds) {
    if let Err(e) = webview.set_bounds(bounds.to_rect()) {
        warn!("Failed to set webview bounds: {}", e);
    }
}

/// The content webview as seen by the surface binding
pub struct ContentView {
    webview: WebView,
    proxy: EventLoopProxy<UserEvent>,
}

impl ContentView {
    pub fn new(webview: WebView, proxy: EventLoopProxy<UserEvent>) -> Self {
        Self { webview, proxy }
    }

    pub fn webview(&self) -> &WebView {
        &self.webview
    }
}

impl WebSurface for ContentView {
    fn load_url(&self, url: &str) {
        if let Err(e) = self.webview.load_url(url) {
            warn!("Failed to load {}: {}", url, e);
        }
    }

    fn go_back(&self) {
        eval_script(&self.webview, "history.back();");
    }

    fn go_forward(&self) {
        eval_script(&self.webview, "history.forward();");
    }

    fn current_url(&self) -> Option<String> {
        self.webview.url().ok()
    }

    fn request_title(&self) {
        let proxy = self.proxy.clone();
        let result = self
            .webview
            .evaluate_script_with_callback("document.title", move |result| {
                // The engine hands back the value JSON encoded.
                match serde_json::from_str::<String>(&result) {
                    Ok(title) => {
                        let _ = proxy.send_event(UserEvent::Surface(SurfaceEvent::TitleReported(title)));
                    }
                    Err(_) => debug!("Unexpected document.title result {:?}", result),
                }
            });
        if let Err(e) = result {
            warn!("Failed to query document title: {}", e);
        }
    }
}
