//! Embedded web surface binding
//!
//! Connects the content webview to the UI state. The engine reports what it
//! is doing as [`SurfaceEvent`]s (already marshaled onto the UI thread by the
//! app); the binding republishes them as property changes, and the
//! observations it registered at attach time write them into [`UiState`].
//! Toolbar commands go the other way through the [`WebSurface`] seam.
//!
//! [`UiState`]: crate::types::UiState

use crate::history::{is_placeholder, NavigationHistory, Traversal};
use crate::observe::{Observation, Property, PropertyRegistry, PropertyValue};
use crate::types::SharedUiState;
use log::{debug, info};
use std::rc::Rc;

/// Operations the shell needs from the web engine
///
/// Implemented by the app for `wry::WebView`. Calls are fire-and-forget;
/// engine failures are logged by the implementation.
pub trait WebSurface {
    /// Start a fresh navigation
    fn load_url(&self, url: &str);

    /// Traverse one entry back in the engine's history
    fn go_back(&self);

    /// Traverse one entry forward in the engine's history
    fn go_forward(&self);

    /// URL of the committed document, if the engine can tell synchronously
    fn current_url(&self) -> Option<String>;

    /// Ask for the document title; the answer arrives later as
    /// [`SurfaceEvent::TitleReported`]
    fn request_title(&self);
}

/// Something the engine reported about the content surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    NavigationStarted(String),
    /// Coarse completion signal, used to re-read title and URL
    NavigationFinished(String),
    /// Title callback from the engine, possibly mid-navigation
    TitleChanged(String),
    /// `document.title` of the loaded document, read after completion
    TitleReported(String),
    /// Same-document navigation (history API, fragment)
    LocationChanged(String),
    /// Engine-native back/forward availability
    HistoryReported {
        can_go_back: bool,
        can_go_forward: bool,
    },
}

/// Owns the content surface and keeps the UI state in sync with it
pub struct SurfaceBinding<S: WebSurface> {
    surface: S,
    properties: PropertyRegistry,
    history: NavigationHistory,
    observations: Vec<Observation>,
    target_url: String,
    engine_history: bool,
    disposed: bool,
}

impl<S: WebSurface> SurfaceBinding<S> {
    /// Bind `surface` to `ui` and start loading `home_url`
    pub fn attach(surface: S, home_url: &str, ui: &SharedUiState) -> Self {
        let properties = PropertyRegistry::new();
        let observations = observe_into(&properties, ui);

        let mut binding = Self {
            surface,
            properties,
            history: NavigationHistory::new(),
            observations,
            target_url: home_url.to_string(),
            engine_history: false,
            disposed: false,
        };

        info!("Loading home page {}", home_url);
        binding.surface.load_url(home_url);
        binding.publish_history();
        binding
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn properties(&self) -> &PropertyRegistry {
        &self.properties
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Apply an engine event
    pub fn handle(&mut self, event: SurfaceEvent) {
        if self.disposed {
            debug!("Ignoring {:?} after dispose", event);
            return;
        }

        match event {
            SurfaceEvent::NavigationStarted(url) => {
                self.history.commit(&url);
                self.publish_url(&url);
                self.publish_history();
            }
            SurfaceEvent::NavigationFinished(url) => {
                let url = self.surface.current_url().unwrap_or(url);
                // Redirects land on a different URL than the one started.
                self.history.replace_current(&url);
                self.publish_url(&url);
                self.publish_history();
                self.surface.request_title();
            }
            SurfaceEvent::TitleChanged(title) => {
                // Engines report an empty title while the next document loads.
                let title = title.trim();
                if !title.is_empty() {
                    self.properties
                        .publish(Property::Title, PropertyValue::text(title));
                }
            }
            SurfaceEvent::TitleReported(title) => {
                self.properties
                    .publish(Property::Title, PropertyValue::text(title.trim()));
            }
            SurfaceEvent::LocationChanged(url) => {
                self.publish_url(&url);
            }
            SurfaceEvent::HistoryReported {
                can_go_back,
                can_go_forward,
            } => {
                if !self.engine_history {
                    debug!("Engine reports its own history state");
                    self.engine_history = true;
                }
                self.publish_flags(can_go_back, can_go_forward);
            }
        }
    }

    /// Go back one entry. No-op unless back is available.
    pub fn go_back(&mut self) -> bool {
        if self.disposed || !self.flag(Property::CanGoBack) {
            debug!("Back requested with no history");
            return false;
        }
        self.history.begin_traversal(Traversal::Back);
        self.surface.go_back();
        true
    }

    /// Go forward one entry. No-op unless forward is available.
    pub fn go_forward(&mut self) -> bool {
        if self.disposed || !self.flag(Property::CanGoForward) {
            debug!("Forward requested with no history");
            return false;
        }
        self.history.begin_traversal(Traversal::Forward);
        self.surface.go_forward();
        true
    }

    /// Start a fresh navigation to `url`, whatever the current state
    pub fn reload(&mut self, url: &str) -> bool {
        if self.disposed {
            return false;
        }
        info!("Navigating to {}", url);
        self.history.cancel_traversal();
        self.surface.load_url(url);
        true
    }

    /// The URL this binding was declared with
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Update the declared target URL.
    ///
    /// Does not navigate: the loaded page only changes through toolbar
    /// commands or the page itself.
    pub fn set_target_url(&mut self, url: &str) {
        if self.target_url != url {
            info!("Target URL set to {}; current page left as is", url);
            self.target_url = url.to_string();
        }
    }

    /// Release all observations. Later events are ignored.
    pub fn dispose(&mut self) {
        if !self.disposed {
            debug!("Disposing surface binding ({} observations)", self.observations.len());
        }
        self.observations.clear();
        self.disposed = true;
    }

    fn flag(&self, property: Property) -> bool {
        self.properties
            .get(property)
            .and_then(|value| value.as_flag())
            .unwrap_or(false)
    }

    fn publish_url(&self, url: &str) {
        if is_placeholder(url) {
            return;
        }
        self.properties.publish(Property::Url, PropertyValue::text(url));
    }

    fn publish_history(&self) {
        if self.engine_history {
            return;
        }
        self.publish_flags(self.history.can_go_back(), self.history.can_go_forward());
    }

    fn publish_flags(&self, can_go_back: bool, can_go_forward: bool) {
        self.properties
            .publish(Property::CanGoBack, PropertyValue::Flag(can_go_back));
        self.properties
            .publish(Property::CanGoForward, PropertyValue::Flag(can_go_forward));
    }
}

impl<S: WebSurface> Drop for SurfaceBinding<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// One observation per property, each writing its UI scalar
fn observe_into(properties: &PropertyRegistry, ui: &SharedUiState) -> Vec<Observation> {
    Property::ALL
        .into_iter()
        .map(|property| {
            let ui = Rc::clone(ui);
            properties.observe(property, move |value| {
                let mut ui = ui.borrow_mut();
                match (property, value) {
                    (Property::CanGoBack, PropertyValue::Flag(flag)) => {
                        ui.set_can_go_back(*flag);
                    }
                    (Property::CanGoForward, PropertyValue::Flag(flag)) => {
                        ui.set_can_go_forward(*flag);
                    }
                    (Property::Title, PropertyValue::Text(title)) => {
                        ui.set_page_title(title);
                    }
                    (Property::Url, PropertyValue::Text(url)) => {
                        ui.set_page_url(url);
                    }
                    (property, value) => {
                        debug!("Mistyped value {:?} for {}", value, property);
                    }
                }
            })
        })
        .collect()
}
