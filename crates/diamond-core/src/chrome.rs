//! Window chrome controller
//!
//! Styles the native window once it is mounted and keeps its title in step
//! with the page title. The window may not be usable on the first layout
//! pass; the controller then answers [`ChromeStatus::Retry`] and the caller
//! polls again on the next UI tick. Once [`RETRY_BUDGET`] polls have failed it
//! answers [`ChromeStatus::Deferred`] and waits for the next real layout pass.

use crate::types::{Rgba, UiState};
use log::{debug, info};

/// Back-to-back polls before falling back to layout-driven attempts
pub const RETRY_BUDGET: u32 = 20;

/// Window operations the chrome controller needs
pub trait ChromeWindow {
    /// Whether the native window is realized and can be styled
    fn is_mounted(&self) -> bool;

    fn set_title(&self, title: &str);

    /// Make the title bar see-through while content stays below it
    fn set_titlebar_transparent(&self, transparent: bool);

    fn set_background(&self, color: Rgba);
}

/// Outcome of [`ChromeController::on_layout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeStatus {
    /// Styling was applied by this call
    Applied,
    /// Window not available yet; call again next tick
    Retry,
    /// Window still not available and the poll budget is spent; call again
    /// on the next resize or focus
    Deferred,
    AlreadyApplied,
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Ready,
    Disposed,
}

type SetupCallback<W> = Box<dyn FnOnce(&W)>;

pub struct ChromeController<W: ChromeWindow> {
    phase: Phase,
    background: Rgba,
    setup: Option<SetupCallback<W>>,
    last_title: Option<String>,
    attempts: u32,
}

impl<W: ChromeWindow> ChromeController<W> {
    pub fn new(background: Rgba) -> Self {
        Self {
            phase: Phase::Waiting,
            background,
            setup: None,
            last_title: None,
            attempts: 0,
        }
    }

    /// Extra caller-side setup, run once with the window after styling
    pub fn with_setup(mut self, setup: impl FnOnce(&W) + 'static) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Layout pass. `window` is `None` while no window handle exists.
    pub fn on_layout(&mut self, window: Option<&W>, ui: &UiState) -> ChromeStatus {
        match self.phase {
            Phase::Disposed => return ChromeStatus::Disposed,
            Phase::Ready => return ChromeStatus::AlreadyApplied,
            Phase::Waiting => {}
        }

        self.attempts += 1;
        let window = match window {
            Some(window) if window.is_mounted() => window,
            _ if self.attempts >= RETRY_BUDGET => {
                debug!("Window not mounted after {} attempts; waiting for layout", self.attempts);
                return ChromeStatus::Deferred;
            }
            _ => {
                debug!("Window not mounted yet (attempt {})", self.attempts);
                return ChromeStatus::Retry;
            }
        };

        window.set_titlebar_transparent(true);
        window.set_background(self.background);
        self.phase = Phase::Ready;
        if let Some(setup) = self.setup.take() {
            setup(window);
        }
        info!("Window chrome applied after {} layout pass(es)", self.attempts);

        self.sync_title(window, ui);
        ChromeStatus::Applied
    }

    /// Push the page title to the window if it changed since the last push
    pub fn sync_title(&mut self, window: &W, ui: &UiState) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        let title = ui.page_title();
        if self.last_title.as_deref() == Some(title) {
            return false;
        }
        window.set_title(title);
        self.last_title = Some(title.to_string());
        true
    }

    pub fn is_applied(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Whether dragging the window background moves the window
    pub fn allows_drag(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Stop retrying and ignore further layout passes
    pub fn dispose(&mut self) {
        self.phase = Phase::Disposed;
        self.setup = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeWindow {
        mounted: Cell<bool>,
        title: RefCell<String>,
        title_pushes: Cell<u32>,
        transparent: Cell<bool>,
        background: Cell<Option<Rgba>>,
    }

    impl ChromeWindow for FakeWindow {
        fn is_mounted(&self) -> bool {
            self.mounted.get()
        }

        fn set_title(&self, title: &str) {
            *self.title.borrow_mut() = title.to_string();
            self.title_pushes.set(self.title_pushes.get() + 1);
        }

        fn set_titlebar_transparent(&self, transparent: bool) {
            self.transparent.set(transparent);
        }

        fn set_background(&self, color: Rgba) {
            self.background.set(Some(color));
        }
    }

    #[test]
    fn test_retries_until_window_available() {
        let mut chrome = ChromeController::<FakeWindow>::new(Rgba::BLACK);
        let ui = UiState::default();
        let window = FakeWindow::default();

        assert_eq!(chrome.on_layout(None, &ui), ChromeStatus::Retry);
        assert_eq!(chrome.on_layout(Some(&window), &ui), ChromeStatus::Retry);
        assert!(!chrome.allows_drag());

        window.mounted.set(true);
        assert_eq!(chrome.on_layout(Some(&window), &ui), ChromeStatus::Applied);
        assert!(window.transparent.get());
        assert_eq!(window.background.get(), Some(Rgba::BLACK));
        assert!(chrome.allows_drag());
        assert_eq!(*window.title.borrow(), "Loading...");
    }

    #[test]
    fn test_polling_stops_after_budget() {
        let mut chrome = ChromeController::<FakeWindow>::new(Rgba::BLACK);
        let ui = UiState::default();
        let window = FakeWindow::default();

        let retries = (0..RETRY_BUDGET * 2)
            .map(|_| chrome.on_layout(Some(&window), &ui))
            .take_while(|status| *status == ChromeStatus::Retry)
            .count();
        assert_eq!(retries as u32, RETRY_BUDGET - 1);
        assert_eq!(chrome.on_layout(Some(&window), &ui), ChromeStatus::Deferred);

        // A later layout pass still applies once the window shows up.
        window.mounted.set(true);
        assert_eq!(chrome.on_layout(Some(&window), &ui), ChromeStatus::Applied);
        assert!(chrome.is_applied());
    }

    #[test]
    fn test_setup_runs_exactly_once() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let mut chrome = ChromeController::<FakeWindow>::new(Rgba::BLACK)
            .with_setup(move |_| counter.set(counter.get() + 1));
        let ui = UiState::default();
        let window = FakeWindow::default();
        window.mounted.set(true);

        assert_eq!(chrome.on_layout(Some(&window), &ui), ChromeStatus::Applied);
        assert_eq!(chrome.on_layout(Some(&window), &ui), ChromeStatus::AlreadyApplied);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_title_follows_latest_page_title() {
        let mut chrome = ChromeController::<FakeWindow>::new(Rgba::BLACK);
        let mut ui = UiState::default();
        let window = FakeWindow::default();
        window.mounted.set(true);

        // Titles observed before setup are not pushed.
        ui.set_page_title("Early");
        assert!(!chrome.sync_title(&window, &ui));
        assert_eq!(window.title_pushes.get(), 0);

        chrome.on_layout(Some(&window), &ui);
        assert_eq!(*window.title.borrow(), "Early");

        ui.set_page_title("DiamondGotCat");
        assert!(chrome.sync_title(&window, &ui));
        assert!(!chrome.sync_title(&window, &ui));
        assert_eq!(*window.title.borrow(), "DiamondGotCat");
        assert_eq!(window.title_pushes.get(), 2);
    }

    #[test]
    fn test_dispose_stops_polling() {
        let mut chrome = ChromeController::<FakeWindow>::new(Rgba::BLACK);
        let ui = UiState::default();
        assert_eq!(chrome.on_layout(None, &ui), ChromeStatus::Retry);

        chrome.dispose();
        let window = FakeWindow::default();
        window.mounted.set(true);
        assert_eq!(chrome.on_layout(Some(&window), &ui), ChromeStatus::Disposed);
        assert!(window.background.get().is_none());
    }
}
