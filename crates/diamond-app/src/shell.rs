//! Application root view
//!
//! Owns the window, the toolbar webview and the surface binding for the
//! content webview. Every method runs on the event loop thread; wry callbacks
//! only forward [`UserEvent`]s here through the proxy.

use crate::ipc::{PageMessage, PAGE_BRIDGE};
use crate::platform::MainWindow;
use crate::webview::{eval_script, set_webview_bounds, split_layout, ContentView};
use crate::UserEvent;
use diamond_core::{
    ChromeController, ChromeStatus, ShellConfig, ShellError, ShellResult, SharedUiState,
    SurfaceBinding, SurfaceEvent, ToolbarCommand, ToolbarModel, UiState,
};
use tao::event_loop::EventLoopProxy;
use tracing::{debug, info, warn};
use wry::{PageLoadEvent, WebView, WebViewBuilder};

const TOOLBAR_HTML: &str = include_str!("ui/toolbar.html");

pub struct Shell {
    config: ShellConfig,
    ui: SharedUiState,
    window: MainWindow,
    toolbar: WebView,
    binding: SurfaceBinding<ContentView>,
    chrome: ChromeController<MainWindow>,
    rendered: Option<ToolbarModel>,
    proxy: EventLoopProxy<UserEvent>,
}

impl Shell {
    /// Create both webviews and start loading the home page
    pub fn new(
        config: ShellConfig,
        window: MainWindow,
        proxy: EventLoopProxy<UserEvent>,
    ) -> ShellResult<Self> {
        let (width, height) = window.logical_size();
        let (toolbar_bounds, content_bounds) = split_layout(width, height, config.toolbar_height);

        let content = WebViewBuilder::new()
            .with_bounds(content_bounds.to_rect())
            .with_background_color(config.background.to_tuple())
            .with_devtools(config.devtools)
            .with_initialization_script(PAGE_BRIDGE)
            .with_on_page_load_handler({
                let proxy = proxy.clone();
                move |event, url| {
                    let event = match event {
                        PageLoadEvent::Started => SurfaceEvent::NavigationStarted(url),
                        PageLoadEvent::Finished => SurfaceEvent::NavigationFinished(url),
                    };
                    let _ = proxy.send_event(UserEvent::Surface(event));
                }
            })
            .with_document_title_changed_handler({
                let proxy = proxy.clone();
                move |title| {
                    let _ = proxy.send_event(UserEvent::Surface(SurfaceEvent::TitleChanged(title)));
                }
            })
            .with_ipc_handler({
                let proxy = proxy.clone();
                move |message| match PageMessage::parse(message.body()) {
                    Ok(msg) => {
                        let _ = proxy.send_event(UserEvent::Surface(msg.into()));
                    }
                    Err(e) => debug!("Dropping content IPC: {}", e),
                }
            })
            .build_as_child(window.window())
            .map_err(|e| ShellError::webview(format!("content view: {}", e)))?;

        let toolbar = WebViewBuilder::new()
            .with_html(TOOLBAR_HTML)
            .with_bounds(toolbar_bounds.to_rect())
            .with_background_color(config.background.to_tuple())
            .with_devtools(config.devtools)
            .with_ipc_handler({
                let proxy = proxy.clone();
                move |message| match ToolbarCommand::parse(message.body()) {
                    Ok(command) => {
                        let _ = proxy.send_event(UserEvent::Toolbar(command));
                    }
                    Err(e) => warn!("{}", e),
                }
            })
            .build_as_child(window.window())
            .map_err(|e| ShellError::webview(format!("toolbar view: {}", e)))?;

        info!("Webviews created");

        let ui = UiState::shared();
        let binding = SurfaceBinding::attach(
            ContentView::new(content, proxy.clone()),
            &config.home_url,
            &ui,
        );
        let chrome = ChromeController::new(config.background).with_setup(|window: &MainWindow| {
            window.window().set_focus();
        });

        Ok(Self {
            config,
            ui,
            window,
            toolbar,
            binding,
            chrome,
            rendered: None,
            proxy,
        })
    }

    /// Layout pass: resize the webviews and give the chrome controller a go.
    /// Runs on start, resize and focus.
    pub fn layout(&mut self) {
        let (width, height) = self.window.logical_size();
        let (toolbar, content) = split_layout(width, height, self.config.toolbar_height);
        set_webview_bounds(&self.toolbar, toolbar);
        set_webview_bounds(self.binding.surface().webview(), content);

        self.apply_chrome();
        self.refresh();
    }

    /// Scheduled re-attempt after the window was not ready
    pub fn retry_chrome(&mut self) {
        self.apply_chrome();
        self.refresh();
    }

    pub fn handle_surface(&mut self, event: SurfaceEvent) {
        self.binding.handle(event);
        self.refresh();
    }

    pub fn handle_toolbar(&mut self, command: ToolbarCommand) {
        match command {
            ToolbarCommand::GoBack => {
                self.binding.go_back();
            }
            ToolbarCommand::GoForward => {
                self.binding.go_forward();
            }
            ToolbarCommand::Home => {
                self.binding.reload(&self.config.home_url);
            }
            ToolbarCommand::DragWindow => {
                if self.chrome.allows_drag() {
                    self.window.begin_drag();
                }
            }
            ToolbarCommand::Ready => {
                debug!("Toolbar ready");
                self.rendered = None;
            }
        }
        self.refresh();
    }

    /// Release the surface observations and stop chrome polling
    pub fn shutdown(&mut self) {
        self.binding.dispose();
        self.chrome.dispose();
    }

    fn apply_chrome(&mut self) {
        match self.chrome.on_layout(Some(&self.window), &self.ui.borrow()) {
            ChromeStatus::Retry => {
                let _ = self.proxy.send_event(UserEvent::ChromeRetry);
            }
            ChromeStatus::Deferred => debug!("Window chrome deferred until next resize or focus"),
            ChromeStatus::Applied | ChromeStatus::AlreadyApplied | ChromeStatus::Disposed => {}
        }
    }

    /// Push UI state to the window title and the toolbar, if changed
    fn refresh(&mut self) {
        let ui = self.ui.borrow();
        self.chrome.sync_title(&self.window, &ui);

        let (width, _) = self.window.logical_size();
        let model = ToolbarModel::from_state(&ui, width);
        if self.rendered.as_ref() == Some(&model) {
            return;
        }
        match model.render_script() {
            Ok(script) => eval_script(&self.toolbar, &script),
            Err(e) => warn!("Failed to render toolbar: {}", e),
        }
        self.rendered = Some(model);
    }
}
