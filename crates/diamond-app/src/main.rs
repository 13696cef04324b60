//! Diamond - Main Application Entry Point
//!
//! A single window with two child webviews:
//! - Toolbar WebView: back / forward / home and the current URL
//! - Content WebView: the page itself, below the toolbar

mod ipc;
mod platform;
mod shell;
mod webview;

use anyhow::Context;
use diamond_core::{ShellConfig, ShellError, SurfaceEvent, ToolbarCommand};
use platform::MainWindow;
use shell::Shell;
use tao::{
    dpi::LogicalSize,
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::WindowBuilder,
};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Events delivered to the UI thread through the event loop proxy
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// Something the content engine reported
    Surface(SurfaceEvent),
    /// A toolbar control was used
    Toolbar(ToolbarCommand),
    /// Window chrome could not be applied yet; try again
    ChromeRetry,
}

fn init_logging() -> anyhow::Result<()> {
    // Forward `log` records from diamond-core
    tracing_log::LogTracer::init()?;
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let config = ShellConfig::default();
    config.validate().context("invalid shell configuration")?;
    info!("WebView engine: {}", platform::engine_name());

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(LogicalSize::new(
            config.initial_size.width,
            config.initial_size.height,
        ))
        .with_min_inner_size(LogicalSize::new(config.min_size.width, config.min_size.height))
        .build(&event_loop)
        .map_err(|e| ShellError::window(e.to_string()))
        .context("failed to create window")?;
    info!("Window created successfully");

    let mut shell = Shell::new(config, MainWindow::new(window), proxy)
        .context("failed to create webviews")?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => shell.layout(),
            Event::WindowEvent {
                event: WindowEvent::Resized(_) | WindowEvent::Focused(true),
                ..
            } => shell.layout(),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Window closed");
                shell.shutdown();
                *control_flow = ControlFlow::Exit;
            }
            Event::UserEvent(UserEvent::Surface(event)) => shell.handle_surface(event),
            Event::UserEvent(UserEvent::Toolbar(command)) => shell.handle_toolbar(command),
            Event::UserEvent(UserEvent::ChromeRetry) => shell.retry_chrome(),
            _ => {}
        }
    })
}

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting Diamond...");
    if let Err(e) = run() {
        error!("Diamond failed to start: {:#}", e);
        std::process::exit(1);
    }
}
