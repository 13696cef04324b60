//! Diamond Core Library
//!
//! Toolkit-independent pieces of the Diamond shell: the observed page state,
//! the surface binding that keeps it in sync with the web engine, the window
//! chrome controller and the toolbar view model.

pub mod binding;
pub mod chrome;
pub mod config;
pub mod error;
pub mod history;
pub mod observe;
pub mod toolbar;
pub mod types;

pub use binding::{SurfaceBinding, SurfaceEvent, WebSurface};
pub use chrome::{ChromeController, ChromeStatus, ChromeWindow};
pub use config::{ShellConfig, HOME_URL};
pub use error::{ShellError, ShellResult};
pub use observe::{Observation, Property, PropertyRegistry, PropertyValue};
pub use toolbar::{ToolbarCommand, ToolbarModel};
pub use types::{Rgba, SharedUiState, UiState, WindowSize};
