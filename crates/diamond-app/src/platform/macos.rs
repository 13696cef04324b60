//! macOS window styling

use tao::platform::macos::WindowExtMacOS;
use tao::window::Window;

pub fn set_titlebar_transparent(window: &Window, transparent: bool) {
    window.set_titlebar_transparent(transparent);
    // Content stays below the title bar.
    window.set_fullsize_content_view(false);
}
