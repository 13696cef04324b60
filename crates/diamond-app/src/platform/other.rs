//! Windows and Linux window styling
//!
//! Native title bars there cannot be made see-through without dropping
//! decorations altogether, so the request is only logged.

use tao::window::Window;
use tracing::debug;

pub fn set_titlebar_transparent(_window: &Window, transparent: bool) {
    debug!("Transparent title bar ({}) not supported here", transparent);
}
