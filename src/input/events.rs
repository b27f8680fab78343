use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Input events the map canvas and the search box react to.
///
/// Positions are container-relative pixels, the same space
/// [`crate::core::viewport::Viewport::lat_lng_to_pixel`] produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Single click/tap
    Click { position: Point },
    /// Drag in progress
    Drag { delta: Point },
    /// Scroll wheel or pinch zoom, positive zooms in
    Scroll { delta: f64, position: Point },
    /// Keyboard input
    KeyPress { key: KeyCode },
    /// Canvas resize
    Resize { size: Point },
}

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Plus,
    Minus,
}
