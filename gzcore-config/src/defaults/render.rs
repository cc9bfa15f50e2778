//! Default values for render and viewport settings.

pub fn screen_blocks() -> i32 {
    10 // Full-size scene, no status-bar inset
}

pub fn scale_viewport() -> bool {
    true
}

pub fn fullscreen() -> bool {
    false
}
