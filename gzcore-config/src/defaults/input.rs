//! Default values for input dispatch settings.

pub fn double_click_ms() -> u32 {
    571
}
