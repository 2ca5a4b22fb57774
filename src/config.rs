/// Configuration constants for the blockfield UI shell

/// UI Layout Constants
pub mod layout {
    pub const PANEL_X: u16 = 1;
    pub const PANEL_Y: u16 = 1;
    pub const PANEL_WIDTH: u16 = 36;
    pub const PANEL_LABEL_WIDTH: usize = 24;
}

/// Timing and Performance Constants
pub mod timing {
    pub const FRAME_TIME_MS: u128 = 33; // ~30 FPS cap for full-surface blits
    pub const INPUT_POLL_MS: u64 = 10; // Event poll timeout, bounds tick latency
}

/// Adjustment steps for panel fields
pub mod steps {
    pub const CHANNEL_STEP: i64 = 1;
    pub const ALPHA_STEP: f64 = 0.05;
    pub const INTERVAL_STEP_MS: u64 = 100;
}
