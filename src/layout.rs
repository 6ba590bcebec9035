// Layout constants for One Hand

// --- Document markers ---
pub const FOCUS_CLASS: &str = "ohn-focus";
pub const OVERLAY_CLASS: &str = "ohn-overlay";
pub const LABEL_CLASS: &str = "ohn-label";
pub const ENABLED_FLAG_NAME: &str = "__oneHandNavEnabled";

// --- Overlay buttons, in panel order ---
pub const PREV_LABEL: &str = "◀ Prev";
pub const NEXT_LABEL: &str = "Next ▶";
pub const CLICK_LABEL: &str = "Click ✅";
pub const EXIT_LABEL: &str = "Exit ✖";

// --- Sizing ---
pub const OVERLAY_MARGIN: f32 = 12.0;
pub const OVERLAY_ROUNDING: f32 = 8.0;
pub const OVERLAY_PADDING: f32 = 8.0;
pub const PAGE_MAX_WIDTH: f32 = 760.0;
pub const NODE_SPACING: f32 = 6.0;
pub const LOG_PANEL_DEFAULT: f32 = 260.0;
pub const LOG_ROW_HEIGHT: f32 = 20.0;
pub const LOG_CAPACITY: usize = 200;

// --- Timing ---
pub const MESSAGE_TIMEOUT_SECS: u64 = 5;
