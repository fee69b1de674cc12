//! Status markers for CLI output.

/// Status icons
pub struct Icons;

impl Icons {
    pub const CHECK: &'static str = "✓";
    pub const CROSS: &'static str = "✗";
    pub const WARNING: &'static str = "⚠";
    pub const ARROW: &'static str = "→";
    pub const BULLET: &'static str = "•";
    pub const PENDING: &'static str = "○";
}
