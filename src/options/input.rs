use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Pointer gesture thresholds.
pub struct InputOptions {
    /// Maximum gap between two clicks that form a double-click.
    #[schemars(title = "Double-Click Window (ms)", range(min = 100, max = 1000))]
    pub double_click_ms: u64,
    /// Pointer travel (pixels) beyond which a press becomes a drag.
    #[schemars(skip)]
    pub click_slop_px: f32,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            double_click_ms: 400,
            click_slop_px: 5.0,
        }
    }
}
