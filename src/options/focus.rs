use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;

/// Smallest accepted framing floor; keeps the eye off the target.
const MIN_DISTANCE_FLOOR: f32 = 1e-4;

/// What a re-focus does to an already recorded pre-focus view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HistoryPolicy {
    /// Keep the view from before the first focus; any number of re-focuses
    /// return to the unfocused view in one step.
    #[default]
    PreserveOriginal,
    /// Overwrite on every focus; cancelling returns to the previously
    /// focused view.
    StepBack,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Focus", inline)]
#[serde(default)]
/// Framing margins and pick-and-focus animation parameters.
pub struct FocusOptions {
    /// Margin over the FOV fit when framing a freshly loaded model.
    #[schemars(title = "Load Margin", range(min = 1.0, max = 4.0), extend("step" = 0.05))]
    pub load_margin: f32,
    /// Margin over the FOV fit and raw extent when focusing a sub-object.
    #[schemars(title = "Focus Margin", range(min = 1.0, max = 4.0), extend("step" = 0.05))]
    pub focus_margin: f32,
    /// Floor for every framing distance so zero-size geometry never puts
    /// the camera on its target.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Length of the move onto a picked sub-object, in milliseconds.
    #[schemars(title = "Focus Duration (ms)", range(min = 0, max = 5000))]
    pub focus_duration_ms: u64,
    /// Length of the move back to the pre-focus view, in milliseconds.
    #[schemars(title = "Return Duration (ms)", range(min = 0, max = 5000))]
    pub return_duration_ms: u64,
    /// Easing curve for both moves.
    pub easing: EasingFunction,
    /// Re-focus behavior of the one-slot focus history.
    pub history_policy: HistoryPolicy,
    /// Outline color of the selection highlight.
    #[schemars(skip)]
    pub highlight_color: [f32; 3],
}

impl FocusOptions {
    /// Pull out-of-range values back into range: margins below `1` would
    /// crop the framed object, and a non-positive floor lets zero-size
    /// geometry collapse the camera onto its target.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.load_margin = self.load_margin.max(1.0);
        self.focus_margin = self.focus_margin.max(1.0);
        self.min_distance = self.min_distance.max(MIN_DISTANCE_FLOOR);
        self
    }
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            load_margin: 1.5,
            focus_margin: 1.2,
            min_distance: 0.2,
            focus_duration_ms: 600,
            return_duration_ms: 500,
            easing: EasingFunction::QuadraticInOut,
            history_policy: HistoryPolicy::PreserveOriginal,
            highlight_color: [1.0, 0.0, 0.0],
        }
    }
}
