use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit Controls", inline)]
#[serde(default)]
/// Orbit controller sensitivity, damping, and the distance limits used
/// before a model provides its own.
pub struct ControlOptions {
    /// Fraction of pending orbit motion applied per frame (0 disables
    /// damping: motion is applied at once).
    #[schemars(title = "Damping", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub damping_factor: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub zoom_speed: f32,
    /// Default minimum orbit distance.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Default maximum orbit distance.
    #[schemars(skip)]
    pub max_distance: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.1,
            max_distance: 1000.0,
        }
    }
}
