use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection parameters and the pose used before any model loads.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 110.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Initial near clipping plane distance (replaced on model load).
    #[schemars(skip)]
    pub znear: f32,
    /// Initial far clipping plane distance (replaced on model load).
    #[schemars(skip)]
    pub zfar: f32,
    /// Eye position before any model is framed.
    #[schemars(skip)]
    pub initial_eye: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.01,
            zfar: 100_000.0,
            initial_eye: [0.0, 0.0, 10.0],
        }
    }
}
