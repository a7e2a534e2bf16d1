//! Centralized viewer options with TOML preset support.
//!
//! Camera projection, orbit controls, framing/focus behavior, and input
//! thresholds are consolidated here. Options serialize to/from TOML so a
//! host can ship presets next to the viewer.

mod camera;
mod controls;
mod focus;
mod input;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlOptions;
pub use focus::{FocusOptions, HistoryPolicy};
pub use input::InputOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VitrineError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[focus]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Orbit controller parameters.
    pub controls: ControlOptions,
    /// Framing margins and focus animation parameters.
    pub focus: FocusOptions,
    /// Pointer gesture thresholds.
    #[schemars(skip)]
    pub input: InputOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Clamp values the viewer cannot honor (see
    /// [`FocusOptions::clamped`]).
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.focus = self.focus.clamped();
        self
    }

    /// Parse options from TOML text. Missing fields use defaults and
    /// out-of-range values are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::OptionsParse`] if the text is not valid
    /// options TOML.
    pub fn from_toml(content: &str) -> Result<Self, VitrineError> {
        toml::from_str::<Self>(content)
            .map(Self::clamped)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::Io`] if the file cannot be read, or
    /// [`VitrineError::OptionsParse`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        let content = std::fs::read_to_string(path).map_err(VitrineError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::Io`] if the file or its parent directory
    /// cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), VitrineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VitrineError::Io)?;
        }
        std::fs::write(path, content).map_err(VitrineError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[focus]
focus_duration_ms = 900
history_policy = "step_back"
easing = "linear"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.focus.focus_duration_ms, 900);
        assert_eq!(opts.focus.history_policy, HistoryPolicy::StepBack);
        assert_eq!(opts.focus.easing, EasingFunction::Linear);
        // Everything else should be default
        assert_eq!(opts.focus.return_duration_ms, 500);
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.controls.damping_factor, 0.05);
        assert_eq!(opts.input.double_click_ms, 400);
    }

    #[test]
    fn out_of_range_focus_values_are_clamped() {
        let opts = Options::from_toml(
            "[focus]\nmin_distance = 0.0\nload_margin = 0.5\nfocus_margin = -2.0",
        )
        .unwrap();
        assert!(opts.focus.min_distance > 0.0);
        assert_eq!(opts.focus.load_margin, 1.0);
        assert_eq!(opts.focus.focus_margin, 1.0);

        // In-range values pass through untouched.
        assert_eq!(Options::default().clamped(), Options::default());
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera]\nfovy = \"wide\"").unwrap_err();
        assert!(matches!(err, VitrineError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir().join(format!(
            "vitrine-options-{}",
            std::process::id()
        ));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.camera.fovy = 50.0;
        opts.focus.highlight_color = [0.0, 1.0, 0.0];
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("controls"));
        assert!(props.contains_key("focus"));
        // Skipped sections should be absent
        assert!(!props.contains_key("input"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("znear").is_none());
    }
}
