//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (display toggles, camera, flight timing,
//! condition effects, keybindings) are consolidated here. Options
//! serialize to/from TOML for presets stored in `assets/presets/`.

mod camera;
mod display;
mod effects;
mod flight;
mod keybindings;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use effects::EffectOptions;
pub use flight::FlightOptions;
pub use keybindings::KeybindingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::EyeViewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[flight]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Display toggles and label sizing.
    pub display: DisplayOptions,
    /// Camera projection and orbit parameters.
    pub camera: CameraOptions,
    /// Camera flight timing.
    pub flight: FlightOptions,
    /// Lens node and materials for condition overlays.
    #[schemars(skip)]
    pub effects: EffectOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EyeViewError::OptionsParse`] on malformed TOML.
    pub fn from_toml_str(text: &str) -> Result<Self, EyeViewError> {
        let mut options: Self = toml::from_str(text)
            .map_err(|e| EyeViewError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EyeViewError::Io`] or [`EyeViewError::OptionsParse`].
    pub fn load(path: &Path) -> Result<Self, EyeViewError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`EyeViewError::Io`] or [`EyeViewError::OptionsParse`].
    pub fn save(&self, path: &Path) -> Result<(), EyeViewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EyeViewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;
    use crate::util::easing::EasingFunction;

    #[test]
    fn test_default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
[flight]
duration_ms = 600
easing = "quadratic_out"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.flight.duration_ms, 600);
        assert_eq!(opts.flight.easing, EasingFunction::QuadraticOut);
        // Everything else should be default
        assert!(opts.display.show_annotations);
        assert_eq!(opts.camera.fovy, 34.0);
        assert_eq!(opts.effects.lens_node, "Lens_Lens_0");
    }

    #[test]
    fn test_keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("ArrowRight"),
            Some(KeyAction::NextAnnotation)
        );
        assert_eq!(
            opts.keybindings.lookup("ArrowLeft"),
            Some(KeyAction::PreviousAnnotation)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn test_rebinding_replaces_old_key() {
        let mut opts = Options::default();
        opts.keybindings.bind(KeyAction::NextAnnotation, "KeyN");
        assert_eq!(
            opts.keybindings.lookup("KeyN"),
            Some(KeyAction::NextAnnotation)
        );
        assert_eq!(opts.keybindings.lookup("ArrowRight"), None);
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Options::from_toml_str("[flight]\nduration_ms = \"slow\"")
            .unwrap_err();
        assert!(matches!(err, EyeViewError::OptionsParse(_)));
    }

    #[test]
    fn test_schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("display"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("flight"));

        // Skipped sections should be absent
        assert!(!props.contains_key("effects"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("initial_eye").is_none());
    }
}
