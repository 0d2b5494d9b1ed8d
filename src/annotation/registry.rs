//! Fixed set of anatomical annotations, validated once at startup.
//!
//! Registries are configuration data: a TOML file of `[[annotation]]`
//! tables. The built-in eye registry is embedded from
//! `assets/annotations/eye.toml`.

use std::path::Path;

use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::EyeViewError;

const EYE_REGISTRY_TOML: &str =
    include_str!("../../assets/annotations/eye.toml");

/// One labeled anatomical feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Stable unique key (e.g. `"cornea"`).
    pub id: String,
    /// Navigation sequence position; also shown as the pin number.
    pub order: u32,
    /// Display title.
    pub title: String,
    /// One-line display description.
    pub description: String,
    /// Model-space point where the marker is drawn.
    pub anchor: Vec3,
    /// Point the camera flies to when this annotation is activated.
    pub camera_target: Vec3,
}

#[derive(Deserialize)]
struct RegistryFile {
    #[serde(rename = "annotation", default)]
    annotations: Vec<Annotation>,
}

/// Immutable, validated annotation set sorted by `order`.
#[derive(Debug, Clone, Default)]
pub struct AnnotationRegistry {
    /// Annotations sorted by `order` ascending.
    annotations: Vec<Annotation>,
    /// id → index into `annotations`.
    by_id: FxHashMap<String, usize>,
}

impl AnnotationRegistry {
    /// Validate and index a set of annotations.
    ///
    /// # Errors
    ///
    /// Returns [`EyeViewError::Configuration`] on an empty id, a duplicate
    /// id, or a duplicate `order` value.
    pub fn new(mut annotations: Vec<Annotation>) -> Result<Self, EyeViewError> {
        let mut orders = FxHashSet::default();
        for a in &annotations {
            if a.id.trim().is_empty() {
                return Err(EyeViewError::Configuration(format!(
                    "annotation {:?} has an empty id",
                    a.title
                )));
            }
            if !orders.insert(a.order) {
                return Err(EyeViewError::Configuration(format!(
                    "duplicate order {} (annotation {:?})",
                    a.order, a.id
                )));
            }
        }

        annotations.sort_by_key(|a| a.order);

        let mut by_id = FxHashMap::default();
        for (i, a) in annotations.iter().enumerate() {
            if by_id.insert(a.id.clone(), i).is_some() {
                return Err(EyeViewError::Configuration(format!(
                    "duplicate annotation id {:?}",
                    a.id
                )));
            }
        }

        Ok(Self {
            annotations,
            by_id,
        })
    }

    /// Parse a registry from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`EyeViewError::Configuration`] if the text is not a valid
    /// registry or fails validation.
    pub fn from_toml_str(text: &str) -> Result<Self, EyeViewError> {
        let file: RegistryFile = toml::from_str(text)
            .map_err(|e| EyeViewError::Configuration(e.to_string()))?;
        Self::new(file.annotations)
    }

    /// Load a registry from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`EyeViewError::Io`] if the file cannot be read, otherwise
    /// see [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, EyeViewError> {
        let content = std::fs::read_to_string(path)?;
        let registry = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded {} annotations from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// The built-in eye registry.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data is invalid.
    pub fn eye() -> Result<Self, EyeViewError> {
        Self::from_toml_str(EYE_REGISTRY_TOML)
    }

    /// Look up an annotation by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.by_id.get(id).map(|&i| &self.annotations[i])
    }

    /// Position of `id` in the ordered sequence.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Annotation at a position in the ordered sequence.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Annotation> {
        self.annotations.get(index)
    }

    /// All annotations sorted by `order` ascending.
    #[must_use]
    pub fn ordered(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of annotations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Whether the registry holds no annotations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn test_annotation(id: &str, order: u32) -> Annotation {
    Annotation {
        id: id.into(),
        order,
        title: id.to_uppercase(),
        description: format!("{id} description"),
        anchor: Vec3::new(order as f32, 0.0, 0.0),
        camera_target: Vec3::new(order as f32, 5.0, 10.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_by_order() {
        let registry = AnnotationRegistry::new(vec![
            test_annotation("c", 3),
            test_annotation("a", 1),
            test_annotation("b", 2),
        ])
        .unwrap();
        let ids: Vec<&str> =
            registry.ordered().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(registry.index_of("c"), Some(2));
        assert_eq!(registry.get("b").unwrap().order, 2);
    }

    #[test]
    fn test_rejects_duplicate_order() {
        let err = AnnotationRegistry::new(vec![
            test_annotation("retina", 6),
            test_annotation("choroid", 6),
        ])
        .unwrap_err();
        assert!(matches!(err, EyeViewError::Configuration(_)));
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let err = AnnotationRegistry::new(vec![
            test_annotation("lens", 1),
            test_annotation("lens", 2),
        ])
        .unwrap_err();
        assert!(matches!(err, EyeViewError::Configuration(_)));
    }

    #[test]
    fn test_rejects_empty_id() {
        let err = AnnotationRegistry::new(vec![test_annotation(" ", 1)])
            .unwrap_err();
        assert!(matches!(err, EyeViewError::Configuration(_)));
    }

    #[test]
    fn test_builtin_eye_registry() {
        let registry = AnnotationRegistry::eye().unwrap();
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.ordered()[0].id, "cornea");
        assert_eq!(registry.ordered()[7].id, "optic-nerve");
        let lens = registry.get("lens").unwrap();
        assert_eq!(lens.anchor, Vec3::new(1.0, 2.4, 3.2));
        assert_eq!(lens.camera_target, Vec3::new(-2.0, 4.0, 5.0));
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let err = AnnotationRegistry::from_toml_str("[[annotation]]\nid = 3")
            .unwrap_err();
        assert!(matches!(err, EyeViewError::Configuration(_)));
    }

    #[test]
    fn test_empty_file_is_empty_registry() {
        let registry = AnnotationRegistry::from_toml_str("").unwrap();
        assert!(registry.is_empty());
        assert!(registry.at(0).is_none());
    }
}
