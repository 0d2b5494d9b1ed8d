//! Visual effects for the active conditions.
//!
//! - cataract swaps the lens material,
//! - glaucoma shows eight pulsing pressure arrows around the globe,
//! - diabetic retinopathy shows ten pulsing blood spots on the retina.
//!
//! Marker animation is a pure function of the shared elapsed clock and
//! each marker's static definition, so markers never need per-frame
//! bookkeeping and can be evaluated in any order.

use std::f32::consts::PI;

use glam::Vec3;

use super::state::{ConditionId, ConditionState};
use crate::error::EyeViewError;
use crate::options::EffectOptions;
use crate::scene::{Material, SceneGraph};

/// What a [`MarkerInstance`] depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Extruded arrow pointing at the globe (glaucoma).
    PressureArrow,
    /// Small red sphere of radius [`BloodSpot::RADIUS`] (diabetic
    /// retinopathy).
    BloodSpot,
}

/// One decorative marker as it should be drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerInstance {
    /// Marker type.
    pub kind: MarkerKind,
    /// World-space position.
    pub position: Vec3,
    /// Euler rotation (XYZ, radians).
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Marker material; its opacity pulses each frame.
    pub material: Material,
}

fn marker_material(opacity: f32) -> Material {
    Material {
        opacity,
        ..Material::MARKER_RED
    }
}

// ---------------------------------------------------------------------------
// Pressure arrows
// ---------------------------------------------------------------------------

/// Static definition of one glaucoma pressure arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureArrow {
    /// Rest position.
    pub position: Vec3,
    /// Euler rotation (XYZ, radians).
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Phase offset (radians) added to the shared clock.
    pub phase: f32,
}

impl PressureArrow {
    /// Jitter amplitude along x and y.
    pub const JITTER: f32 = 0.1;

    /// Opacity pulses between 0.25 and 1.0; position jitters diagonally.
    #[must_use]
    pub fn at(&self, elapsed: f32) -> MarkerInstance {
        let t = elapsed + self.phase;
        let opacity = ((t * 2.0).sin() + 1.0) / 2.0 * 0.75 + 0.25;
        let movement = (t * 3.0).sin() * Self::JITTER;
        MarkerInstance {
            kind: MarkerKind::PressureArrow,
            position: self.position + Vec3::new(movement, movement, 0.0),
            rotation: self.rotation,
            scale: self.scale,
            material: marker_material(opacity),
        }
    }
}

const fn arrow(position: [f32; 3], roll: f32) -> PressureArrow {
    PressureArrow {
        position: Vec3::from_array(position),
        rotation: Vec3::new(0.0, -0.5, roll),
        scale: 0.2,
        phase: 0.0,
    }
}

/// Arrows ringing the front of the globe, each rolled to point inward.
pub const PRESSURE_ARROWS: [PressureArrow; 8] = [
    arrow([0.65, 3.5, 2.5], 0.0),
    arrow([1.0, 3.3, 3.0], -PI * 0.25),
    arrow([1.0, 2.5, 3.0], -PI * 0.5),
    arrow([1.0, 2.0, 3.0], -PI * 0.75),
    arrow([0.5, 1.8, 2.8], 3.0),
    arrow([0.0, 2.0, 2.5], PI * 0.75),
    arrow([-0.1, 2.5, 2.5], PI / 2.0),
    arrow([0.1, 3.0, 2.3], PI / 4.0),
];

// ---------------------------------------------------------------------------
// Blood spots
// ---------------------------------------------------------------------------

/// Static definition of one retinal blood spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloodSpot {
    /// Position on the retina.
    pub position: Vec3,
    /// Uniform scale applied to [`BloodSpot::RADIUS`].
    pub scale: f32,
}

impl BloodSpot {
    /// Unscaled sphere radius.
    pub const RADIUS: f32 = 0.05;

    /// Opacity pulses between 0.6 and 1.0, phase-shifted by the spot's x
    /// coordinate so neighbouring spots do not pulse in lockstep.
    #[must_use]
    pub fn at(&self, elapsed: f32) -> MarkerInstance {
        MarkerInstance {
            kind: MarkerKind::BloodSpot,
            position: self.position,
            rotation: Vec3::ZERO,
            scale: self.scale,
            material: marker_material(
                (elapsed + self.position.x).sin() * 0.2 + 0.8,
            ),
        }
    }
}

const fn spot(position: [f32; 3], scale: f32) -> BloodSpot {
    BloodSpot {
        position: Vec3::from_array(position),
        scale,
    }
}

/// Spots scattered over the posterior retina.
pub const BLOOD_SPOTS: [BloodSpot; 10] = [
    spot([-0.24, 2.1, 2.5], 0.8),
    spot([-0.4, 2.3, 2.7], 1.0),
    spot([-0.1, 2.4, 2.6], 0.9),
    spot([-0.28, 3.0, 2.28], 1.2),
    spot([-0.5, 2.2, 2.5], 0.7),
    spot([-0.2, 1.9, 2.6], 1.1),
    spot([-0.4, 1.8, 2.8], 0.8),
    spot([-0.1, 2.2, 2.5], 1.0),
    spot([-0.3, 2.5, 2.7], 0.9),
    spot([-0.5, 2.3, 2.6], 1.2),
];

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Owns the condition flags and derives every condition visual from them.
#[derive(Debug, Clone)]
pub struct ConditionOverlayManager {
    state: ConditionState,
    lens_node: String,
    lens_clear: Material,
    lens_cataract: Material,
}

impl ConditionOverlayManager {
    /// Manager with every condition inactive.
    #[must_use]
    pub fn new(options: &EffectOptions) -> Self {
        Self {
            state: ConditionState::new(),
            lens_node: options.lens_node.clone(),
            lens_clear: options.lens_clear,
            lens_cataract: options.lens_cataract,
        }
    }

    /// Adopt the lens node and materials from `options`, keeping the
    /// current flags.
    pub fn apply_options(&mut self, options: &EffectOptions) {
        self.lens_node.clone_from(&options.lens_node);
        self.lens_clear = options.lens_clear;
        self.lens_cataract = options.lens_cataract;
    }

    /// Toggle a condition by string id. Returns whether the flag changed.
    ///
    /// # Errors
    ///
    /// Returns [`EyeViewError::UnknownCondition`] for ids outside the
    /// known set; the state is left unchanged.
    pub fn set_condition(
        &mut self,
        id: &str,
        active: bool,
    ) -> Result<bool, EyeViewError> {
        let id: ConditionId = id.parse()?;
        Ok(self.set(id, active))
    }

    /// Toggle a condition. Returns whether the flag changed.
    pub fn set(&mut self, id: ConditionId, active: bool) -> bool {
        let changed = self.state.set(id, active);
        if changed {
            log::debug!("Condition {id} {}", if active { "on" } else { "off" });
        }
        changed
    }

    /// Current flags.
    #[must_use]
    pub fn state(&self) -> &ConditionState {
        &self.state
    }

    /// Whether `id` is active.
    #[must_use]
    pub fn is_active(&self, id: ConditionId) -> bool {
        self.state.is_active(id)
    }

    /// Name of the scene node that receives the lens material.
    #[must_use]
    pub fn lens_node(&self) -> &str {
        &self.lens_node
    }

    /// The lens material implied by the cataract flag.
    #[must_use]
    pub fn lens_material(&self) -> Material {
        if self.state.is_active(ConditionId::Cataract) {
            self.lens_cataract
        } else {
            self.lens_clear
        }
    }

    /// Write the lens material into `scene`. Returns how many nodes were
    /// updated.
    pub fn apply_to_scene(&self, scene: &mut SceneGraph) -> usize {
        let updated = scene.set_material(&self.lens_node, self.lens_material());
        if updated == 0 {
            log::warn!("Lens node {:?} not found in model", self.lens_node);
        }
        updated
    }

    /// Decorative markers for all active conditions at `elapsed` seconds.
    /// Conditions without markers contribute nothing.
    #[must_use]
    pub fn markers(&self, elapsed: f32) -> Vec<MarkerInstance> {
        let mut out = Vec::new();
        if self.state.is_active(ConditionId::Glaucoma) {
            out.extend(PRESSURE_ARROWS.iter().map(|a| a.at(elapsed)));
        }
        if self.state.is_active(ConditionId::DiabeticRetinopathy) {
            out.extend(BLOOD_SPOTS.iter().map(|s| s.at(elapsed)));
        }
        out
    }
}

impl Default for ConditionOverlayManager {
    fn default() -> Self {
        Self::new(&EffectOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(markers: &[MarkerInstance], kind: MarkerKind) -> usize {
        markers.iter().filter(|m| m.kind == kind).count()
    }

    fn lens_scene() -> SceneGraph {
        SceneGraph::from_node_names(["Sclera_Sclera_0", "Lens_Lens_0"])
    }

    #[test]
    fn test_glaucoma_shows_exactly_eight_arrows() {
        let mut mgr = ConditionOverlayManager::default();
        assert!(mgr.set_condition("glaucoma", true).unwrap());
        let markers = mgr.markers(1.3);
        assert_eq!(markers.len(), 8);
        assert_eq!(count(&markers, MarkerKind::PressureArrow), 8);

        let _ = mgr.set_condition("glaucoma", false).unwrap();
        assert!(mgr.markers(1.3).is_empty());
    }

    #[test]
    fn test_retinopathy_shows_ten_spots() {
        let mut mgr = ConditionOverlayManager::default();
        let _ = mgr.set_condition("diabetic-retinopathy", true).unwrap();
        let _ = mgr.set_condition("glaucoma", true).unwrap();
        let markers = mgr.markers(0.0);
        assert_eq!(count(&markers, MarkerKind::BloodSpot), 10);
        assert_eq!(count(&markers, MarkerKind::PressureArrow), 8);
    }

    #[test]
    fn test_conditions_without_effect_are_accepted() {
        let mut mgr = ConditionOverlayManager::default();
        for id in ["blepharitis", "keratoconus", "floaters", "dry-amd"] {
            assert!(mgr.set_condition(id, true).unwrap());
        }
        assert!(mgr.markers(2.0).is_empty());
        assert_eq!(mgr.lens_material(), Material::CLEAR_LENS);
    }

    #[test]
    fn test_unknown_condition_leaves_state_unchanged() {
        let mut mgr = ConditionOverlayManager::default();
        let _ = mgr.set_condition("cataract", true).unwrap();
        let before = *mgr.state();

        let err = mgr.set_condition("unknown-id", true).unwrap_err();
        assert!(matches!(err, EyeViewError::UnknownCondition(_)));
        assert_eq!(*mgr.state(), before);
    }

    #[test]
    fn test_cataract_toggle_restores_clear_lens() {
        let mut mgr = ConditionOverlayManager::default();
        let mut scene = lens_scene();
        assert_eq!(mgr.apply_to_scene(&mut scene), 1);
        let original = scene.find("Lens_Lens_0").unwrap().material;
        assert_eq!(original, Some(Material::CLEAR_LENS));

        let _ = mgr.set_condition("cataract", true).unwrap();
        let _ = mgr.apply_to_scene(&mut scene);
        assert_eq!(
            scene.find("Lens_Lens_0").unwrap().material,
            Some(Material::CATARACT_LENS)
        );

        let _ = mgr.set_condition("cataract", false).unwrap();
        let _ = mgr.apply_to_scene(&mut scene);
        assert_eq!(scene.find("Lens_Lens_0").unwrap().material, original);
        assert_eq!(scene.find("Sclera_Sclera_0").unwrap().material, None);
    }

    #[test]
    fn test_arrow_animation_ranges() {
        let a = PRESSURE_ARROWS[2];
        for i in 0..200 {
            let m = a.at(i as f32 * 0.05);
            assert!((0.25..=1.0).contains(&m.material.opacity));
            assert_eq!(m.material.color, Material::MARKER_RED.color);
            assert!((m.position.x - a.position.x).abs() <= PressureArrow::JITTER + 1e-6);
            let (dx, dy) = (m.position.x - a.position.x, m.position.y - a.position.y);
            assert!((dx - dy).abs() < 1e-5);
            assert_eq!(m.position.z, a.position.z);
        }
    }

    #[test]
    fn test_arrow_state_depends_only_on_clock() {
        let a = PRESSURE_ARROWS[0];
        assert_eq!(a.at(0.7), a.at(0.7));
        // sin(0) = 0: mid opacity, no jitter
        let rest = a.at(0.0);
        assert!((rest.material.opacity - 0.625).abs() < 1e-6);
        assert_eq!(rest.position, a.position);
    }

    #[test]
    fn test_blood_spots_are_out_of_phase() {
        let t = 0.4;
        let a = BLOOD_SPOTS[0].at(t).material.opacity;
        let b = BLOOD_SPOTS[4].at(t).material.opacity;
        assert!((a - b).abs() > 1e-3);
        for s in BLOOD_SPOTS {
            let o = s.at(t).material.opacity;
            assert!((0.6..=1.0).contains(&o));
        }
    }
}
