use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EyeViewError;

const CONDITION_COUNT: usize = 9;

/// The fixed set of simulated eye conditions.
///
/// String ids are kebab-case (`"diabetic-retinopathy"`) to match what the
/// condition menu emits.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionId {
    /// Raised intraocular pressure.
    Glaucoma,
    /// Clouding of the lens.
    Cataract,
    /// Retinal blood-vessel damage.
    DiabeticRetinopathy,
    /// Eyelid inflammation.
    Blepharitis,
    /// Conjunctival inflammation.
    Conjunctivitis,
    /// Dry age-related macular degeneration.
    DryAmd,
    /// Corneal thinning.
    Keratoconus,
    /// Vitreous floaters.
    Floaters,
    /// Subconjunctival haemorrhage.
    SubconjHaems,
}

impl ConditionId {
    /// Every condition, in menu order.
    pub const ALL: [Self; CONDITION_COUNT] = [
        Self::Glaucoma,
        Self::Cataract,
        Self::DiabeticRetinopathy,
        Self::Blepharitis,
        Self::Conjunctivitis,
        Self::DryAmd,
        Self::Keratoconus,
        Self::Floaters,
        Self::SubconjHaems,
    ];

    /// Stable string id.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Glaucoma => "glaucoma",
            Self::Cataract => "cataract",
            Self::DiabeticRetinopathy => "diabetic-retinopathy",
            Self::Blepharitis => "blepharitis",
            Self::Conjunctivitis => "conjunctivitis",
            Self::DryAmd => "dry-amd",
            Self::Keratoconus => "keratoconus",
            Self::Floaters => "floaters",
            Self::SubconjHaems => "subconj-haems",
        }
    }

    /// Menu label.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Glaucoma => "Glaucoma",
            Self::Cataract => "Cataract",
            Self::DiabeticRetinopathy => "Diabetic Retinopathy",
            Self::Blepharitis => "Blepharitis",
            Self::Conjunctivitis => "Conjunctivitis",
            Self::DryAmd => "Dry AMD",
            Self::Keratoconus => "Keratoconus",
            Self::Floaters => "Floaters",
            Self::SubconjHaems => "Subconj Haems",
        }
    }

    /// One-line menu description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Glaucoma => "Increased pressure in the eye",
            Self::Cataract => "Clouding of the eye's lens",
            Self::DiabeticRetinopathy => "Damage to blood vessels in the retina",
            Self::Blepharitis => "Inflammation of the eyelids",
            Self::Conjunctivitis => "Inflammation of the conjunctiva",
            Self::DryAmd => "Age-related macular degeneration",
            Self::Keratoconus => "Thinning of the cornea",
            Self::Floaters => "Spots in field of vision",
            Self::SubconjHaems => "Bleeding under conjunctiva",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionId {
    type Err = EyeViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| EyeViewError::UnknownCondition(s.to_owned()))
    }
}

/// Active flag for every known condition, all `false` by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionState {
    flags: [bool; CONDITION_COUNT],
}

impl ConditionState {
    /// All conditions inactive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is active.
    #[must_use]
    pub fn is_active(&self, id: ConditionId) -> bool {
        self.flags[id.index()]
    }

    /// Set a flag. Returns whether the value changed.
    pub fn set(&mut self, id: ConditionId, active: bool) -> bool {
        let flag = &mut self.flags[id.index()];
        let changed = *flag != active;
        *flag = active;
        changed
    }

    /// Active conditions in menu order.
    pub fn active(&self) -> impl Iterator<Item = ConditionId> + '_ {
        ConditionId::ALL
            .into_iter()
            .filter(|&id| self.is_active(id))
    }
}
