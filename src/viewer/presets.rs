use crate::viewer::rotation::RotationVector;
use serde::{Deserialize, Serialize};

pub const FRONT_ROTATION: RotationVector = RotationVector::new(0.0, 0.0, 0.0);
pub const TOP_ROTATION: RotationVector = RotationVector::new(90.0, 0.0, 0.0);
pub const SIDE_ROTATION: RotationVector = RotationVector::new(0.0, 90.0, 0.0);
pub const PANELS_ROTATION: RotationVector = RotationVector::new(30.0, 45.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Front,
    Top,
    Side,
    Panels,
    Custom1,
    Custom2,
    /// Manually adjusted; matches no preset.
    Manual,
}

impl Preset {
    pub const BUTTONS: [Preset; 6] = [
        Preset::Front,
        Preset::Top,
        Preset::Side,
        Preset::Panels,
        Preset::Custom1,
        Preset::Custom2,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Top => "Top",
            Self::Side => "Side",
            Self::Panels => "Panels",
            Self::Custom1 => "Custom 1",
            Self::Custom2 => "Custom 2",
            Self::Manual => "None",
        }
    }

    pub fn rotation(self, custom: &CustomPresets) -> Option<RotationVector> {
        match self {
            Self::Front => Some(FRONT_ROTATION),
            Self::Top => Some(TOP_ROTATION),
            Self::Side => Some(SIDE_ROTATION),
            Self::Panels => Some(PANELS_ROTATION),
            Self::Custom1 => Some(custom.get(CustomSlot::Custom1)),
            Self::Custom2 => Some(custom.get(CustomSlot::Custom2)),
            Self::Manual => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomSlot {
    Custom1,
    Custom2,
}

impl CustomSlot {
    pub const ALL: [CustomSlot; 2] = [CustomSlot::Custom1, CustomSlot::Custom2];
}

impl From<CustomSlot> for Preset {
    fn from(slot: CustomSlot) -> Self {
        match slot {
            CustomSlot::Custom1 => Preset::Custom1,
            CustomSlot::Custom2 => Preset::Custom2,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomPresets {
    pub custom1: RotationVector,
    pub custom2: RotationVector,
}

impl CustomPresets {
    pub fn get(&self, slot: CustomSlot) -> RotationVector {
        match slot {
            CustomSlot::Custom1 => self.custom1,
            CustomSlot::Custom2 => self.custom2,
        }
    }

    pub fn set(&mut self, slot: CustomSlot, rotation: RotationVector) {
        match slot {
            CustomSlot::Custom1 => self.custom1 = rotation,
            CustomSlot::Custom2 => self.custom2 = rotation,
        }
    }
}
