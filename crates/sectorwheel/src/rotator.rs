use crate::layout::model::Sector;
use crate::layout::recycler::SectorView;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RotationDirection {
    #[strum(serialize = "Clockwise", serialize = "cw")]
    Clockwise,
    #[strum(serialize = "Anticlockwise", serialize = "ccw", serialize = "counterclockwise")]
    Anticlockwise,
}

/// `sign` maps a positive delta onto the angle axis of the wheel half that built the rotator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotator {
    direction: RotationDirection,
    sign: f64,
}

impl Rotator {
    pub fn new(direction: RotationDirection, sign: f64) -> Self {
        Self { direction, sign }
    }

    pub fn direction(&self) -> RotationDirection {
        self.direction
    }

    pub fn rotate_wheel_by<'a, V>(
        &self,
        delta_rad: f64,
        sectors: impl IntoIterator<Item = &'a mut Sector<V>>,
    ) where
        V: SectorView + 'a,
    {
        let shift = self.sign * delta_rad;
        for sector in sectors {
            sector.params.angle_position_rad += shift;
            sector.view.on_layout_params_changed(&sector.params);
        }
    }
}
