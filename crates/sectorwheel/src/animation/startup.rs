use crate::layout::model::AdapterPosition;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum WheelStartupAnimationStatus {
    Start,
    InProgress,
    Finished,
}

pub trait StartupAnimationListener {
    fn on_startup_animation_status(&mut self, status: WheelStartupAnimationStatus);
}

impl<F> StartupAnimationListener for F
where
    F: FnMut(WheelStartupAnimationStatus),
{
    fn on_startup_animation_status(&mut self, status: WheelStartupAnimationStatus) {
        self(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupSettle {
    anchor: AdapterPosition,
    first_child_original_angle_rad: f64,
}

impl StartupSettle {
    pub fn new(anchor: AdapterPosition, first_child_original_angle_rad: f64) -> Self {
        Self {
            anchor,
            first_child_original_angle_rad,
        }
    }

    pub fn anchor(&self) -> AdapterPosition {
        self.anchor
    }

    /// Total clockwise rotation the wheel must carry at this frame.
    pub fn frame_delta(&self, animated_angle_rad: f64) -> f64 {
        self.first_child_original_angle_rad - animated_angle_rad
    }

    /// Portion of [`Self::frame_delta`] not yet applied, given where the anchor sits now.
    pub fn remaining_rotation(&self, anchor_angle_rad: f64, animated_angle_rad: f64) -> f64 {
        let applied = self.first_child_original_angle_rad - anchor_angle_rad;
        self.frame_delta(animated_angle_rad) - applied
    }
}
