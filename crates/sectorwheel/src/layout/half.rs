use crate::rotator::{RotationDirection, Rotator};
use wheelmath::AngularRestrictions;

pub trait WheelHalf: std::fmt::Debug {
    fn layout_start_angle_rad(&self, restrictions: &AngularRestrictions) -> f64;

    fn layout_end_angle_rad(&self, restrictions: &AngularRestrictions) -> f64;

    fn startup_layout_angle_rad(&self, restrictions: &AngularRestrictions) -> f64;

    fn clockwise_rotator(&self) -> Rotator;

    fn anticlockwise_rotator(&self) -> Rotator;
}

/// Bottom arc: sectors run from the gap area's bottom edge down to the wheel's bottom edge and
/// turning clockwise lowers their angles.
#[derive(Debug, Clone, Copy, Default)]
pub struct BottomHalf;

impl WheelHalf for BottomHalf {
    fn layout_start_angle_rad(&self, restrictions: &AngularRestrictions) -> f64 {
        restrictions.gap_area_bottom_edge_angle_rad()
    }

    fn layout_end_angle_rad(&self, restrictions: &AngularRestrictions) -> f64 {
        restrictions.wheel_bottom_edge_angle_rad()
    }

    fn startup_layout_angle_rad(&self, restrictions: &AngularRestrictions) -> f64 {
        restrictions.wheel_top_edge_angle_rad()
    }

    fn clockwise_rotator(&self) -> Rotator {
        Rotator::new(RotationDirection::Clockwise, -1.0)
    }

    fn anticlockwise_rotator(&self) -> Rotator {
        Rotator::new(RotationDirection::Anticlockwise, 1.0)
    }
}
