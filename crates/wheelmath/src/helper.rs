use crate::restrictions::AngularRestrictions;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Sector angle must be a positive finite number, got {0} rad")]
    InvalidSectorAngle(f64),
}

/// A sector's reference angle is its top edge: the sector placed at `angle` covers
/// `[angle - sector_angle, angle]`. No normalization into `[0, 2π)` is performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputationHelper {
    sector_angle_rad: f64,
}

impl ComputationHelper {
    pub fn new(sector_angle_rad: f64) -> Result<Self, GeometryError> {
        if !sector_angle_rad.is_finite() || sector_angle_rad <= 0.0 {
            return Err(GeometryError::InvalidSectorAngle(sector_angle_rad));
        }
        Ok(Self { sector_angle_rad })
    }

    pub fn from_restrictions(restrictions: &AngularRestrictions) -> Self {
        // restrictions already guarantee a positive finite width
        Self {
            sector_angle_rad: restrictions.sector_angle_rad(),
        }
    }

    pub fn sector_angle_rad(&self) -> f64 {
        self.sector_angle_rad
    }

    pub fn sector_top_edge_angle_rad(&self, angle_rad: f64) -> f64 {
        angle_rad
    }

    pub fn sector_bottom_edge_angle_rad(&self, angle_rad: f64) -> f64 {
        angle_rad - self.sector_angle_rad
    }

    pub fn sector_center_angle_rad(&self, angle_rad: f64) -> f64 {
        angle_rad - self.sector_angle_rad / 2.0
    }

    pub fn alignment_angle_by_sector_top_edge(&self, boundary_rad: f64) -> f64 {
        boundary_rad
    }

    pub fn alignment_angle_by_sector_bottom_edge(&self, boundary_rad: f64) -> f64 {
        boundary_rad + self.sector_angle_rad
    }

    /// Number of whole or partial sectors needed to cover `[lower_rad, upper_rad]`.
    pub fn sectors_spanning(&self, upper_rad: f64, lower_rad: f64) -> usize {
        if upper_rad <= lower_rad {
            return 0;
        }
        ((upper_rad - lower_rad) / self.sector_angle_rad).ceil() as usize
    }
}
