use crate::helper::ComputationHelper;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RestrictionsError {
    #[error("Angular restriction '{name}' is not finite: {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("Sector angle must be positive, got {0} rad")]
    NonPositiveSectorAngle(f64),
    #[error("Angular restrictions out of order: {lower} ({lower_rad} rad) is above {upper} ({upper_rad} rad)")]
    Misordered {
        lower: &'static str,
        lower_rad: f64,
        upper: &'static str,
        upper_rad: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RestrictionBounds {
    pub wheel_top_edge_angle_rad: f64,
    pub wheel_bottom_edge_angle_rad: f64,
    pub gap_area_top_edge_angle_rad: f64,
    pub gap_area_bottom_edge_angle_rad: f64,
    pub sector_angle_rad: f64,
}

/// Always satisfies `wheel_bottom <= gap_bottom <= gap_top <= wheel_top` with a strictly
/// positive sector angle, so the placement loop is guaranteed to reach its bottom boundary.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RestrictionBounds", into = "RestrictionBounds")]
pub struct AngularRestrictions {
    wheel_top_edge_angle_rad: f64,
    wheel_bottom_edge_angle_rad: f64,
    gap_area_top_edge_angle_rad: f64,
    gap_area_bottom_edge_angle_rad: f64,
    sector_angle_rad: f64,
}

impl AngularRestrictions {
    pub fn new(bounds: RestrictionBounds) -> Result<Self, RestrictionsError> {
        Self::try_from(bounds)
    }

    pub fn wheel_top_edge_angle_rad(&self) -> f64 {
        self.wheel_top_edge_angle_rad
    }

    pub fn wheel_bottom_edge_angle_rad(&self) -> f64 {
        self.wheel_bottom_edge_angle_rad
    }

    pub fn gap_area_top_edge_angle_rad(&self) -> f64 {
        self.gap_area_top_edge_angle_rad
    }

    pub fn gap_area_bottom_edge_angle_rad(&self) -> f64 {
        self.gap_area_bottom_edge_angle_rad
    }

    pub fn sector_angle_rad(&self) -> f64 {
        self.sector_angle_rad
    }

    /// Upper bound on the sectors a single pass from the gap edge down to the wheel bottom can place.
    pub fn max_visible_sectors(&self) -> usize {
        ComputationHelper::from_restrictions(self).sectors_spanning(
            self.gap_area_bottom_edge_angle_rad,
            self.wheel_bottom_edge_angle_rad,
        ) + 1
    }
}

impl Default for AngularRestrictions {
    fn default() -> Self {
        Self {
            wheel_top_edge_angle_rad: FRAC_PI_2,
            wheel_bottom_edge_angle_rad: -FRAC_PI_2,
            gap_area_top_edge_angle_rad: PI / 12.0,
            gap_area_bottom_edge_angle_rad: -PI / 12.0,
            sector_angle_rad: PI / 12.0,
        }
    }
}

impl TryFrom<RestrictionBounds> for AngularRestrictions {
    type Error = RestrictionsError;

    fn try_from(bounds: RestrictionBounds) -> Result<Self, Self::Error> {
        let named = [
            ("wheel_bottom_edge", bounds.wheel_bottom_edge_angle_rad),
            ("gap_area_bottom_edge", bounds.gap_area_bottom_edge_angle_rad),
            ("gap_area_top_edge", bounds.gap_area_top_edge_angle_rad),
            ("wheel_top_edge", bounds.wheel_top_edge_angle_rad),
        ];

        if let Some(&(name, value)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RestrictionsError::NotFinite { name, value });
        }
        if !bounds.sector_angle_rad.is_finite() {
            return Err(RestrictionsError::NotFinite {
                name: "sector_angle",
                value: bounds.sector_angle_rad,
            });
        }
        if bounds.sector_angle_rad <= 0.0 {
            return Err(RestrictionsError::NonPositiveSectorAngle(
                bounds.sector_angle_rad,
            ));
        }

        // bottom to top, each bound must not sit above its successor
        if let Some(pair) = named.windows(2).find(|pair| pair[0].1 > pair[1].1) {
            return Err(RestrictionsError::Misordered {
                lower: pair[0].0,
                lower_rad: pair[0].1,
                upper: pair[1].0,
                upper_rad: pair[1].1,
            });
        }
        if bounds.wheel_bottom_edge_angle_rad >= bounds.wheel_top_edge_angle_rad {
            return Err(RestrictionsError::Misordered {
                lower: "wheel_bottom_edge",
                lower_rad: bounds.wheel_bottom_edge_angle_rad,
                upper: "wheel_top_edge",
                upper_rad: bounds.wheel_top_edge_angle_rad,
            });
        }

        Ok(Self {
            wheel_top_edge_angle_rad: bounds.wheel_top_edge_angle_rad,
            wheel_bottom_edge_angle_rad: bounds.wheel_bottom_edge_angle_rad,
            gap_area_top_edge_angle_rad: bounds.gap_area_top_edge_angle_rad,
            gap_area_bottom_edge_angle_rad: bounds.gap_area_bottom_edge_angle_rad,
            sector_angle_rad: bounds.sector_angle_rad,
        })
    }
}

impl From<AngularRestrictions> for RestrictionBounds {
    fn from(r: AngularRestrictions) -> Self {
        Self {
            wheel_top_edge_angle_rad: r.wheel_top_edge_angle_rad,
            wheel_bottom_edge_angle_rad: r.wheel_bottom_edge_angle_rad,
            gap_area_top_edge_angle_rad: r.gap_area_top_edge_angle_rad,
            gap_area_bottom_edge_angle_rad: r.gap_area_bottom_edge_angle_rad,
            sector_angle_rad: r.sector_angle_rad,
        }
    }
}
